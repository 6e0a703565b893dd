/// Headless entry point: list the map library and what is stored for each map.
///
/// Usage: `winestudy-native [DATA_DIR]`. Without an argument the configured
/// data directory is used, falling back to the current directory.
/// `winestudy-native --init-config` writes the current (or default)
/// configuration to the default config path and exits.
#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use winestudy::config::AppConfig;
    use winestudy::storage::{ImageProvider, MapCatalog, MapLibrary, RegionRepository};

    let config = AppConfig::load_from_default_path().unwrap_or_default();
    env_logger::builder()
        .filter_level(config.preferences.log_level.to_level_filter())
        .parse_default_env()
        .init();

    let arg = std::env::args_os().nth(1);
    if arg.as_deref() == Some(std::ffi::OsStr::new("--init-config")) {
        return match config.save_to_default_path() {
            Ok(()) => {
                if let Some(path) = AppConfig::default_path() {
                    println!("Wrote {}", path.display());
                }
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Cannot write config: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let root = arg
        .map(PathBuf::from)
        .or_else(|| {
            Some(PathBuf::from(&config.preferences.data_dir))
                .filter(|p| !p.as_os_str().is_empty())
        })
        .unwrap_or_else(|| PathBuf::from("."));

    let library = match MapLibrary::open(&root) {
        Ok(library) => library,
        Err(e) => {
            eprintln!("Cannot open map library at {}: {}", root.display(), e);
            return ExitCode::FAILURE;
        }
    };
    let maps = match library.list_maps() {
        Ok(maps) => maps,
        Err(e) => {
            eprintln!("Cannot list maps: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if maps.is_empty() {
        println!("No maps in {}", library.maps_dir().display());
        return ExitCode::SUCCESS;
    }

    for map_id in &maps {
        let size = match library.image_size(map_id) {
            Ok(size) => format!("{}x{}", size.width, size.height),
            Err(e) => {
                log::warn!("{}: {}", map_id, e);
                "unreadable".to_string()
            }
        };
        let regions = match library.load_regions(map_id) {
            Ok(document) => format!("{} regions", document.len()),
            Err(e) => {
                log::warn!("{}: {}", map_id, e);
                "regions unreadable".to_string()
            }
        };
        println!("{map_id}\t{size}\t{regions}");
    }

    ExitCode::SUCCESS
}

// WASM doesn't use main(), it uses wasm_bindgen's start function
#[cfg(target_arch = "wasm32")]
fn main() {}

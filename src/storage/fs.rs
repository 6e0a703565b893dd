//! Directory-backed map library.
//!
//! ```text
//! <root>/
//!   maps/          France11.png, Bordeaux.webp, ...
//!   polyregions/   France11.json, Bordeaux.json, ...
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::library::{IMAGE_EXTENSIONS, MAPS_DIR, REGIONS_DIR};
use crate::format::{RegionDocument, region_file_name};
use crate::geometry::Size;
use crate::storage::{ImageProvider, MapCatalog, RegionRepository, StorageError, validate_map_id};

/// Map images and region files under a single root directory.
#[derive(Debug, Clone)]
pub struct MapLibrary {
    root: PathBuf,
}

impl MapLibrary {
    /// Open a library, creating `maps/` and `polyregions/` if missing.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(root.join(MAPS_DIR))?;
        fs::create_dir_all(root.join(REGIONS_DIR))?;
        log::info!("📂 Opened map library at {:?}", root);
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn maps_dir(&self) -> PathBuf {
        self.root.join(MAPS_DIR)
    }

    pub fn regions_dir(&self) -> PathBuf {
        self.root.join(REGIONS_DIR)
    }

    /// Path of a map image.
    pub fn map_path(&self, map_id: &str) -> Result<PathBuf, StorageError> {
        validate_map_id(map_id)?;
        Ok(self.maps_dir().join(map_id))
    }

    /// Path of a map's region document.
    pub fn regions_path(&self, map_id: &str) -> Result<PathBuf, StorageError> {
        validate_map_id(map_id)?;
        Ok(self.regions_dir().join(region_file_name(map_id)))
    }
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

impl MapCatalog for MapLibrary {
    fn list_maps(&self) -> Result<Vec<String>, StorageError> {
        let mut maps = Vec::new();
        for entry in fs::read_dir(self.maps_dir())? {
            let path = entry?.path();
            if !path.is_file() || !is_image_file(&path) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                maps.push(name.to_string());
            }
        }
        maps.sort();
        log::debug!("Found {} maps in {:?}", maps.len(), self.maps_dir());
        Ok(maps)
    }
}

impl ImageProvider for MapLibrary {
    fn image_size(&self, map_id: &str) -> Result<Size, StorageError> {
        let path = self.map_path(map_id)?;
        if !path.is_file() {
            return Err(StorageError::NotFound(map_id.to_string()));
        }
        let dims = image::image_dimensions(&path)?;
        Ok(Size::from(dims))
    }
}

impl RegionRepository for MapLibrary {
    fn load_regions(&self, map_id: &str) -> Result<RegionDocument, StorageError> {
        let path = self.regions_path(map_id)?;
        if !path.exists() {
            log::debug!("No region file for {}, starting empty", map_id);
            return Ok(RegionDocument::default());
        }
        Ok(RegionDocument::read_from(&path)?)
    }

    fn save_regions(&mut self, map_id: &str, document: &RegionDocument) -> Result<(), StorageError> {
        let path = self.regions_path(map_id)?;
        document.write_to(&path)?;
        Ok(())
    }
}

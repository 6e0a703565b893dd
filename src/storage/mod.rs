//! Collaborators that supply map images and persist region documents.
//!
//! The engine only talks to these traits. Storage is an opaque blob store
//! keyed by map id; what a "map id" names (a file, a URL) is up to the
//! implementation.
//!
//! - [`MapLibrary`]: a directory with `maps/` and `polyregions/` (native only)
//! - [`MemoryLibrary`]: everything in memory (tests, browser builds)

mod error;
#[cfg(not(target_arch = "wasm32"))]
mod fs;
mod memory;

pub use error::StorageError;
#[cfg(not(target_arch = "wasm32"))]
pub use fs::MapLibrary;
pub use memory::MemoryLibrary;

use crate::format::RegionDocument;
use crate::geometry::Size;

/// Lists the maps available for labeling.
pub trait MapCatalog {
    /// Map ids in display order.
    fn list_maps(&self) -> Result<Vec<String>, StorageError>;
}

/// Supplies map images.
pub trait ImageProvider {
    /// Intrinsic pixel size of the decoded image.
    fn image_size(&self, map_id: &str) -> Result<Size, StorageError>;
}

/// Loads and saves a map's region document.
pub trait RegionRepository {
    /// Regions stored for a map; a map with nothing stored yields an empty document.
    fn load_regions(&self, map_id: &str) -> Result<RegionDocument, StorageError>;

    /// Replace the regions stored for a map.
    fn save_regions(&mut self, map_id: &str, document: &RegionDocument) -> Result<(), StorageError>;
}

/// Reject ids that could escape the library directory.
pub fn validate_map_id(map_id: &str) -> Result<(), StorageError> {
    let invalid = map_id.is_empty()
        || map_id == "."
        || map_id == ".."
        || map_id.contains(['/', '\\', '\0']);
    if invalid {
        return Err(StorageError::InvalidMapId(map_id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_map_id() {
        assert!(validate_map_id("France11.png").is_ok());
        assert!(validate_map_id("..hidden.png").is_ok());
        for bad in ["", ".", "..", "../etc/passwd", "a/b.png", "a\\b.png"] {
            assert!(
                matches!(validate_map_id(bad), Err(StorageError::InvalidMapId(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}

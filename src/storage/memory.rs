//! In-memory map library.

use std::collections::BTreeMap;

use crate::format::{RegionDocument, region_file_name};
use crate::geometry::Size;
use crate::storage::{ImageProvider, MapCatalog, RegionRepository, StorageError, validate_map_id};

/// Maps and region documents held in memory.
///
/// Documents are kept as serialized JSON keyed by region file name, so
/// loading exercises the same parsing as a file on disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryLibrary {
    maps: BTreeMap<String, Size>,
    documents: BTreeMap<String, String>,
}

impl MemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a map image of the given size.
    pub fn with_map(mut self, map_id: impl Into<String>, size: Size) -> Self {
        self.add_map(map_id, size);
        self
    }

    pub fn add_map(&mut self, map_id: impl Into<String>, size: Size) {
        self.maps.insert(map_id.into(), size);
    }

    /// Store raw document text for a map, bypassing serialization.
    pub fn insert_raw(&mut self, map_id: &str, json: impl Into<String>) {
        self.documents.insert(region_file_name(map_id), json.into());
    }

    /// Raw document text stored for a map.
    pub fn raw(&self, map_id: &str) -> Option<&str> {
        self.documents
            .get(&region_file_name(map_id))
            .map(String::as_str)
    }
}

impl MapCatalog for MemoryLibrary {
    fn list_maps(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.maps.keys().cloned().collect())
    }
}

impl ImageProvider for MemoryLibrary {
    fn image_size(&self, map_id: &str) -> Result<Size, StorageError> {
        validate_map_id(map_id)?;
        self.maps
            .get(map_id)
            .copied()
            .ok_or_else(|| StorageError::NotFound(map_id.to_string()))
    }
}

impl RegionRepository for MemoryLibrary {
    fn load_regions(&self, map_id: &str) -> Result<RegionDocument, StorageError> {
        validate_map_id(map_id)?;
        match self.raw(map_id) {
            Some(json) => Ok(RegionDocument::from_json(json)?),
            None => Ok(RegionDocument::default()),
        }
    }

    fn save_regions(&mut self, map_id: &str, document: &RegionDocument) -> Result<(), StorageError> {
        validate_map_id(map_id)?;
        let json = document.to_json()?;
        self.documents.insert(region_file_name(map_id), json);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::FormatError;

    #[test]
    fn test_catalog_and_sizes() {
        let library = MemoryLibrary::new()
            .with_map("b.png", Size::new(10.0, 20.0))
            .with_map("a.png", Size::new(1.0, 1.0));
        assert_eq!(library.list_maps().unwrap(), vec!["a.png", "b.png"]);
        assert_eq!(library.image_size("b.png").unwrap(), Size::new(10.0, 20.0));
        assert!(matches!(
            library.image_size("c.png"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn test_documents_share_file_name() {
        let mut library = MemoryLibrary::new();
        library.save_regions("France.png", &RegionDocument::default()).unwrap();
        // Same region file name as France.png
        assert!(library.raw("France.jpg").is_some());
        assert!(library.load_regions("Italy.png").unwrap().is_empty());
    }

    #[test]
    fn test_corrupt_document() {
        let mut library = MemoryLibrary::new();
        library.insert_raw("France.png", "[]");
        assert!(matches!(
            library.load_regions("France.png"),
            Err(StorageError::Format(FormatError::Json(_)))
        ));
    }
}

//! Region file format.
//!
//! A map's regions persist as one JSON document per map (see
//! [`RegionDocument`]). The document is the only thing storage sees: it
//! carries ids, names, colors, vertices and label anchors, never display
//! state.

mod document;
mod error;

pub use document::{RegionDocument, RegionEntry};
pub use error::FormatError;

/// File name of the region document for a map.
///
/// The map id's final extension is replaced by `.json`
/// (`France11.png` → `France11.json`); ids without one get `.json` appended.
pub fn region_file_name(map_id: &str) -> String {
    match map_id.rsplit_once('.') {
        Some((stem, ext)) if !ext.is_empty() => format!("{stem}.json"),
        _ => format!("{map_id}.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_file_name() {
        assert_eq!(region_file_name("France11.png"), "France11.json");
        assert_eq!(region_file_name("Bordeaux.left.webp"), "Bordeaux.left.json");
        assert_eq!(region_file_name("noext"), "noext.json");
        assert_eq!(region_file_name("trailing."), "trailing..json");
    }
}

//! The persisted region document.
//!
//! ```json
//! {
//!   "regions": [
//!     {
//!       "id": "3f2b…",
//!       "name": "Pauillac",
//!       "color": "hsl(210 70% 70%)",
//!       "points": [{ "x": 0.41, "y": 0.22 }, …],
//!       "labelPos": { "x": 0.43, "y": 0.25 }
//!     }
//!   ]
//! }
//! ```
//!
//! Only these fields are written. Transient display state (`showName`,
//! overrides) found in older files is ignored on load.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::format::error::FormatError;
use crate::geometry::Point;
use crate::model::{Region, RegionId};

/// Top-level region file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RegionDocument {
    /// Regions in creation order.
    #[serde(default)]
    pub regions: Vec<RegionEntry>,
}

/// One persisted region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionEntry {
    /// Opaque id; an empty id is replaced when loaded into a store.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
    /// Vertices in normalized image space.
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(
        rename = "labelPos",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub label_pos: Option<Point>,
}

impl From<&Region> for RegionEntry {
    fn from(region: &Region) -> Self {
        Self {
            id: region.id.to_string(),
            name: region.name.clone(),
            color: region.color.clone(),
            points: region.points.clone(),
            label_pos: region.label_pos,
        }
    }
}

impl From<RegionEntry> for Region {
    fn from(entry: RegionEntry) -> Self {
        let region = Region::new(RegionId::from(entry.id), entry.name, entry.color, entry.points);
        match entry.label_pos {
            Some(pos) => region.with_label_pos(pos),
            None => region,
        }
    }
}

impl RegionDocument {
    /// Snapshot regions for saving, dropping transient display state.
    pub fn from_regions(regions: &[Region]) -> Self {
        Self {
            regions: regions.iter().map(RegionEntry::from).collect(),
        }
    }

    /// Convert to regions with no display state.
    pub fn into_regions(self) -> Vec<Region> {
        self.regions.into_iter().map(Region::from).collect()
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Check that every coordinate can be written as a JSON number.
    pub fn validate(&self) -> Result<(), FormatError> {
        for (index, entry) in self.regions.iter().enumerate() {
            let finite = |p: &Point| p.x.is_finite() && p.y.is_finite();
            if !entry.points.iter().all(finite) {
                return Err(FormatError::invalid_region(index, "non-finite vertex coordinate"));
            }
            if entry.label_pos.as_ref().is_some_and(|p| !finite(p)) {
                return Err(FormatError::invalid_region(index, "non-finite label position"));
            }
        }
        Ok(())
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, FormatError> {
        self.validate()?;
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON. A missing `regions` key yields an empty document.
    pub fn from_json(json: &str) -> Result<Self, FormatError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read a region file.
    pub fn read_from(path: &Path) -> Result<Self, FormatError> {
        log::debug!("Reading regions from {:?}", path);
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write a region file, replacing any existing one.
    pub fn write_to(&self, path: &Path) -> Result<(), FormatError> {
        let json = self.to_json()?;
        std::fs::write(path, json)?;
        log::info!("Wrote {} regions to {:?}", self.regions.len(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_regions() -> Vec<Region> {
        let mut shown = Region::new(
            RegionId::from("a1"),
            "Margaux",
            "hsl(12 70% 70%)",
            vec![
                Point::new(0.1, 0.2),
                Point::new(0.3, 0.2),
                Point::new(0.3333333333333333, 0.45),
            ],
        );
        shown.set_override(Some("rgba(0,200,0,0.25)"), Some("green"), true);
        let pinned = Region::new(
            RegionId::from("b2"),
            "Sauternes",
            "hsl(300 70% 70%)",
            vec![Point::new(0.6, 0.6), Point::new(0.9, 0.6), Point::new(0.75, 0.95)],
        )
        .with_label_pos(Point::new(0.7, 0.7));
        vec![shown, pinned]
    }

    #[test]
    fn test_roundtrip_drops_transient_state() {
        let regions = sample_regions();
        let json = RegionDocument::from_regions(&regions).to_json().unwrap();
        assert!(!json.contains("showName"));
        assert!(!json.contains("green\""), "overrides must not be written");
        assert!(json.contains("\"labelPos\""));

        let loaded = RegionDocument::from_json(&json).unwrap().into_regions();
        assert_eq!(loaded.len(), 2);
        for (original, back) in regions.iter().zip(&loaded) {
            assert_eq!(back.id, original.id);
            assert_eq!(back.name, original.name);
            assert_eq!(back.color, original.color);
            assert_eq!(back.points, original.points);
            assert_eq!(back.label_pos, original.label_pos);
            assert!(!back.has_override());
        }
    }

    #[test]
    fn test_label_pos_omitted_when_absent() {
        let regions = sample_regions();
        let doc = RegionDocument::from_regions(&regions[..1]);
        let json = doc.to_json().unwrap();
        assert!(!json.contains("labelPos"));
    }

    #[test]
    fn test_legacy_fields_are_ignored() {
        let json = r#"{
            "regions": [{
                "id": "x",
                "name": "Pomerol",
                "color": "hsl(1 70% 70%)",
                "points": [{"x":0,"y":0},{"x":1,"y":0},{"x":1,"y":1}],
                "showName": true,
                "fillOverride": "rgba(255,0,0,0.25)"
            }]
        }"#;
        let regions = RegionDocument::from_json(json).unwrap().into_regions();
        assert_eq!(regions[0].name, "Pomerol");
        assert!(!regions[0].show_name);
        assert!(regions[0].fill_override.is_none());
    }

    #[test]
    fn test_missing_regions_key_is_empty() {
        assert!(RegionDocument::from_json("{}").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            RegionDocument::from_json("{\"regions\": [ {\"points\": 3} ]}"),
            Err(FormatError::Json(_))
        ));
        assert!(RegionDocument::from_json("not json").is_err());
    }

    #[test]
    fn test_non_finite_points_are_rejected_on_save() {
        let region = Region::new(
            RegionId::from("nan"),
            "Broken",
            "red",
            vec![Point::new(f64::NAN, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)],
        );
        let err = RegionDocument::from_regions(&[region]).to_json().unwrap_err();
        assert!(matches!(err, FormatError::InvalidRegion { index: 0, .. }));
    }
}

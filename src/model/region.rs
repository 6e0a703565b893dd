//! Region types: a named, colored polygon over the map image.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::MIN_POLYGON_VERTICES;
use crate::constants::style::{REGION_LIGHTNESS, REGION_SATURATION};
use crate::geometry::{Point, centroid, point_in_polygon};

/// Opaque unique identifier for a region.
///
/// Generated ids are UUID strings, but any string loaded from storage is
/// accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a random (version 4 layout) UUID id.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bytes: [u8; 16] = rng.random();
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for RegionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Random hue, fixed saturation/lightness, as a CSS `hsl()` token.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> String {
    let hue: u16 = rng.random_range(0..360);
    format!("hsl({hue} {REGION_SATURATION}% {REGION_LIGHTNESS}%)")
}

/// A named polygon annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Region {
    /// Unique identifier.
    pub id: RegionId,
    /// Display name, editable.
    pub name: String,
    /// Display color token.
    pub color: String,
    /// Vertices in normalized image space, closed implicitly.
    pub points: Vec<Point>,
    /// Explicit label anchor; the vertex centroid is used when absent.
    pub label_pos: Option<Point>,

    // Transient display state, never persisted.
    /// Whether the name is drawn on the map.
    pub show_name: bool,
    pub fill_override: Option<String>,
    pub stroke_override: Option<String>,
}

impl Region {
    /// Create a region with no label anchor and no display override.
    pub fn new(
        id: RegionId,
        name: impl Into<String>,
        color: impl Into<String>,
        points: Vec<Point>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color: color.into(),
            points,
            label_pos: None,
            show_name: false,
            fill_override: None,
            stroke_override: None,
        }
    }

    pub fn with_label_pos(mut self, label_pos: Point) -> Self {
        self.label_pos = Some(label_pos);
        self
    }

    /// True if the region has enough vertices to be drawn and hit-tested.
    pub fn is_polygon(&self) -> bool {
        self.points.len() >= MIN_POLYGON_VERTICES
    }

    /// Check if a normalized point lies inside this region.
    pub fn contains(&self, point: &Point) -> bool {
        self.is_polygon() && point_in_polygon(point, &self.points)
    }

    /// Where the name label goes.
    pub fn label_anchor(&self) -> Option<Point> {
        self.label_pos.or_else(|| centroid(&self.points))
    }

    /// Set the transient highlight.
    pub fn set_override(&mut self, fill: Option<&str>, stroke: Option<&str>, show_name: bool) {
        self.fill_override = fill.map(str::to_owned);
        self.stroke_override = stroke.map(str::to_owned);
        self.show_name = show_name;
    }

    /// Drop the transient highlight and hide the name.
    pub fn clear_override(&mut self) {
        self.fill_override = None;
        self.stroke_override = None;
        self.show_name = false;
    }

    pub fn has_override(&self) -> bool {
        self.fill_override.is_some() || self.stroke_override.is_some() || self.show_name
    }
}

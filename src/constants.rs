//! Global constants for the winestudy engine

/// Minimum number of vertices for a committed region.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Geometry tolerances.
pub mod geometry {
    /// Substitute denominator for horizontal polygon edges.
    pub const DEGENERATE_EDGE_EPSILON: f64 = 1e-9;
}

/// Viewport limits and interaction steps.
pub mod zoom {
    /// Minimum zoom level
    pub const MIN: f64 = 0.5;
    /// Maximum zoom level
    pub const MAX: f64 = 5.0;
    /// Wheel zoom factor per notch
    pub const STEP: f64 = 1.1;
}

/// Quiz timing.
pub mod quiz {
    use std::time::Duration;

    /// Delay between completing a round and the automatic restart.
    pub const RESTART_DELAY: Duration = Duration::from_secs(2);
}

/// Display tokens handed to render targets.
///
/// These are CSS color strings because the browser canvas consumes them
/// directly; other targets parse what they need.
pub mod style {
    /// Fill for regions without an override
    pub const DEFAULT_FILL: &str = "rgba(0,0,0,0.08)";
    /// Stroke for regions with no color token
    pub const DEFAULT_STROKE: &str = "#333";
    /// Stroke for the in-progress polygon
    pub const DRAFT_STROKE: &str = "#0078d4";
    /// Outline width in screen pixels
    pub const LINE_WIDTH: f64 = 2.0;
    /// Dash and gap lengths for the in-progress polygon
    pub const DASH_PATTERN: [f64; 2] = [4.0, 4.0];

    pub const LABEL_FONT: &str = "600 14px sans-serif";
    pub const LABEL_COLOR: &str = "#111";

    pub const CORRECT_FILL: &str = "rgba(0,200,0,0.25)";
    pub const CORRECT_STROKE: &str = "green";
    pub const INCORRECT_FILL: &str = "rgba(255,0,0,0.25)";
    pub const INCORRECT_STROKE: &str = "red";

    /// Saturation and lightness of generated region colors.
    pub const REGION_SATURATION: u8 = 70;
    pub const REGION_LIGHTNESS: u8 = 70;
}

/// File layout of the on-disk map library.
pub mod library {
    /// Subdirectory holding map images
    pub const MAPS_DIR: &str = "maps";
    /// Subdirectory holding region JSON files
    pub const REGIONS_DIR: &str = "polyregions";
    /// Image extensions listed by the map catalog (lowercase)
    pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp"];
}

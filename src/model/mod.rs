//! Data models for the region editor.

mod drawing;
mod region;

pub use drawing::{DrawingError, DrawingPhase, DrawingSession};
pub use region::{Region, RegionId, random_color};

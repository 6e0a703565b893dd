//! The in-progress polygon while authoring a region.

use thiserror::Error;

use crate::constants::MIN_POLYGON_VERTICES;
use crate::geometry::Point;
use crate::model::RegionId;
use crate::store::RegionStore;

/// Where a drawing session stands, derived from its vertex count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawingPhase {
    /// No vertices.
    Empty,
    /// Some vertices, not yet enough for a polygon.
    Accumulating,
    /// Enough vertices to commit.
    ReadyToCommit,
}

/// Errors from committing a drawing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DrawingError {
    /// Fewer vertices than a polygon needs
    #[error("Insufficient vertices: a region needs at least {required}, got {count}")]
    InsufficientVertices {
        /// Vertices accumulated so far
        count: usize,
        /// Minimum vertex count
        required: usize,
    },
}

/// Points collected by successive clicks in setup mode.
#[derive(Debug, Clone, Default)]
pub struct DrawingSession {
    points: Vec<Point>,
}

impl DrawingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DrawingPhase {
        match self.points.len() {
            0 => DrawingPhase::Empty,
            n if n < MIN_POLYGON_VERTICES => DrawingPhase::Accumulating,
            _ => DrawingPhase::ReadyToCommit,
        }
    }

    /// Vertices so far, in click order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a vertex (normalized coordinates).
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Discard all vertices.
    pub fn cancel(&mut self) {
        if !self.points.is_empty() {
            log::debug!("Drawing cancelled ({} vertices discarded)", self.points.len());
        }
        self.points.clear();
    }

    /// Turn the accumulated vertices into a region.
    ///
    /// With too few vertices nothing changes and an error is returned;
    /// otherwise exactly one region is appended to `store` and the session
    /// is emptied.
    pub fn commit(
        &mut self,
        name: impl Into<String>,
        store: &mut RegionStore,
    ) -> Result<RegionId, DrawingError> {
        if self.points.len() < MIN_POLYGON_VERTICES {
            return Err(DrawingError::InsufficientVertices {
                count: self.points.len(),
                required: MIN_POLYGON_VERTICES,
            });
        }

        let points = std::mem::take(&mut self.points);
        Ok(store.add_region(name, points).id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_transitions() {
        let mut drawing = DrawingSession::new();
        assert_eq!(drawing.phase(), DrawingPhase::Empty);

        drawing.add_point(Point::new(0.1, 0.1));
        assert_eq!(drawing.phase(), DrawingPhase::Accumulating);
        drawing.add_point(Point::new(0.2, 0.1));
        assert_eq!(drawing.phase(), DrawingPhase::Accumulating);
        drawing.add_point(Point::new(0.2, 0.2));
        assert_eq!(drawing.phase(), DrawingPhase::ReadyToCommit);

        drawing.cancel();
        assert_eq!(drawing.phase(), DrawingPhase::Empty);
    }

    #[test]
    fn test_commit_with_two_points_is_rejected() {
        let mut store = RegionStore::with_seed(5);
        let mut drawing = DrawingSession::new();
        drawing.add_point(Point::new(0.1, 0.1));
        drawing.add_point(Point::new(0.2, 0.1));

        let err = drawing.commit("Pauillac", &mut store).unwrap_err();
        assert_eq!(
            err,
            DrawingError::InsufficientVertices {
                count: 2,
                required: 3
            }
        );
        assert!(store.is_empty());
        assert_eq!(drawing.len(), 2, "points are kept for further clicks");
    }

    #[test]
    fn test_commit_with_three_points_creates_one_region() {
        let mut store = RegionStore::with_seed(5);
        let mut drawing = DrawingSession::new();
        let points = [
            Point::new(0.1, 0.1),
            Point::new(0.2, 0.1),
            Point::new(0.2, 0.2),
        ];
        for p in points {
            drawing.add_point(p);
        }

        let id = drawing.commit("Pauillac", &mut store).unwrap();
        assert_eq!(store.len(), 1);
        let region = store.get(&id).unwrap();
        assert_eq!(region.name, "Pauillac");
        assert_eq!(region.points, points);
        assert!(drawing.is_empty());
    }

    #[test]
    fn test_cancel_discards_points() {
        let mut store = RegionStore::with_seed(5);
        let mut drawing = DrawingSession::new();
        for i in 0..4 {
            drawing.add_point(Point::new(0.1 * f64::from(i), 0.5));
        }
        drawing.cancel();
        assert!(drawing.commit("nothing", &mut store).is_err());
        assert!(store.is_empty());
    }
}

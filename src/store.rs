//! In-memory region storage for the loaded map.

use std::collections::HashSet;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::geometry::Point;
use crate::model::{Region, RegionId, random_color};

/// Ordered collection of regions for a single map.
///
/// Order is creation order: rendering walks it forwards, hit testing walks
/// it backwards so the last drawn region wins.
#[derive(Debug, Clone)]
pub struct RegionStore {
    regions: Vec<Region>,
    /// Source for ids and colors.
    rng: StdRng,
    /// Dirty flag - set when regions or their display state change.
    /// Used to avoid redrawing every frame.
    dirty: bool,
}

impl RegionStore {
    pub fn new() -> Self {
        Self::with_rng(crate::rng::fresh_rng())
    }

    /// Create a store with a deterministic id/color sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            regions: Vec::new(),
            rng,
            dirty: true,
        }
    }

    /// Check if the store has been modified since last clear_dirty().
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clear the dirty flag. Call after redrawing.
    #[inline]
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    #[inline]
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn unused_id(&mut self) -> RegionId {
        loop {
            let id = RegionId::random(&mut self.rng);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    /// Add a region with a fresh id and a random color.
    ///
    /// Vertex count is not checked here; authoring goes through
    /// [`crate::model::DrawingSession::commit`], which enforces it.
    pub fn add_region(&mut self, name: impl Into<String>, points: Vec<Point>) -> &Region {
        let id = self.unused_id();
        let color = random_color(&mut self.rng);
        let region = Region::new(id, name, color, points);
        log::debug!("Added region {} ({:?}, {} vertices)", region.id, region.name, region.points.len());
        self.regions.push(region);
        self.mark_dirty();
        &self.regions[self.regions.len() - 1]
    }

    /// Replace all regions, e.g. after loading a map.
    ///
    /// Transient display state is reset. Missing or duplicate ids are
    /// replaced with fresh ones so ids stay unique. Returns the number of
    /// regions now stored.
    pub fn replace_all(&mut self, regions: Vec<Region>) -> usize {
        self.regions.clear();
        for mut region in regions {
            region.clear_override();
            if region.id.is_empty() || self.get(&region.id).is_some() {
                let fresh = self.unused_id();
                log::warn!("Region {:?} has a missing or duplicate id, assigned {}", region.name, fresh);
                region.id = fresh;
            }
            self.regions.push(region);
        }
        self.mark_dirty();
        self.regions.len()
    }

    /// Rename a region. Returns false if the id is unknown.
    pub fn rename_region(&mut self, id: &RegionId, name: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(region) => {
                region.name = name.into();
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    /// Remove a region by id.
    pub fn delete_region(&mut self, id: &RegionId) -> Option<Region> {
        let index = self.regions.iter().position(|r| &r.id == id)?;
        self.mark_dirty();
        Some(self.regions.remove(index))
    }

    /// Remove all regions.
    pub fn clear_all(&mut self) {
        if !self.regions.is_empty() {
            self.mark_dirty();
        }
        self.regions.clear();
    }

    /// All regions in creation order.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn get(&self, id: &RegionId) -> Option<&Region> {
        self.regions.iter().find(|r| &r.id == id)
    }

    pub fn get_mut(&mut self, id: &RegionId) -> Option<&mut Region> {
        self.regions.iter_mut().find(|r| &r.id == id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Ids of regions with enough vertices to be drawn and hit-tested.
    pub fn polygon_ids(&self) -> Vec<RegionId> {
        self.regions
            .iter()
            .filter(|r| r.is_polygon())
            .map(|r| r.id.clone())
            .collect()
    }

    /// Set a region's transient highlight. Returns false if the id is unknown.
    pub fn set_override(
        &mut self,
        id: &RegionId,
        fill: Option<&str>,
        stroke: Option<&str>,
        show_name: bool,
    ) -> bool {
        match self.get_mut(id) {
            Some(region) => {
                region.set_override(fill, stroke, show_name);
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    /// Clear a region's transient highlight. Returns false if the id is unknown.
    pub fn clear_overrides(&mut self, id: &RegionId) -> bool {
        match self.get_mut(id) {
            Some(region) => {
                region.clear_override();
                self.mark_dirty();
                true
            }
            None => false,
        }
    }

    /// Clear the highlight of every region whose id is not in `keep`.
    pub fn clear_overrides_except(&mut self, keep: &HashSet<RegionId>) {
        for region in self.regions.iter_mut().filter(|r| !keep.contains(&r.id)) {
            region.clear_override();
        }
        self.mark_dirty();
    }

    pub fn clear_all_overrides(&mut self) {
        self.clear_overrides_except(&HashSet::new());
    }

    /// Find the topmost region containing a normalized point.
    pub fn hit_test(&self, point: &Point) -> Option<&Region> {
        self.regions.iter().rev().find(|r| r.contains(point))
    }
}

impl Default for RegionStore {
    fn default() -> Self {
        Self::new()
    }
}

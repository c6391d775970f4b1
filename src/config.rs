//! Convenience bag for the thresholds the three filters take.
//!
//! This is pure convenience: every [`crate::Heightfield`] filter method also
//! accepts its threshold directly, so using this struct is never required.

/// Vertical thresholds controlling agent traversal, shared across the three
/// filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxelizationConfig {
    /// Minimum clearance, in cell-height units, an agent needs above a
    /// walkable span to stand there.
    pub walkable_height: u16,
    /// Maximum vertical step, in cell-height units, an agent can climb onto.
    pub walkable_climb: u16,
}

impl VoxelizationConfig {
    pub fn new(walkable_height: u16, walkable_climb: u16) -> Self {
        Self {
            walkable_height,
            walkable_climb,
        }
    }
}

impl crate::Heightfield {
    /// Runs all three filters in the conventional order: obstacle fusion,
    /// then ledge detection, then low-clearance culling. Equivalent to
    /// calling the three filter methods directly with `config`'s fields;
    /// provided purely as a convenience for callers who don't need a custom
    /// pass order.
    pub fn apply_standard_filters(&mut self, config: VoxelizationConfig) {
        self.filter_low_hanging_walkable_obstacles(config.walkable_climb);
        self.filter_ledge_spans(config.walkable_height, config.walkable_climb);
        self.filter_walkable_low_height_spans(config.walkable_height);
    }
}

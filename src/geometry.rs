//! Minimal geometry value types.
//!
//! Points, bounding boxes and triangle/AABB overlap, built directly on
//! [`glam::Vec3A`] rather than reaching for a separate geometry crate.

use glam::Vec3A;

/// A point or vector in world space.
pub type Vec3 = Vec3A;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb3 {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Closed-interval overlap test.
    #[inline]
    pub fn intersects(&self, other: &Aabb3) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// Three triangle vertices in world space.
pub struct Triangle3;

impl Triangle3 {
    /// Computes the tight bounding box of a triangle.
    #[inline]
    pub fn bounding_box(a: Vec3, b: Vec3, c: Vec3) -> Aabb3 {
        Aabb3 {
            min: a.min(b).min(c),
            max: a.max(b).max(c),
        }
    }
}

/// Clamps an integer to `[lo, hi]`.
#[inline]
pub fn clamp_i32(value: i32, lo: i32, hi: i32) -> i32 {
    value.max(lo).min(hi)
}

/// The four cardinal neighbour offsets used by the ledge filter, in a fixed
/// but arbitrary order: west, north, east, south.
pub const DIR_OFFSETS: [(i32, i32); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

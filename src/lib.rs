//! Conservative triangle voxelization and solid-heightfield filtering.
//!
//! Takes a triangle soup and produces a sparse, column-oriented voxel field
//! (a [`Heightfield`]) whose columns list the solid y-intervals ([`Span`])
//! that intersect that column, with per-interval [`AreaType`] classification.
//! Generating any downstream representation (compact heightfield, regions,
//! contours, polygon meshes) is out of scope for this crate.
//!
//! The typical pipeline:
//!
//! ```
//! use solid_heightfield::{AreaType, Heightfield};
//! use glam::Vec3A;
//!
//! let mut field = Heightfield::new(
//!     Vec3A::new(0.0, 0.0, 0.0),
//!     Vec3A::new(1.0, 1.0, 1.0),
//!     1.0,
//!     1.0,
//! )
//! .unwrap();
//!
//! field.rasterize_triangle(
//!     Vec3A::new(0.0, 0.25, 0.0),
//!     Vec3A::new(1.0, 0.25, 0.0),
//!     Vec3A::new(0.0, 0.25, 1.0),
//!     AreaType::WALKABLE,
//! );
//!
//! assert_eq!(field.span_count(), 1);
//! let span = field.cell(0, 0).unwrap().spans()[0];
//! assert_eq!((span.min(), span.max()), (0, 1));
//!
//! // Filters are applied once the whole mesh has been rasterized.
//! field.filter_low_hanging_walkable_obstacles(1);
//! field.filter_walkable_low_height_spans(2);
//! ```

mod area;
mod cell;
mod clip;
mod config;
mod error;
mod filter;
mod geometry;
mod heightfield;
mod rasterize;
mod span;

pub use area::AreaType;
pub use cell::Cell;
pub use config::VoxelizationConfig;
pub use error::{ArgumentError, ConfigError, HeightfieldError};
pub use geometry::{Aabb3, Triangle3, Vec3};
pub use heightfield::Heightfield;
pub use span::Span;

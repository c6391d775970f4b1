//! Error taxonomy surfaced from public entry points.
//!
//! Corresponds to the config/argument/out-of-range split in the navmesh
//! toolchain this crate feeds into; modeled as small `thiserror` enums per
//! failure mode rather than a single catch-all.

use thiserror::Error;

/// Errors raised by [`crate::Heightfield`] construction and batch rasterization.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HeightfieldError {
    /// Invalid bounds or non-positive cell dimensions at construction.
    #[error("invalid heightfield configuration: {0}")]
    Config(#[from] ConfigError),

    /// Invalid arguments passed to a batch rasterization entry point.
    #[error("invalid rasterization arguments: {0}")]
    Argument(#[from] ArgumentError),

    /// A cell coordinate outside `[0, width) x [0, length)` was requested.
    #[error("cell coordinate out of range: x={x}, z={z}, width={width}, length={length}")]
    OutOfRange {
        x: u16,
        z: u16,
        width: u16,
        length: u16,
    },
}

/// Reasons a [`crate::Heightfield::new`] call can fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("heightfield min bound {min:?} is not componentwise <= max bound {max:?}")]
    InvertedBounds { min: [f32; 3], max: [f32; 3] },

    #[error("cell_size must be > 0, got {0}")]
    NonPositiveCellSize(f32),

    #[error("cell_height must be > 0, got {0}")]
    NonPositiveCellHeight(f32),

    #[error("grid dimension {dimension} ({axis}) exceeds u16::MAX; use a larger cell size or smaller bounds")]
    DimensionTooLarge { axis: &'static str, dimension: u32 },
}

/// Reasons a batch rasterization call can fail before mutating the heightfield.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgumentError {
    #[error("vertex buffer is empty")]
    EmptyVertices,

    #[error("vertex index {index} out of bounds for buffer of length {len}")]
    VertexIndexOutOfBounds { index: u32, len: usize },

    #[error(
        "vertex offset {offset} + stride {stride} * (triangle_count {triangle_count} * 3) exceeds buffer length {len}"
    )]
    StrideOutOfBounds {
        offset: usize,
        stride: usize,
        triangle_count: usize,
        len: usize,
    },

    #[error("area array length {areas_len} does not match triangle count {triangle_count}")]
    AreaCountMismatch {
        areas_len: usize,
        triangle_count: usize,
    },

    #[error("index buffer length {0} is not a multiple of 3")]
    IndexCountNotMultipleOfThree(usize),
}

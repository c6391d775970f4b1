//! [`Heightfield`]: the owning grid of [`Cell`]s plus construction and batch
//! rasterization entry points.

use crate::area::AreaType;
use crate::cell::Cell;
use crate::error::{ArgumentError, ConfigError, HeightfieldError};
use crate::geometry::{Aabb3, Vec3};

/// An axis-aligned grid of solid-span columns.
///
/// Dimensions are derived from the requested world-space bounds and cell
/// sizes: `width = ceil((max.x - min.x) / cell_size)`, `height =
/// ceil((max.y - min.y) / cell_height)`, `length = ceil((max.z - min.z) /
/// cell_size)`. The stored `aabb.max` is snapped up so that
/// `aabb.max.x == aabb.min.x + width as f32 * cell_size` (and likewise for y
/// and z).
#[derive(Debug, Clone)]
pub struct Heightfield {
    width: u16,
    height: u16,
    length: u16,
    aabb: Aabb3,
    cell_size: f32,
    cell_height: f32,
    cells: Vec<Cell>,
}

impl Heightfield {
    /// Builds a new, empty heightfield spanning `[min, max]`.
    ///
    /// # Errors
    /// Returns [`HeightfieldError::Config`] if `min` is not componentwise
    /// `<= max`, if `cell_size`/`cell_height` are not strictly positive, or
    /// if the resulting grid dimension on any axis would exceed `u16::MAX`.
    pub fn new(min: Vec3, max: Vec3, cell_size: f32, cell_height: f32) -> Result<Self, HeightfieldError> {
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Err(ConfigError::InvertedBounds {
                min: [min.x, min.y, min.z],
                max: [max.x, max.y, max.z],
            }
            .into());
        }
        if !(cell_size > 0.0) {
            return Err(ConfigError::NonPositiveCellSize(cell_size).into());
        }
        if !(cell_height > 0.0) {
            return Err(ConfigError::NonPositiveCellHeight(cell_height).into());
        }

        let width = (((max.x - min.x) / cell_size).ceil() as u32).max(1);
        let height = (((max.y - min.y) / cell_height).ceil() as u32).max(1);
        let length = (((max.z - min.z) / cell_size).ceil() as u32).max(1);

        if width > u16::MAX as u32 {
            return Err(ConfigError::DimensionTooLarge { axis: "width", dimension: width }.into());
        }
        if height > u16::MAX as u32 {
            return Err(ConfigError::DimensionTooLarge { axis: "height", dimension: height }.into());
        }
        if length > u16::MAX as u32 {
            return Err(ConfigError::DimensionTooLarge { axis: "length", dimension: length }.into());
        }

        let width = width as u16;
        let height = height as u16;
        let length = length as u16;

        let snapped_max = Vec3::new(
            min.x + width as f32 * cell_size,
            min.y + height as f32 * cell_height,
            min.z + length as f32 * cell_size,
        );

        let column_count = width as usize * length as usize;
        let cells = (0..column_count)
            .map(|_| Cell::with_capacity(height as usize))
            .collect();
        Ok(Self {
            width,
            height,
            length,
            aabb: Aabb3::new(min, snapped_max),
            cell_size,
            cell_height,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    /// Number of vertical cell slices; the upper bound for any `Span::max`.
    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn length(&self) -> u16 {
        self.length
    }

    #[inline]
    pub fn aabb(&self) -> &Aabb3 {
        &self.aabb
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn cell_height(&self) -> f32 {
        self.cell_height
    }

    /// Total number of walkable (non-[`AreaType::NONE`]) spans across every
    /// column.
    pub fn span_count(&self) -> usize {
        self.cells.iter().map(Cell::walkable_span_count).sum()
    }

    #[inline]
    fn column_index(&self, x: u16, z: u16) -> usize {
        z as usize * self.width as usize + x as usize
    }

    #[inline]
    pub(crate) fn in_bounds(&self, x: i32, z: i32) -> bool {
        x >= 0 && x < self.width as i32 && z >= 0 && z < self.length as i32
    }

    /// Returns the cell at `(x, z)`, or `None` if out of bounds.
    pub fn cell(&self, x: u16, z: u16) -> Option<&Cell> {
        if x >= self.width || z >= self.length {
            return None;
        }
        Some(&self.cells[self.column_index(x, z)])
    }

    /// Returns the cell at `(x, z)`, erroring if out of bounds.
    pub fn cell_checked(&self, x: u16, z: u16) -> Result<&Cell, HeightfieldError> {
        self.cell(x, z).ok_or(HeightfieldError::OutOfRange {
            x,
            z,
            width: self.width,
            length: self.length,
        })
    }

    pub(crate) fn cell_mut(&mut self, x: u16, z: u16) -> &mut Cell {
        let index = self.column_index(x, z);
        &mut self.cells[index]
    }

    pub(crate) fn cell_mut_at(&mut self, x: i32, z: i32) -> Option<&mut Cell> {
        if !self.in_bounds(x, z) {
            return None;
        }
        let index = self.column_index(x as u16, z as u16);
        Some(&mut self.cells[index])
    }

    pub(crate) fn cell_at(&self, x: i32, z: i32) -> Option<&Cell> {
        if !self.in_bounds(x, z) {
            return None;
        }
        Some(&self.cells[self.column_index(x as u16, z as u16)])
    }

    /// Iterates over every cell in row-major order, z outermost.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Rasterizes an indexed triangle list, one [`AreaType`] per triangle.
    ///
    /// # Errors
    /// Returns [`HeightfieldError::Argument`] if `indices.len()` is not a
    /// multiple of 3, if any index is out of bounds for `vertices`, or if
    /// `areas.len() * 3 != indices.len()`. No mutation happens before all
    /// arguments are validated.
    pub fn rasterize_indexed(
        &mut self,
        vertices: &[Vec3],
        indices: &[u32],
        areas: &[AreaType],
    ) -> Result<(), HeightfieldError> {
        if vertices.is_empty() {
            return Err(ArgumentError::EmptyVertices.into());
        }
        if indices.len() % 3 != 0 {
            return Err(ArgumentError::IndexCountNotMultipleOfThree(indices.len()).into());
        }
        let triangle_count = indices.len() / 3;
        if areas.len() != triangle_count {
            return Err(ArgumentError::AreaCountMismatch {
                areas_len: areas.len(),
                triangle_count,
            }
            .into());
        }
        for &index in indices {
            if index as usize >= vertices.len() {
                return Err(ArgumentError::VertexIndexOutOfBounds {
                    index,
                    len: vertices.len(),
                }
                .into());
            }
        }

        for (tri_index, area) in areas.iter().enumerate() {
            let base = tri_index * 3;
            let a = vertices[indices[base] as usize];
            let b = vertices[indices[base + 1] as usize];
            let c = vertices[indices[base + 2] as usize];
            self.rasterize_triangle(a, b, c, *area);
        }
        Ok(())
    }

    /// Rasterizes a flat, non-indexed triangle array (every 3 consecutive
    /// vertices form a triangle), one [`AreaType`] per triangle.
    pub fn rasterize_triangles(
        &mut self,
        vertices: &[Vec3],
        areas: &[AreaType],
    ) -> Result<(), HeightfieldError> {
        self.rasterize_triangles_with_stride(vertices, 0, 3, areas)
    }

    /// Like [`Heightfield::rasterize_triangles`], but reads triangle `i`'s
    /// three vertices from `offset + i * stride + {0, 1, 2}`, so interleaved
    /// vertex buffers can be rasterized without copying. `stride` must be
    /// `>= 3`.
    pub fn rasterize_triangles_with_stride(
        &mut self,
        vertices: &[Vec3],
        offset: usize,
        stride: usize,
        areas: &[AreaType],
    ) -> Result<(), HeightfieldError> {
        if vertices.is_empty() {
            return Err(ArgumentError::EmptyVertices.into());
        }
        if stride < 3 {
            return Err(ArgumentError::StrideOutOfBounds {
                offset,
                stride,
                triangle_count: areas.len(),
                len: vertices.len(),
            }
            .into());
        }
        let triangle_count = areas.len();
        let required = offset + stride.saturating_mul(triangle_count.saturating_sub(1)) + 3;
        if triangle_count > 0 && required > vertices.len() {
            return Err(ArgumentError::StrideOutOfBounds {
                offset,
                stride,
                triangle_count,
                len: vertices.len(),
            }
            .into());
        }

        for (tri_index, area) in areas.iter().enumerate() {
            let base = offset + tri_index * stride;
            let a = vertices[base];
            let b = vertices[base + 1];
            let c = vertices[base + 2];
            self.rasterize_triangle(a, b, c, *area);
        }
        Ok(())
    }
}

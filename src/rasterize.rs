//! Conservative triangle voxelization.
//!
//! Computes the triangle's footprint over the grid, then double-clips it
//! (row, then column) so each cell only ever has to intersect a polygon
//! already bounded to its own XZ footprint.

use tracing::warn;

use crate::area::AreaType;
use crate::clip::{clip_half_plane, Axis, ClipPoly};
use crate::geometry::{clamp_i32, Triangle3, Vec3};
use crate::heightfield::Heightfield;
use crate::span::Span;

impl Heightfield {
    /// Voxelizes one triangle, conservatively, into this heightfield.
    ///
    /// For every column whose XZ footprint intersects the triangle's
    /// projection, the y-interval the triangle fragment occupies in that
    /// column is computed and inserted via [`crate::cell::Cell::add_span`].
    /// Triangles (or parts of triangles) outside the heightfield's bounds
    /// are silently skipped; this is the normal outcome of the algorithm; it
    /// never a partial-mutation error.
    pub fn rasterize_triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, area: AreaType) {
        let tri_aabb = Triangle3::bounding_box(a, b, c);
        if !self.aabb().intersects(&tri_aabb) {
            return;
        }

        let min = self.aabb().min;
        let cs = self.cell_size();
        let ch = self.cell_height();
        let w = self.width() as i32;
        let l = self.length() as i32;
        let h = self.height() as i32;
        let field_top_y = h as f32 * ch;

        let x0 = clamp_i32(((tri_aabb.min.x - min.x) / cs).floor() as i32, 0, w - 1);
        let x1 = clamp_i32(((tri_aabb.max.x - min.x) / cs).floor() as i32, 0, w - 1);
        let z0 = clamp_i32(((tri_aabb.min.z - min.z) / cs).floor() as i32, 0, l - 1);
        let z1 = clamp_i32(((tri_aabb.max.z - min.z) / cs).floor() as i32, 0, l - 1);

        let tri = ClipPoly::from_triangle(a, b, c);

        for z in z0..=z1 {
            let z_lo = min.z + z as f32 * cs;
            let z_hi = z_lo + cs;

            let clipped_lo = clip_half_plane(&tri, Axis::Z, z_lo, 1.0);
            if clipped_lo.len < 3 {
                continue;
            }
            let row = clip_half_plane(&clipped_lo, Axis::Z, z_hi, -1.0);
            if row.len < 3 {
                continue;
            }

            for x in x0..=x1 {
                let x_lo = min.x + x as f32 * cs;
                let x_hi = x_lo + cs;

                let clipped_lo = clip_half_plane(&row, Axis::X, x_lo, 1.0);
                if clipped_lo.len < 3 {
                    continue;
                }
                let column = clip_half_plane(&clipped_lo, Axis::X, x_hi, -1.0);
                if column.len < 3 {
                    continue;
                }

                let verts = column.as_slice();
                let mut y_min = verts[0].y;
                let mut y_max = verts[0].y;
                for v in &verts[1..] {
                    y_min = y_min.min(v.y);
                    y_max = y_max.max(v.y);
                }

                y_min -= min.y;
                y_max -= min.y;
                if y_max < 0.0 || y_min > field_top_y {
                    continue;
                }
                y_min = y_min.max(0.0);
                y_max = y_max.min(field_top_y);

                let span_min = clamp_i32((y_min / ch).floor() as i32, 0, h) as u16;
                let span_max_floor = clamp_i32((y_max / ch).ceil() as i32, 0, h);
                let span_max = span_max_floor.max(span_min as i32 + 1);
                if span_max > h {
                    // Quantization pushed the ceiling past the field top with
                    // no room left below it: a genuine zero-thickness span.
                    warn!(
                        target: "heightfield::rasterize",
                        x, z, span_min, "dropping zero-thickness span from rasterization"
                    );
                    continue;
                }
                let span_max = span_max as u16;

                self.cell_mut(x as u16, z as u16)
                    .add_span(Span::new(span_min, span_max, area));
            }
        }
    }
}

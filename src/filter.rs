//! The three mutating post-rasterization filters.
//!
//! Each filter borrows the [`Heightfield`] mutably and, for the ledge
//! filter, reads 4-neighbour columns read-only while mutating the current
//! one -- no rasterization may be in progress while a filter runs.

use crate::area::AreaType;
use crate::cell::Cell;
use crate::geometry::DIR_OFFSETS;
use crate::heightfield::Heightfield;

impl Heightfield {
    /// Fuses small ledges onto the walkable surface below them.
    ///
    /// Walking each column bottom-to-top, a non-walkable span is relabeled
    /// walkable (copying the area tag of the span below) when its top sits
    /// within `walkable_climb` of the previous span's top and the previous
    /// span was itself walkable. This removes the small steps conservative
    /// rasterization tends to leave on stair-like geometry.
    ///
    /// May be reversed by a later call to [`Heightfield::filter_ledge_spans`]
    /// run over the relabeled spans; callers decide the pass order.
    pub fn filter_low_hanging_walkable_obstacles(&mut self, walkable_climb: u16) {
        for x in 0..self.width() {
            for z in 0..self.length() {
                let cell = self.cell_mut(x, z);
                let mut prev_area = AreaType::NONE;
                let mut prev_max: u16 = 0;
                let mut prev_walkable = false;

                for span in cell.spans_mut() {
                    if span.area() == AreaType::NONE
                        && prev_walkable
                        && span.max().abs_diff(prev_max) < walkable_climb
                    {
                        span.set_area(prev_area);
                    }
                    prev_area = span.area();
                    prev_max = span.max();
                    prev_walkable = span.is_walkable();
                }
            }
        }
    }

    /// Marks a span unwalkable when the clearance to the span immediately
    /// above it is at most `walkable_height`. The topmost span in a column
    /// is never modified (infinite headroom is assumed above it).
    pub fn filter_walkable_low_height_spans(&mut self, walkable_height: u16) {
        for x in 0..self.width() {
            for z in 0..self.length() {
                let cell = self.cell_mut(x, z);
                let spans = cell.spans_mut();
                for i in 0..spans.len().saturating_sub(1) {
                    let gap = spans[i + 1].min() - spans[i].max();
                    if gap <= walkable_height {
                        spans[i].set_area(AreaType::NONE);
                    }
                }
            }
        }
    }

    /// Marks a walkable span unwalkable when it sits on a ledge: a step down
    /// to a neighbour steeper than `walkable_climb`, or a slope whose
    /// accessible neighbour floors span a range wider than `walkable_climb`.
    ///
    /// Out-of-bounds neighbours (the edge of the field) count as a drop of
    /// magnitude at least `walkable_climb + 1`, via the signed
    /// `-walkable_climb - bottom` convention described in the module's
    /// design notes; this must not be changed, as it is what makes field-
    /// edge cells correctly read as cliffs.
    pub fn filter_ledge_spans(&mut self, walkable_height: u16, walkable_climb: u16) {
        let climb = walkable_climb as i32;
        let height = walkable_height as i32;

        for z in 0..self.length() as i32 {
            for x in 0..self.width() as i32 {
                let span_count = self.cell_at(x, z).map(Cell::len).unwrap_or(0);
                for i in 0..span_count {
                    let Some(cell) = self.cell_at(x, z) else {
                        continue;
                    };
                    let spans = cell.spans();
                    if spans[i].area() == AreaType::NONE {
                        continue;
                    }
                    let bottom = spans[i].max() as i32;
                    let top = spans.get(i + 1).map(|s| s.min() as i32).unwrap_or(i32::MAX);

                    let mut min_height = i32::MAX;
                    let mut acc_min = bottom;
                    let mut acc_max = bottom;

                    for (dx, dz) in DIR_OFFSETS {
                        let nx = x + dx;
                        let nz = z + dz;
                        if !self.in_bounds(nx, nz) {
                            min_height = min_height.min(-climb - bottom);
                            continue;
                        }

                        let neighbour = self.cell_at(nx, nz).expect("checked in_bounds above");
                        let neighbour_spans = neighbour.spans();

                        // Virtual floor at `-walkable_climb`, ceiling at the
                        // first real neighbour span's `min` (or +inf if the
                        // column is empty), followed by every real span.
                        let virtual_top = neighbour_spans
                            .first()
                            .map(|s| s.min() as i32)
                            .unwrap_or(i32::MAX);
                        let floors = std::iter::once((-climb, virtual_top)).chain(
                            neighbour_spans
                                .iter()
                                .enumerate()
                                .map(|(j, s)| {
                                    let n_top = neighbour_spans
                                        .get(j + 1)
                                        .map(|next| next.min() as i32)
                                        .unwrap_or(i32::MAX);
                                    (s.max() as i32, n_top)
                                }),
                        );

                        for (n_bottom, n_top) in floors {
                            let clearance = top.min(n_top) - bottom.max(n_bottom);
                            if clearance > height {
                                min_height = min_height.min(n_bottom - bottom);
                                if (n_bottom - bottom).unsigned_abs() as i32 <= climb {
                                    acc_min = acc_min.min(n_bottom);
                                    acc_max = acc_max.max(n_bottom);
                                }
                            }
                        }
                    }

                    let unwalkable = min_height < -climb || acc_max - acc_min > climb;
                    if unwalkable {
                        if let Some(cell) = self.cell_mut_at(x, z) {
                            cell.spans_mut()[i].set_area(AreaType::NONE);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;
    use glam::Vec3A;

    fn field(width: u16, length: u16) -> Heightfield {
        Heightfield::new(
            Vec3A::new(0.0, 0.0, 0.0),
            Vec3A::new(width as f32, 10.0, length as f32),
            1.0,
            1.0,
        )
        .unwrap()
    }

    #[test]
    fn low_hanging_obstacle_relabel() {
        let mut f = field(1, 1);
        {
            let cell = f.cell_mut(0, 0);
            cell.add_span(Span::new(0, 5, AreaType::WALKABLE));
            cell.add_span(Span::new(6, 7, AreaType::NONE));
        }

        f.filter_low_hanging_walkable_obstacles(3);

        let spans = f.cell(0, 0).unwrap().spans();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].area(), AreaType::WALKABLE);
    }

    #[test]
    fn low_hanging_obstacle_stays_unwalkable_past_the_climb_threshold() {
        let mut f = field(1, 1);
        {
            let cell = f.cell_mut(0, 0);
            cell.add_span(Span::new(0, 5, AreaType::WALKABLE));
            cell.add_span(Span::new(9, 10, AreaType::NONE));
        }

        f.filter_low_hanging_walkable_obstacles(3);

        let spans = f.cell(0, 0).unwrap().spans();
        assert_eq!(spans[1].area(), AreaType::NONE);
    }

    #[test]
    fn low_height_cull() {
        let mut f = field(1, 1);
        {
            let cell = f.cell_mut(0, 0);
            cell.add_span(Span::new(0, 2, AreaType::WALKABLE));
            cell.add_span(Span::new(3, 5, AreaType::WALKABLE));
        }

        f.filter_walkable_low_height_spans(1);

        let spans = f.cell(0, 0).unwrap().spans();
        assert_eq!(spans[0].area(), AreaType::NONE, "clearance of 1 is insufficient");
        assert_eq!(spans[1].area(), AreaType::WALKABLE, "topmost span is never culled");
    }

    #[test]
    fn low_height_keeps_span_when_clearance_exceeds_threshold() {
        let mut f = field(1, 1);
        {
            let cell = f.cell_mut(0, 0);
            cell.add_span(Span::new(0, 2, AreaType::WALKABLE));
            cell.add_span(Span::new(5, 7, AreaType::WALKABLE));
        }

        f.filter_walkable_low_height_spans(2);

        let spans = f.cell(0, 0).unwrap().spans();
        assert_eq!(spans[0].area(), AreaType::WALKABLE);
    }

    #[test]
    fn ledge_detection_at_field_edge() {
        let mut f = field(2, 1);
        f.cell_mut(0, 0).add_span(Span::new(0, 4, AreaType::WALKABLE));
        // (1, 0) stays empty: the only neighbour of (0, 0) is out of bounds
        // on three sides and empty on the fourth, so it reads as a cliff.

        f.filter_ledge_spans(2, 1);

        let spans = f.cell(0, 0).unwrap().spans();
        assert_eq!(spans[0].area(), AreaType::NONE);
    }

    #[test]
    fn ledge_detection_keeps_span_next_to_a_matching_floor() {
        // 3x3 field so the centre cell's four neighbours are all in bounds.
        let mut f = field(3, 3);
        for x in 0..3 {
            for z in 0..3 {
                f.cell_mut(x, z).add_span(Span::new(0, 4, AreaType::WALKABLE));
            }
        }

        f.filter_ledge_spans(2, 1);

        let spans = f.cell(1, 1).unwrap().spans();
        assert_eq!(spans[0].area(), AreaType::WALKABLE);
    }
}

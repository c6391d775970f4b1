//! [`Cell`]: the ordered span list for one `(x, z)` column.

use crate::span::Span;

/// One column of a [`crate::Heightfield`]: an ordered, non-overlapping list
/// of solid [`Span`]s.
///
/// Stored as a flat `Vec<Span>` rather than a slotmap-backed linked list,
/// because filters walk every column sequentially and a `Vec` keeps that
/// scan cache-friendly.
#[derive(Debug, Clone, Default)]
pub struct Cell {
    spans: Vec<Span>,
}

impl Cell {
    pub fn new() -> Self {
        Self { spans: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            spans: Vec::with_capacity(capacity),
        }
    }

    /// Spans in ascending `min` order, pairwise non-overlapping.
    #[inline]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    #[inline]
    pub fn spans_mut(&mut self) -> &mut [Span] {
        &mut self.spans
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Number of spans with a walkable (non-[`crate::AreaType::NONE`]) area.
    pub fn walkable_span_count(&self) -> usize {
        self.spans.iter().filter(|s| s.is_walkable()).count()
    }

    /// Inserts `span`, merging it with every existing span it overlaps or
    /// touches (`s.min <= t.max && t.min <= s.max`).
    ///
    /// The merged extent is always the union of the two ranges. The merged
    /// area is whichever of the two contributes the *top* of the union:
    /// `s.area` if `s.max >= t.max` and `priority(s.area) >= priority(t.area)`,
    /// otherwise `t.area`. A run of several touching/overlapping existing
    /// spans is folded left-to-right into a single accumulator before being
    /// spliced back in, so the whole insertion stays `O(len())`.
    pub fn add_span(&mut self, span: Span) {
        // Find the first existing span that could possibly touch `span`
        // from below: the first one whose `max` reaches at least `span.min`.
        let mut start = 0;
        while start < self.spans.len() && self.spans[start].max() < span.min() {
            start += 1;
        }

        if start >= self.spans.len() || self.spans[start].min() > span.max() {
            // No overlap/touch with anything: plain sorted insertion.
            self.spans.insert(start, span);
            return;
        }

        // Absorb every consecutive span starting at `start` that overlaps or
        // touches the growing accumulator.
        let mut acc = span;
        let mut end = start;
        while end < self.spans.len() && self.spans[end].min() <= acc.max() {
            acc = merge_one(acc, self.spans[end]);
            end += 1;
        }

        self.spans.splice(start..end, std::iter::once(acc));
    }
}

/// Merges `acc` (the running accumulator, acting as "the inserted span" for
/// tie-breaking purposes) with one existing span `t`.
fn merge_one(acc: Span, t: Span) -> Span {
    let min = acc.min().min(t.min());
    let max = acc.max().max(t.max());
    let area = if acc.max() >= t.max() && acc.area() >= t.area() {
        acc.area()
    } else {
        t.area()
    };
    Span::new(min, max, area)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::area::AreaType;

    fn span(min: u16, max: u16, area: u8) -> Span {
        Span::new(min, max, AreaType(area))
    }

    #[test]
    fn insert_into_empty_cell() {
        let mut cell = Cell::new();
        cell.add_span(span(1, 3, 1));
        assert_eq!(cell.spans(), &[span(1, 3, 1)]);
    }

    #[test]
    fn insert_disjoint_spans_stay_sorted() {
        let mut cell = Cell::new();
        cell.add_span(span(5, 7, 1));
        cell.add_span(span(1, 3, 1));
        cell.add_span(span(10, 12, 1));
        assert_eq!(cell.spans(), &[span(1, 3, 1), span(5, 7, 1), span(10, 12, 1)]);
    }

    #[test]
    fn touching_spans_merge() {
        let mut cell = Cell::new();
        cell.add_span(span(0, 2, 1));
        cell.add_span(span(2, 4, 1));
        assert_eq!(cell.spans(), &[span(0, 4, 1)]);
    }

    #[test]
    fn overlapping_spans_merge_and_extend() {
        let mut cell = Cell::new();
        cell.add_span(span(0, 4, 2));
        cell.add_span(span(3, 6, 2));
        assert_eq!(cell.spans(), &[span(0, 6, 2)]);
    }

    #[test]
    fn higher_priority_area_wins_at_the_top() {
        let mut cell = Cell::new();
        cell.add_span(span(0, 4, 1));
        cell.add_span(span(0, 4, 5));
        assert_eq!(cell.spans(), &[span(0, 4, 5)]);
    }

    #[test]
    fn merge_area_needs_both_taller_extent_and_higher_priority() {
        // The inserted span reaches higher (max 6 > 4) but has lower
        // priority (1 < 9), so the existing span's area wins the merge.
        let mut cell = Cell::new();
        cell.add_span(span(0, 4, 9));
        cell.add_span(span(0, 6, 1));
        assert_eq!(cell.spans(), &[span(0, 6, 9)]);
    }

    #[test]
    fn merge_area_wins_when_inserted_span_is_taller_and_higher_priority() {
        let mut cell = Cell::new();
        cell.add_span(span(0, 4, 1));
        cell.add_span(span(0, 6, 9));
        assert_eq!(cell.spans(), &[span(0, 6, 9)]);
    }

    #[test]
    fn run_of_several_spans_merges_into_one() {
        let mut cell = Cell::new();
        cell.add_span(span(0, 2, 1));
        cell.add_span(span(4, 6, 1));
        cell.add_span(span(8, 10, 1));
        // Bridges all three. The merge rule is applied pairwise, left to
        // right: the final area is decided by the last pairing (against
        // `(8, 10, 1)`), whose taller extent (10 > the accumulator's 9) but
        // lower priority (1 < 3) makes it win that last comparison.
        cell.add_span(span(1, 9, 3));
        assert_eq!(cell.spans(), &[span(0, 10, 1)]);
    }

    #[test]
    fn inserting_same_span_twice_is_stable() {
        let mut cell = Cell::new();
        let s = span(2, 5, 1);
        cell.add_span(s);
        cell.add_span(s);
        assert_eq!(cell.spans(), &[s]);
    }
}

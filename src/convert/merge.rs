//! Run-length spans of equal adjacent labels.

/// A run of equal adjacent values: `len` values starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    /// Whether the span covers more than one cell and so becomes a merge.
    #[inline]
    pub fn is_merge(&self) -> bool {
        self.len > 1
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Split `values` into maximal runs of equal adjacent values.
///
/// ```rust
/// use deckframe::convert::merge::{Span, runs};
///
/// let spans = runs(&["A", "A", "B", "B", "B", "C"]);
/// assert_eq!(spans, [
///     Span { start: 0, len: 2 },
///     Span { start: 2, len: 3 },
///     Span { start: 5, len: 1 },
/// ]);
/// ```
pub fn runs<T: PartialEq>(values: &[T]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut start = 0;
    for i in 1..=values.len() {
        if i == values.len() || values[i] != values[start] {
            spans.push(Span {
                start,
                len: i - start,
            });
            start = i;
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_edge_cases() {
        assert!(runs::<u8>(&[]).is_empty());
        assert_eq!(runs(&[7]), [Span { start: 0, len: 1 }]);
        assert_eq!(runs(&[1, 1, 1]), [Span { start: 0, len: 3 }]);
        // a span ending on the last value closes at the boundary
        assert_eq!(
            runs(&["x", "y", "y"]),
            [Span { start: 0, len: 1 }, Span { start: 1, len: 2 }]
        );
        // equal values separated by another value are separate spans
        assert_eq!(runs(&[1, 2, 1]).len(), 3);
    }

    #[test]
    fn test_is_merge() {
        let spans = runs(&["A", "A", "B", "B", "B", "C"]);
        let merges: Vec<bool> = spans.iter().map(Span::is_merge).collect();
        assert_eq!(merges, [true, true, false]);
        assert_eq!(spans[1].end(), 5);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn prop_spans_tile_the_values(values in prop::collection::vec(0u8..4, 0..40)) {
                let spans = runs(&values);

                // spans are contiguous and cover every value exactly once
                let mut next = 0;
                for span in &spans {
                    prop_assert_eq!(span.start, next);
                    prop_assert!(span.len >= 1);
                    next = span.end();
                }
                prop_assert_eq!(next, values.len());

                for span in &spans {
                    let run = &values[span.start..span.end()];
                    prop_assert!(run.iter().all(|v| *v == run[0]));
                }
                // runs are maximal
                for pair in spans.windows(2) {
                    prop_assert_ne!(values[pair[0].start], values[pair[1].start]);
                }
            }
        }
    }
}

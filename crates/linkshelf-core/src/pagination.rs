use std::ops::Range;

/// Computes the window `[start, end)` of a zero-based page inside a
/// collection of `len` items.
///
/// Both bounds are clamped to `len`, so pages past the end of the
/// collection yield an empty window. A `page_size` of zero always yields
/// an empty window.
pub fn slice_paginate(page_index: usize, page_size: usize, len: usize) -> Range<usize> {
    let start = page_index.saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginates_within_bounds() {
        assert_eq!(slice_paginate(0, 0, 10), 0..0);
        assert_eq!(slice_paginate(0, 2, 10), 0..2);
        assert_eq!(slice_paginate(2, 2, 10), 4..6);
        assert_eq!(slice_paginate(4, 2, 10), 8..10);
    }

    #[test]
    fn clamps_past_the_end() {
        assert_eq!(slice_paginate(5, 2, 10), 10..10);
        assert_eq!(slice_paginate(6, 2, 10), 10..10);
        assert_eq!(slice_paginate(1, 10, 11), 10..11);
    }

    #[test]
    fn empty_collection() {
        assert_eq!(slice_paginate(0, 10, 0), 0..0);
        assert_eq!(slice_paginate(3, 10, 0), 0..0);
    }

    #[test]
    fn does_not_overflow() {
        assert_eq!(slice_paginate(usize::MAX, usize::MAX, 5), 5..5);
        assert_eq!(slice_paginate(0, usize::MAX, 5), 0..5);
    }
}

//! Pagination window computation
//!
//! Computes the bounded set of page-number buttons rendered around the
//! current page, independent of any UI framework. Callers use the gap flags
//! to decide whether a leading `1 …` or trailing `… N` affordance is needed.

use serde::{Deserialize, Serialize};

/// Default number of page buttons shown around the current page.
pub const DEFAULT_WINDOW_SIZE: u32 = 5;

/// The visible slice of page numbers plus the boundary affordances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    /// 1-based page numbers to render, in order.
    pub pages: Vec<u32>,
    /// True when a "first page" button with an ellipsis should precede the
    /// window (the window starts after page 2).
    pub leading_gap: bool,
    /// True when an ellipsis and a "last page" button should follow the
    /// window (the window ends before the second-to-last page).
    pub trailing_gap: bool,
}

/// Build the pagination window for `current_page` of `total_pages`.
///
/// Inputs are defensively clamped: `total_pages` is floored at 1 and
/// `current_page` clamped into `[1, total_pages]`. When `total_pages` exceeds
/// the window size the window is centered on the current page and clamped so
/// it never runs off either end, always holding exactly `window_size`
/// entries.
pub fn build(current_page: u32, total_pages: u32, window_size: u32) -> PageWindow {
    let total_pages = total_pages.max(1);
    let current_page = current_page.clamp(1, total_pages);
    let window_size = window_size.max(1);

    if total_pages <= window_size {
        return PageWindow {
            pages: (1..=total_pages).collect(),
            leading_gap: false,
            trailing_gap: false,
        };
    }

    let start = current_page.saturating_sub(window_size / 2).max(1);
    let end = (start + window_size - 1).min(total_pages);
    // Re-derive the start so the window stays full when clamped at the end.
    let start = end.saturating_sub(window_size - 1).max(1);

    let pages: Vec<u32> = (start..=end).collect();
    PageWindow {
        leading_gap: start > 2,
        trailing_gap: end < total_pages - 1,
        pages,
    }
}

/// [`build`] with the default window size of 5.
pub fn build_default(current_page: u32, total_pages: u32) -> PageWindow {
    build(current_page, total_pages, DEFAULT_WINDOW_SIZE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_total_returns_every_page() {
        for total in 1..=5 {
            for current in 1..=total {
                let window = build_default(current, total);
                let expected: Vec<u32> = (1..=total).collect();
                assert_eq!(window.pages, expected, "total={total} current={current}");
                assert!(!window.leading_gap);
                assert!(!window.trailing_gap);
            }
        }
    }

    #[test]
    fn test_large_total_always_yields_full_window() {
        for total in 6..=40 {
            for current in 1..=total {
                let window = build_default(current, total);
                assert_eq!(window.pages.len(), 5, "total={total} current={current}");
                assert!(window.pages.contains(&current));
                assert!(window.pages.iter().all(|&p| p >= 1 && p <= total));
            }
        }
    }

    #[test]
    fn test_window_is_centered_mid_range() {
        let window = build_default(10, 20);
        assert_eq!(window.pages, vec![8, 9, 10, 11, 12]);
        assert!(window.leading_gap);
        assert!(window.trailing_gap);
    }

    #[test]
    fn test_window_clamps_at_the_start() {
        let window = build_default(1, 20);
        assert_eq!(window.pages, vec![1, 2, 3, 4, 5]);
        assert!(!window.leading_gap);
        assert!(window.trailing_gap);
    }

    #[test]
    fn test_window_clamps_at_the_end() {
        let window = build_default(20, 20);
        assert_eq!(window.pages, vec![16, 17, 18, 19, 20]);
        assert!(window.leading_gap);
        assert!(!window.trailing_gap);
    }

    #[test]
    fn test_no_leading_gap_when_window_starts_at_two() {
        // Window [2..6] touches page 2, so a bare "1" button suffices.
        let window = build_default(4, 20);
        assert_eq!(window.pages, vec![2, 3, 4, 5, 6]);
        assert!(!window.leading_gap);
    }

    #[test]
    fn test_no_trailing_gap_when_window_ends_next_to_last() {
        let window = build_default(17, 20);
        assert_eq!(window.pages, vec![15, 16, 17, 18, 19]);
        assert!(!window.trailing_gap);
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        let window = build_default(99, 10);
        assert_eq!(window.pages, vec![6, 7, 8, 9, 10]);

        let window = build_default(0, 10);
        assert_eq!(window.pages, vec![1, 2, 3, 4, 5]);

        let window = build_default(5, 0);
        assert_eq!(window.pages, vec![1]);
    }
}

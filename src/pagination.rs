//! Page-navigation helpers for the presentation layer.

use std::fmt;

use crate::models::PAGE_SIZE;

/// How many neighbours of the current page are always shown.
const WINDOW_DELTA: u32 = 2;

/// One slot in a pagination bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(u32),
    Ellipsis,
}

impl fmt::Display for PageMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageMarker::Page(n) => write!(f, "{n}"),
            PageMarker::Ellipsis => f.write_str("..."),
        }
    }
}

/// Visible page markers around `current`.
///
/// The first and last pages are always present, with up to two neighbours on
/// each side of `current`; gaps are collapsed into an ellipsis. Returns an
/// empty list when there is at most one page.
pub fn visible_pages(current: u32, total_pages: u32) -> Vec<PageMarker> {
    if total_pages <= 1 {
        return Vec::new();
    }
    let current = current.clamp(1, total_pages);
    let lo = current.saturating_sub(WINDOW_DELTA).max(2);
    let hi = (current + WINDOW_DELTA).min(total_pages - 1);

    let mut markers = vec![PageMarker::Page(1)];
    if lo > 2 {
        markers.push(PageMarker::Ellipsis);
    }
    markers.extend((lo..=hi).map(PageMarker::Page));
    if hi < total_pages - 1 {
        markers.push(PageMarker::Ellipsis);
    }
    markers.push(PageMarker::Page(total_pages));
    markers
}

/// 1-based `(first, last)` article positions shown on `page`.
pub fn showing_range(page: u32, total_results: u32) -> (u32, u32) {
    let page = page.max(1);
    let start = (page - 1).saturating_mul(PAGE_SIZE).saturating_add(1);
    let end = page.saturating_mul(PAGE_SIZE).min(total_results);
    (start, end)
}

//! UI page / API page translation
//!
//! URLs and page buttons are 1-based; the backend is 0-based. This module is
//! the single point where the convention crosses.

/// Convert a 1-based UI page number to a 0-based API page index. Values below
/// 1 clamp to 0.
pub fn to_api_page(ui_page: u32) -> u32 {
    ui_page.saturating_sub(1)
}

/// Convert a 0-based API page index to a 1-based UI page number.
pub fn to_ui_page(api_page: u32) -> u32 {
    api_page + 1
}

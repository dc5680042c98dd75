// src/utils/pagination.rs

/// Most page buttons shown at once.
pub const PAGE_WINDOW: u32 = 5;

/// Page numbers to show as buttons, centred on `current` where possible.
///
/// `page_window(12, 1)` is `1..=5`, `page_window(12, 10)` is `8..=12`.
pub fn page_window(total: u32, current: u32) -> Vec<u32> {
    if total <= PAGE_WINDOW {
        return (1..=total).collect();
    }
    let half = PAGE_WINDOW / 2;
    let current = current.clamp(1, total);
    let start = current
        .saturating_sub(half)
        .max(1)
        .min(total - PAGE_WINDOW + 1);
    (start..start + PAGE_WINDOW).collect()
}

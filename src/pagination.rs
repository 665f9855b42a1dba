//! Derived pagination over a filtered view. Pure functions; the page index
//! itself lives on the model and is reset to 0 whenever a filter changes.

/// Number of pages needed for `total` items, `ceil(total / page_size)`.
#[must_use]
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// The sub-sequence `[page * size, page * size + size)` clipped to bounds.
/// An out-of-range page yields an empty slice rather than a panic.
#[must_use]
pub fn page_slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    let start = page.saturating_mul(page_size).min(items.len());
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Keeps `page` within the valid range for `total` items, so the user never
/// lands on an out-of-range page after the collection shrinks.
#[must_use]
pub fn clamp_page(page: usize, total: usize, page_size: usize) -> usize {
    page.min(page_count(total, page_size).saturating_sub(1))
}

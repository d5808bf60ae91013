//! Page arithmetic and path conventions for the article listing.
//!
//! Pages are fixed-size, 1-indexed slices of the date-sorted article
//! list. Page 1 lives at the bare collection path; pages 2 and up get a
//! numeric suffix. That asymmetry keeps the most-linked first page's URL
//! clean and must be preserved exactly.

/// Number of pages needed for `total_items` at `page_size` per page.
/// Zero items means zero pages.
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_items.div_ceil(page_size)
}

/// The items on 1-indexed page `page_number`, or `None` when the page
/// number is out of `[1, total_pages]`. Callers surface `None` as a
/// not-found, never a failure.
pub fn page_slice<T>(items: &[T], page_number: usize, page_size: usize) -> Option<&[T]> {
    if page_number < 1 || page_number > total_pages(items.len(), page_size) {
        return None;
    }

    let start = (page_number - 1) * page_size;
    let end = (start + page_size).min(items.len());
    Some(&items[start..end])
}

/// A route token is a page reference iff it is all digits. Anything else
/// is an article-slug lookup. Numeric slugs cannot occur: date-derived
/// slugs always contain hyphens.
pub fn is_page_number(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Route path for a listing page: the bare base for page 1,
/// `{base}/{n}` for pages 2 and up.
pub fn page_path(base: &str, page_number: usize) -> String {
    let base = format!("/{}", base.trim_matches('/'));
    if page_number <= 1 {
        base
    } else {
        format!("{}/{}", base, page_number)
    }
}

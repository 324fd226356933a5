/// Slice `seq` into its `page`-th window (1-based) of `page_size` rows.
///
/// Returns the window and the total page count, `ceil(len / page_size)`.
/// Out-of-range pages (including page 0) yield an empty slice rather than
/// an error; an empty sequence reports zero pages.
pub fn paginate<T>(seq: &[T], page: usize, page_size: usize) -> (&[T], usize) {
    if page_size == 0 {
        return (&seq[..0], 0);
    }

    let total_pages = seq.len().div_ceil(page_size);
    if page == 0 {
        return (&seq[..0], total_pages);
    }

    let start = (page - 1) * page_size;
    if start >= seq.len() {
        return (&seq[..0], total_pages);
    }

    let end = (start + page_size).min(seq.len());
    (&seq[start..end], total_pages)
}

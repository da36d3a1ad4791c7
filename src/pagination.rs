//! Fixed-size pagination over a ranked list. Pages are 1-indexed and
//! out-of-range requests clamp to the nearest valid page instead of erroring.

pub fn total_pages(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    len.div_ceil(page_size)
}

fn clamp_page(page: usize, len: usize, page_size: usize) -> usize {
    let total = total_pages(len, page_size);
    if total == 0 {
        return 1;
    }
    page.clamp(1, total)
}

/// The slice of `list` visible on `page`. An empty list (or a zero page
/// size) yields an empty slice.
pub fn paginate<T>(list: &[T], page_size: usize, page: usize) -> &[T] {
    if list.is_empty() || page_size == 0 {
        return &[];
    }
    let page = clamp_page(page, list.len(), page_size);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(list.len());
    &list[start..end]
}

/// Page cursor owned by a view over a ranked list. The cursor resets to the
/// first page whenever the underlying list is replaced.
#[derive(Debug, Clone)]
pub struct Pager {
    page_size: usize,
    current_page: usize,
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Pager {
            page_size,
            current_page: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// The underlying ranked list changed; start over from page one.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Move to `page`, clamped against the given list length.
    pub fn go_to(&mut self, page: usize, list_len: usize) {
        self.current_page = clamp_page(page, list_len, self.page_size);
    }

    pub fn view<'a, T>(&self, list: &'a [T]) -> &'a [T] {
        paginate(list, self.page_size, self.current_page)
    }

    pub fn total_pages(&self, list_len: usize) -> usize {
        total_pages(list_len, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_partial_page_has_remainder() {
        let items: Vec<u32> = (0..7).collect();
        assert_eq!(paginate(&items, 3, 3), &[6]);
        assert_eq!(total_pages(7, 3), 3);
    }

    #[test]
    fn out_of_range_page_clamps_to_last() {
        let items: Vec<u32> = (0..7).collect();
        assert_eq!(paginate(&items, 3, 99), &[6]);
        assert_eq!(paginate(&items, 3, 0), &[0, 1, 2]);
    }

    #[test]
    fn empty_list_yields_empty_page() {
        let items: Vec<u32> = Vec::new();
        assert!(paginate(&items, 3, 1).is_empty());
        assert_eq!(total_pages(0, 3), 0);
    }

    #[test]
    fn pager_resets_on_new_list() {
        let first: Vec<u32> = (0..9).collect();
        let mut pager = Pager::new(3);
        pager.go_to(3, first.len());
        assert_eq!(pager.view(&first), &[6, 7, 8]);

        let second: Vec<u32> = (0..4).collect();
        pager.reset();
        assert_eq!(pager.current_page(), 1);
        assert_eq!(pager.view(&second), &[0, 1, 2]);
    }

    #[test]
    fn go_to_clamps_against_list_length() {
        let items: Vec<u32> = (0..4).collect();
        let mut pager = Pager::new(3);
        pager.go_to(10, items.len());
        assert_eq!(pager.current_page(), 2);
        assert_eq!(pager.view(&items), &[3]);
    }
}

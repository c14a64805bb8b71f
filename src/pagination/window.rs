/// How many page links the pagination control shows around the edges and
/// the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowShape {
    pub left_edge: usize,
    pub left_current: usize,
    pub right_current: usize,
    pub right_edge: usize,
}

impl Default for WindowShape {
    fn default() -> Self {
        Self {
            left_edge: 2,
            left_current: 2,
            right_current: 4,
            right_edge: 2,
        }
    }
}

impl WindowShape {
    /// Page links to render, with `None` marking a gap between runs.
    pub fn pages(&self, total_pages: usize, current_page: usize) -> Vec<Option<usize>> {
        if total_pages == 0 {
            return vec![];
        }

        let current_page = current_page.clamp(1, total_pages);
        let mut pages = Vec::new();

        let left_end = (1 + self.left_edge).min(total_pages.saturating_add(1));
        pages.extend((1..left_end).map(Some));

        let mid_start = left_end.max(current_page.saturating_sub(self.left_current));
        let mid_end = current_page
            .saturating_add(self.right_current + 1)
            .min(total_pages.saturating_add(1));

        if mid_start > left_end {
            pages.push(None);
        }
        pages.extend((mid_start..mid_end).map(Some));

        let right_start = mid_end.max(total_pages.saturating_sub(self.right_edge) + 1);

        if right_start > mid_end {
            pages.push(None);
        }
        pages.extend((right_start..=total_pages).map(Some));

        pages
    }
}

/// One-based `(first, last)` item positions shown on `current_page`, or
/// `None` when the collection is empty.
pub fn item_range(
    current_page: usize,
    page_size: usize,
    total_items: usize,
) -> Option<(usize, usize)> {
    if total_items == 0 || page_size == 0 {
        return None;
    }

    let first = current_page
        .saturating_sub(1)
        .checked_mul(page_size)?
        .checked_add(1)?;
    if first > total_items {
        return None;
    }
    let last = first.saturating_add(page_size - 1).min(total_items);

    Some((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_collections_show_every_page() {
        let pages = WindowShape::default().pages(5, 3);
        assert_eq!(pages, vec![Some(1), Some(2), Some(3), Some(4), Some(5)]);
    }

    #[test]
    fn long_collections_insert_gaps() {
        let pages = WindowShape::default().pages(30, 15);
        assert_eq!(
            pages,
            vec![
                Some(1),
                Some(2),
                None,
                Some(13),
                Some(14),
                Some(15),
                Some(16),
                Some(17),
                Some(18),
                Some(19),
                None,
                Some(29),
                Some(30),
            ]
        );
    }

    #[test]
    fn empty_collection_has_no_links() {
        assert!(WindowShape::default().pages(0, 1).is_empty());
    }

    #[test]
    fn item_range_covers_partial_last_page() {
        assert_eq!(item_range(1, 10, 47), Some((1, 10)));
        assert_eq!(item_range(5, 10, 47), Some((41, 47)));
        assert_eq!(item_range(6, 10, 47), None);
        assert_eq!(item_range(1, 10, 0), None);
    }

    #[test]
    fn huge_page_numbers_do_not_overflow() {
        assert_eq!(item_range(usize::MAX, 10, 5), None);
        assert_eq!(item_range(1, usize::MAX, 5), Some((1, 5)));

        let pages = WindowShape::default().pages(usize::MAX, usize::MAX);
        assert_eq!(pages.first(), Some(&Some(1)));
        assert_eq!(pages.last(), Some(&Some(usize::MAX)));
    }
}

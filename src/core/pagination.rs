use std::ops::Range;

/// 1-based page index over a list of `total_items` split into `page_size` chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    current: usize,
    page_size: usize,
    total_items: usize,
}

impl PaginationState {
    /// A page size of zero is treated as one.
    pub fn new(total_items: usize, page_size: usize) -> Self {
        Self {
            current: 1,
            page_size: page_size.max(1),
            total_items,
        }
    }

    pub fn next(&mut self) -> bool {
        if self.can_go_next() {
            self.current += 1;
            true
        } else {
            false
        }
    }

    pub fn previous(&mut self) -> bool {
        if self.can_go_previous() {
            self.current -= 1;
            true
        } else {
            false
        }
    }

    pub fn can_go_previous(&self) -> bool {
        self.current > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.current < self.total_pages()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size)
    }

    /// Item indices of the current page, clamped to the list length.
    pub fn page_range(&self) -> Range<usize> {
        let start = ((self.current - 1) * self.page_size).min(self.total_items);
        let end = (self.current * self.page_size).min(self.total_items);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_is_ceiling() {
        assert_eq!(PaginationState::new(0, 4).total_pages(), 0);
        assert_eq!(PaginationState::new(1, 4).total_pages(), 1);
        assert_eq!(PaginationState::new(8, 4).total_pages(), 2);
        assert_eq!(PaginationState::new(9, 4).total_pages(), 3);
        assert_eq!(PaginationState::new(7, 1).total_pages(), 7);
    }

    #[test]
    fn test_zero_page_size_is_clamped() {
        let state = PaginationState::new(3, 0);
        assert_eq!(state.page_size(), 1);
        assert_eq!(state.total_pages(), 3);
    }

    #[test]
    fn test_next_stops_at_last_page() {
        let mut state = PaginationState::new(5, 2);
        assert!(state.next());
        assert!(state.next());
        assert_eq!(state.current(), 3);
        assert!(!state.next());
        assert!(!state.next());
        assert_eq!(state.current(), 3);
    }

    #[test]
    fn test_previous_stops_at_first_page() {
        let mut state = PaginationState::new(5, 2);
        assert!(!state.previous());
        state.next();
        assert!(state.previous());
        assert!(!state.previous());
        assert_eq!(state.current(), 1);
    }

    #[test]
    fn test_page_range_clamps_last_page() {
        let mut state = PaginationState::new(5, 2);
        assert_eq!(state.page_range(), 0..2);
        state.next();
        assert_eq!(state.page_range(), 2..4);
        state.next();
        assert_eq!(state.page_range(), 4..5);
    }

    #[test]
    fn test_empty_list_never_moves() {
        let mut state = PaginationState::new(0, 3);
        assert!(!state.next());
        assert!(!state.previous());
        assert_eq!(state.current(), 1);
        assert_eq!(state.page_range(), 0..0);
    }

    #[test]
    fn test_page_range_never_exceeds_page_size() {
        for total in 0..12 {
            for size in 1..5 {
                let mut state = PaginationState::new(total, size);
                loop {
                    let range = state.page_range();
                    assert!(range.len() <= size);
                    assert!(range.end <= total);
                    if !state.next() {
                        break;
                    }
                }
            }
        }
    }
}

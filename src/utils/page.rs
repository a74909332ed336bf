/// Fixed-size pagination over a list of items
#[derive(Debug, Clone)]
pub struct Page<T> {
    items: Vec<T>,
    per_page: usize,
    pub current_page: usize,
}

impl<T> Page<T> {
    /// Create a pagination; a zero page size is treated as one
    pub fn new(items: Vec<T>, per_page: usize) -> Self {
        Page {
            items,
            per_page: per_page.max(1),
            current_page: 0,
        }
    }

    /// Items on the current page
    pub fn current(&self) -> &[T] {
        let start = self.current_page * self.per_page;
        let end = (start + self.per_page).min(self.items.len());
        self.items.get(start..end).unwrap_or(&[])
    }

    /// Move to next page
    pub fn next(&mut self) -> bool {
        if !self.is_last() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Move to previous page
    pub fn previous(&mut self) -> bool {
        if self.current_page > 0 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Get total number of pages; an empty list still has one (empty) page
    pub fn total_pages(&self) -> usize {
        ((self.items.len() + self.per_page - 1) / self.per_page).max(1)
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Check if on last page
    pub fn is_last(&self) -> bool {
        self.current_page + 1 >= self.total_pages()
    }

    /// "Page 2/5"
    pub fn label(&self) -> String {
        format!("Page {}/{}", self.current_page + 1, self.total_pages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paging_through_items() {
        let mut page = Page::new((1..=25).collect::<Vec<_>>(), 10);

        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.current(), &(1..=10).collect::<Vec<_>>()[..]);
        assert_eq!(page.current_page, 0);
        assert!(!page.previous());

        assert!(page.next());
        assert!(page.next());
        assert_eq!(page.current(), &[21, 22, 23, 24, 25]);
        assert!(page.is_last());
        assert!(!page.next());
        assert_eq!(page.label(), "Page 3/3");
    }

    #[test]
    fn test_empty_list() {
        let page: Page<u8> = Page::new(Vec::new(), 0);
        assert_eq!(page.total_pages(), 1);
        assert!(page.current().is_empty());
        assert!(page.is_last());
    }
}

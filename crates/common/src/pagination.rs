//! Pagination utilities for service layer
//!
//! Provides a simple `Pagination` struct and helpers to normalize inputs.

/// Pagination parameters
#[derive(Clone, Copy, Debug)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Clamp to sane defaults and convert to `(zero-based page index, per_page)`.
    pub fn normalize(self) -> (usize, usize) {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, 100);
        ((page - 1) as usize, per_page as usize)
    }

    /// Slice a full snapshot down to the requested page.
    pub fn apply<T>(self, items: Vec<T>) -> Vec<T> {
        let (page_idx, per_page) = self.normalize();
        items
            .into_iter()
            .skip(page_idx * per_page)
            .take(per_page)
            .collect()
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 20 } }
}

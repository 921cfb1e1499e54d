//! Pagination utilities for SonarQube API responses.

use serde::{Deserialize, Serialize};

use crate::query::QueryParams;
use crate::validate::{self, Checked};

/// Largest page size the server accepts.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Pagination query parameters, embedded into list-style options structs.
///
/// Encodes as the API's `p`/`ps` pair, flattened into the parent options'
/// parameter namespace. Both fields are optional; the server applies its own
/// defaults when they are absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Number of items per page (max 500).
    pub page_size: Option<u32>,
}

impl PageParams {
    /// Pagination params for a specific page.
    #[must_use]
    pub fn for_page(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Check the shared paging invariant: page >= 1, page size in [1, 500].
    ///
    /// Called from every embedding options struct's `validate()`, so an
    /// out-of-range page is rejected before any request is sent.
    pub fn validate(&self) -> Checked {
        if let Some(page) = self.page {
            validate::in_range("p", page, 1, u32::MAX)?;
        }
        if let Some(page_size) = self.page_size {
            validate::in_range("ps", page_size, 1, MAX_PAGE_SIZE)?;
        }
        Ok(())
    }

    /// Append `p`/`ps` to an options struct's query parameters.
    pub fn apply(&self, query: &mut QueryParams) {
        query.opt("p", self.page);
        query.opt("ps", self.page_size);
    }
}

/// Paging facts returned by list endpoints.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    /// Current page number (1-indexed).
    pub page_index: u32,
    /// Number of items per page.
    pub page_size: u32,
    /// Total number of items across all pages.
    pub total: u64,
}

/// A page of results from a list endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "T: Serialize")]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Current page number (1-indexed).
    pub page: u32,
    /// Number of items per page.
    pub page_size: u32,
    /// Total number of items across all pages (if reported).
    pub total: Option<u64>,
    /// Whether there are more pages.
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Create a new page from items and pagination info.
    #[must_use]
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total: Option<u64>) -> Self {
        let has_more = match total {
            Some(t) => (u64::from(page) * u64::from(page_size)) < t,
            None => items.len() >= page_size as usize,
        };
        Self {
            items,
            page,
            page_size,
            total,
            has_more,
        }
    }

    /// Build a page from the server's `paging` object.
    #[must_use]
    pub fn from_paging(items: Vec<T>, paging: &Paging) -> Self {
        Self::new(items, paging.page_index, paging.page_size, Some(paging.total))
    }

    /// Map the items to a different type.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total: self.total,
            has_more: self.has_more,
        }
    }

    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }
}

impl<T> IntoIterator for Page<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Page<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationErrorKind;

    #[test]
    fn test_page_params_bounds() {
        assert!(PageParams::for_page(1, 500).validate().is_ok());
        assert!(PageParams::default().validate().is_ok());

        let err = PageParams::for_page(0, 100).validate().unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::OutOfRange);
        assert_eq!(err.field, "p");

        let err = PageParams::for_page(1, 501).validate().unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::OutOfRange);
        assert_eq!(err.field, "ps");

        let err = PageParams::for_page(1, 0).validate().unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::OutOfRange);
    }

    #[test]
    fn test_page_params_apply_flattens_into_query() {
        let mut query = QueryParams::new();
        PageParams::for_page(2, 50).apply(&mut query);
        assert_eq!(query.get("p"), Some("2"));
        assert_eq!(query.get("ps"), Some("50"));

        let mut query = QueryParams::new();
        PageParams::default().apply(&mut query);
        assert!(query.is_empty());
    }

    #[test]
    fn test_page_has_more_with_total() {
        // Page 1 of 3 (total 250, 100 per page)
        let page: Page<i32> = Page::new(vec![1; 100], 1, 100, Some(250));
        assert!(page.has_more);

        // Page 3 of 3
        let page: Page<i32> = Page::new(vec![1; 50], 3, 100, Some(250));
        assert!(!page.has_more);
    }

    #[test]
    fn test_page_has_more_without_total() {
        // Full page suggests more
        let page: Page<i32> = Page::new(vec![1; 100], 1, 100, None);
        assert!(page.has_more);

        // Partial page means no more
        let page: Page<i32> = Page::new(vec![1; 50], 1, 100, None);
        assert!(!page.has_more);
    }

    #[test]
    fn test_page_from_paging() {
        let paging = Paging {
            page_index: 2,
            page_size: 100,
            total: 250,
        };
        let page = Page::from_paging(vec![0; 100], &paging);
        assert_eq!(page.page, 2);
        assert_eq!(page.total, Some(250));
        assert!(page.has_more);
    }

    #[test]
    fn test_page_map() {
        let page = Page::new(vec![1, 2, 3], 1, 100, Some(3));
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.page, 1);
    }
}

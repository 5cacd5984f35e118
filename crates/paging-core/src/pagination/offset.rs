//! Offset-based pagination requests.
//!
//! Offset pagination is suitable for small datasets or when random page access
//! is required. For large datasets, prefer cursor-based pagination.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{Store, TRACING_TARGET_PAGINATION};

/// Offset-based pagination parameters.
///
/// Use this for admin dashboards or when users need to jump to specific pages.
/// For infinite scroll or API iteration, prefer [`CursorPagination`].
///
/// [`CursorPagination`]: super::CursorPagination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct OffsetPagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Number of records to skip.
    pub offset: i64,
}

impl OffsetPagination {
    /// Creates a request with the given limit and offset, unmodified.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self { limit, offset }
    }

    /// Gets the current page number (1-based).
    pub fn page_number(&self) -> i64 {
        if self.limit <= 0 {
            return 1;
        }

        (self.offset / self.limit) + 1
    }

    /// Gets the page size.
    pub fn page_size(&self) -> i64 {
        self.limit
    }

    /// Returns the request for the following page.
    pub fn next(&self) -> Self {
        Self {
            limit: self.limit,
            offset: self.offset.saturating_add(self.limit),
        }
    }

    /// Fetches this page from `store`.
    ///
    /// Store failures are returned unchanged.
    #[tracing::instrument(skip(store), target = TRACING_TARGET_PAGINATION)]
    pub async fn fetch<S>(self, store: &mut S) -> Result<OffsetPage<S::Item>, S::Error>
    where
        S: Store,
    {
        let total = store.paginate_offset(self.limit, self.offset).await?;
        let items = store.take_items();

        tracing::debug!(
            target: TRACING_TARGET_PAGINATION,
            returned = items.len(),
            total,
            "Fetched offset page"
        );

        Ok(OffsetPage::new(items, total, self))
    }
}

impl Default for OffsetPagination {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
        }
    }
}

/// Result of an offset-paginated fetch.
#[derive(Debug, Clone, Serialize)]
pub struct OffsetPage<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total count of items matching the query (across all pages).
    pub total: i64,
    /// Page size the page was requested with.
    pub limit: i64,
    /// Offset the page was requested with.
    pub offset: i64,
}

impl<T> OffsetPage<T> {
    /// Creates a new offset page.
    pub fn new(items: Vec<T>, total: i64, pagination: OffsetPagination) -> Self {
        Self {
            items,
            total,
            limit: pagination.limit,
            offset: pagination.offset,
        }
    }

    /// Creates an empty offset page.
    pub fn empty(pagination: OffsetPagination) -> Self {
        Self::new(Vec::new(), 0, pagination)
    }

    /// Maps the items to a different type.
    pub fn map<U, F>(self, f: F) -> OffsetPage<U>
    where
        F: FnMut(T) -> U,
    {
        OffsetPage {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }

    /// Returns whether there are more pages after this one.
    pub fn has_more(&self) -> bool {
        self.offset.saturating_add(self.items.len() as i64) < self.total
    }

    /// Returns the total number of pages.
    pub fn total_pages(&self) -> i64 {
        if self.limit <= 0 {
            return 0;
        }

        self.total / self.limit + i64::from(self.total % self.limit > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_page_number() {
        assert_eq!(OffsetPagination::new(20, 0).page_number(), 1);
        assert_eq!(OffsetPagination::new(20, 20).page_number(), 2);
        assert_eq!(OffsetPagination::new(10, 25).page_number(), 3);
        assert_eq!(OffsetPagination::new(15, 30).page_number(), 3);
        assert_eq!(OffsetPagination::new(0, 30).page_number(), 1);
    }

    #[test]
    fn pagination_keeps_values_unmodified() {
        let pagination = OffsetPagination::new(-1, -5);
        assert_eq!(pagination.limit, -1);
        assert_eq!(pagination.offset, -5);
    }

    #[test]
    fn pagination_next() {
        let pagination = OffsetPagination::new(10, 20).next();
        assert_eq!(pagination, OffsetPagination::new(10, 30));
    }

    #[test]
    fn offset_page_has_more() {
        let page = OffsetPage::new((1..=10).collect::<Vec<_>>(), 25, OffsetPagination::new(10, 0));
        assert!(page.has_more());

        let page = OffsetPage::new((1..=5).collect::<Vec<_>>(), 25, OffsetPagination::new(10, 20));
        assert!(!page.has_more());

        let page: OffsetPage<i32> = OffsetPage::empty(OffsetPagination::default());
        assert!(!page.has_more());
    }

    #[test]
    fn offset_page_total_pages() {
        let pagination = OffsetPagination::new(10, 0);

        let page: OffsetPage<i32> = OffsetPage::new(vec![], 25, pagination);
        assert_eq!(page.total_pages(), 3);

        let page: OffsetPage<i32> = OffsetPage::new(vec![], 30, pagination);
        assert_eq!(page.total_pages(), 3);

        let page: OffsetPage<i32> = OffsetPage::new(vec![], 31, pagination);
        assert_eq!(page.total_pages(), 4);

        let page: OffsetPage<i32> = OffsetPage::new(vec![], 31, OffsetPagination::new(0, 0));
        assert_eq!(page.total_pages(), 0);
    }

    #[test]
    fn offset_page_total_pages_saturated_total() {
        let page: OffsetPage<i32> = OffsetPage::new(vec![], i64::MAX, OffsetPagination::new(10, 0));
        assert_eq!(page.total_pages(), i64::MAX / 10 + 1);

        let page: OffsetPage<i32> = OffsetPage::new(vec![], i64::MAX, OffsetPagination::new(1, 0));
        assert_eq!(page.total_pages(), i64::MAX);
    }

    #[test]
    fn offset_page_map() {
        let page = OffsetPage::new(vec![1, 2], 2, OffsetPagination::new(10, 0));
        let page = page.map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total, 2);
    }
}

//! Cursor-based pagination requests.
//!
//! Cursor pagination provides efficient, stable pagination for large datasets.
//! Unlike offset pagination, performance remains constant regardless of page depth.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{CursorValue, Store, TRACING_TARGET_PAGINATION};

/// Cursor-based pagination parameters.
///
/// Stores impose no ordering of their own, so a walk is only stable when the
/// store's query is ordered by `field` in the walking direction: ascending for
/// forward walks, descending for reverse walks. Each page's next token is the
/// last item kept, which is the value the following request must move past.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CursorPagination {
    /// Maximum number of records to return.
    pub limit: i64,
    /// Field the cursor is compared against.
    pub field: String,
    /// Last value seen by the caller; `None` starts from the first page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<CursorValue>,
    /// Walk towards smaller values instead of larger ones.
    #[serde(default)]
    pub reverse: bool,
}

impl CursorPagination {
    /// Creates a first-page request over `field`.
    pub fn new(limit: i64, field: impl Into<String>) -> Self {
        Self {
            limit,
            field: field.into(),
            cursor: None,
            reverse: false,
        }
    }

    /// Creates a request for values past `cursor`.
    pub fn after(limit: i64, field: impl Into<String>, cursor: impl Into<CursorValue>) -> Self {
        Self {
            cursor: Some(cursor.into()),
            ..Self::new(limit, field)
        }
    }

    /// Creates a reverse request for values before `cursor`.
    pub fn before(limit: i64, field: impl Into<String>, cursor: impl Into<CursorValue>) -> Self {
        Self::after(limit, field, cursor).reversed()
    }

    /// Flips the walking direction.
    pub fn reversed(mut self) -> Self {
        self.reverse = !self.reverse;
        self
    }

    /// Returns the limit plus one for fetching to determine if there are more results.
    ///
    /// When querying, fetch `limit + 1` items. If you get `limit + 1` results,
    /// there are more pages; return only `limit` items to the client.
    pub fn fetch_limit(&self) -> i64 {
        self.limit.saturating_add(1)
    }

    /// Checks if we have a cursor to paginate from.
    pub fn has_cursor(&self) -> bool {
        self.cursor.is_some()
    }

    /// Fetches this page from `store`.
    ///
    /// With a cursor, the store is asked for rows strictly past it and no
    /// count is taken. Without one, the first rows are read through offset
    /// pagination, which also yields the total; for a reverse walk these are
    /// the head of the store's descending order. `cursor_fn` extracts the
    /// cursor of an item to build the next-page token. A non-positive limit
    /// returns an empty page without a next token and leaves the store
    /// untouched. Store failures are returned unchanged.
    #[tracing::instrument(skip(store, cursor_fn), target = TRACING_TARGET_PAGINATION)]
    pub async fn fetch<S, F>(&self, store: &mut S, cursor_fn: F) -> Result<CursorPage<S::Item>, S::Error>
    where
        S: Store,
        F: Fn(&S::Item) -> CursorValue,
    {
        if self.limit <= 0 {
            tracing::debug!(
                target: TRACING_TARGET_PAGINATION,
                limit = self.limit,
                "Non-positive limit, returning an empty final page"
            );
            return Ok(CursorPage::new(Vec::new(), None, self.limit, cursor_fn));
        }

        let fetch_limit = self.fetch_limit();
        let total = match &self.cursor {
            Some(cursor) => {
                store
                    .paginate_cursor(fetch_limit, cursor.clone(), &self.field, self.reverse)
                    .await?;
                None
            }
            None => Some(store.paginate_offset(fetch_limit, 0).await?),
        };

        let page = CursorPage::new(store.take_items(), total, self.limit, cursor_fn);

        tracing::debug!(
            target: TRACING_TARGET_PAGINATION,
            returned = page.items.len(),
            total = ?page.total,
            has_more = page.has_more(),
            "Fetched cursor page"
        );

        Ok(page)
    }
}

/// Result of a cursor-paginated fetch.
#[derive(Debug, Clone, Serialize)]
pub struct CursorPage<T> {
    /// The items in this page.
    pub items: Vec<T>,
    /// Total count of items matching the query (across all pages).
    /// Only present for first pages, which are read with a count.
    pub total: Option<i64>,
    /// Cursor to fetch the next page. Present only when more items exist.
    pub next_cursor: Option<String>,
}

impl<T> CursorPage<T> {
    /// Creates a new cursor page from query results.
    ///
    /// # Arguments
    /// * `items` - Items fetched from the store (should be `limit + 1` if there are more)
    /// * `total` - Total count of matching items, when one was taken
    /// * `limit` - The requested page size
    /// * `cursor_fn` - Function to extract the cursor value from an item
    ///
    /// A non-positive `limit` keeps no items and yields no next cursor.
    pub fn new<F>(mut items: Vec<T>, total: Option<i64>, limit: i64, cursor_fn: F) -> Self
    where
        F: Fn(&T) -> CursorValue,
    {
        let has_more = limit > 0 && items.len() as i64 > limit;

        // Remove the extra items used to detect more pages
        items.truncate(usize::try_from(limit).unwrap_or_default());

        let next_cursor = if has_more {
            items.last().map(|item| cursor_fn(item).encode())
        } else {
            None
        };

        Self {
            items,
            total,
            next_cursor,
        }
    }

    /// Creates an empty cursor page.
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: Some(0),
            next_cursor: None,
        }
    }

    /// Returns true if there are more items to fetch.
    pub fn has_more(&self) -> bool {
        self.next_cursor.is_some()
    }

    /// Maps the items to a different type.
    pub fn map<U, F>(self, f: F) -> CursorPage<U>
    where
        F: FnMut(T) -> U,
    {
        CursorPage {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            next_cursor: self.next_cursor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_pagination_new() {
        let pagination = CursorPagination::new(25, "id");
        assert_eq!(pagination.limit, 25);
        assert_eq!(pagination.field, "id");
        assert!(!pagination.has_cursor());
        assert!(!pagination.reverse);
    }

    #[test]
    fn cursor_pagination_directions() {
        let after = CursorPagination::after(10, "id", 5);
        assert_eq!(after.cursor, Some(CursorValue::Int(5)));
        assert!(!after.reverse);

        let before = CursorPagination::before(10, "id", 5);
        assert!(before.reverse);
        assert!(!before.reversed().reverse);
    }

    #[test]
    fn cursor_pagination_fetch_limit() {
        assert_eq!(CursorPagination::new(50, "id").fetch_limit(), 51);
        assert_eq!(CursorPagination::new(i64::MAX, "id").fetch_limit(), i64::MAX);
    }

    #[test]
    fn cursor_page_with_more() {
        let items: Vec<i64> = (1..=51).collect();
        let page = CursorPage::new(items, None, 50, |item| CursorValue::Int(*item));

        assert_eq!(page.items.len(), 50);
        assert!(page.has_more());
        assert_eq!(page.next_cursor, Some(CursorValue::Int(50).encode()));
    }

    #[test]
    fn cursor_page_without_more() {
        let items: Vec<i64> = (1..=30).collect();
        let page = CursorPage::new(items, Some(30), 50, |item| CursorValue::Int(*item));

        assert_eq!(page.items.len(), 30);
        assert_eq!(page.total, Some(30));
        assert!(!page.has_more());
        assert!(page.next_cursor.is_none());
    }

    #[test]
    fn cursor_page_zero_limit_is_final() {
        let page = CursorPage::new(vec![1_i64, 2], Some(2), 0, |item| CursorValue::Int(*item));

        assert!(page.items.is_empty());
        assert!(!page.has_more());
        assert_eq!(page.total, Some(2));
    }

    #[test]
    fn cursor_page_empty() {
        let page: CursorPage<i64> = CursorPage::empty();
        assert!(page.items.is_empty());
        assert_eq!(page.total, Some(0));
        assert!(!page.has_more());
    }
}

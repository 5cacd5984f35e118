//! The pagination interface shared by every backing store.

use std::future::Future;

use crate::CursorValue;

/// A store that can fill a destination container one page at a time.
///
/// Implementations forward each call onto the query builder of an existing
/// data-access layer. They add no validation, ordering, retries or error
/// classification of their own:
///
/// - `limit` and `offset` reach the underlying store exactly as given, so
///   negative or zero values behave however that store defines them.
/// - Results come back in whatever order the underlying query produces.
/// - Failures are the underlying store's own error values, returned verbatim.
///
/// Every paginate call takes `&mut self`; an instance serves one caller for
/// one logical pagination sequence.
pub trait Store {
    /// Record type written into the destination container.
    type Item;

    /// Error type of the underlying store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Fetches `limit` records starting at `offset` into the container.
    ///
    /// Returns the total number of matching records, ignoring `limit` and
    /// `offset`.
    fn paginate_offset(
        &mut self,
        limit: i64,
        offset: i64,
    ) -> impl Future<Output = Result<i64, Self::Error>> + Send;

    /// Fetches up to `limit` records whose `field_name` lies strictly past
    /// `cursor` into the container.
    ///
    /// Forward pagination keeps values greater than `cursor`; `reverse` keeps
    /// values less than it. No count is computed. The validity of
    /// `field_name` is the caller's responsibility.
    fn paginate_cursor(
        &mut self,
        limit: i64,
        cursor: CursorValue,
        field_name: &str,
        reverse: bool,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Returns the destination container as the last successful call left it.
    fn items(&self) -> &[Self::Item];

    /// Moves the destination container out, leaving it empty.
    fn take_items(&mut self) -> Vec<Self::Item>;
}

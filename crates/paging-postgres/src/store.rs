//! Pagination store over a diesel boxed query.

use diesel::expression::SqlLiteral;
use diesel::query_dsl::methods::{FilterDsl, LimitDsl, OffsetDsl, SelectDsl};
use diesel::sql_types::BigInt;
use diesel_async::RunQueryDsl;
use diesel_async::methods::LoadQuery;
use paging_core::{CursorValue, Store};

use crate::{CountQuery, CursorPredicate, PageQuery, PgConnection, PgError, TRACING_TARGET_STORE};

/// Store that pages through the rows of a [`PageQuery`] on a borrowed connection.
///
/// Offset pagination loads the window first and then counts the unordered,
/// unwindowed base query. Cursor pagination adds a [`CursorPredicate`] to a
/// fresh data query and never counts. Database errors are returned as diesel
/// reports them.
///
/// ## Example
///
/// ```rust,ignore
/// let query = PageQuery::new(|| users::table.into_boxed())
///     .ordered_by(|query| query.order(users::id.asc()));
///
/// let mut store = PgStore::<_, User>::new(&mut conn, query);
/// let total = store.paginate_offset(10, 20).await?;
/// ```
pub struct PgStore<'c, Q, T> {
    conn: &'c mut PgConnection,
    query: PageQuery<Q>,
    items: Vec<T>,
}

impl<'c, Q, T> PgStore<'c, Q, T> {
    /// Creates a store reading `query` through `conn`.
    pub fn new(conn: &'c mut PgConnection, query: PageQuery<Q>) -> Self {
        Self {
            conn,
            query,
            items: Vec::new(),
        }
    }

    /// Uses `items` as the destination container.
    pub fn with_items(mut self, items: Vec<T>) -> Self {
        self.items = items;
        self
    }

    /// Returns the page queries.
    #[inline]
    pub fn query(&self) -> &PageQuery<Q> {
        &self.query
    }
}

impl<Q, T> Store for PgStore<'_, Q, T>
where
    Q: LimitDsl<Output = Q>
        + OffsetDsl<Output = Q>
        + FilterDsl<CursorPredicate, Output = Q>
        + SelectDsl<SqlLiteral<BigInt>>
        + LoadQuery<'static, PgConnection, T>
        + Send
        + 'static,
    CountQuery<Q>: LoadQuery<'static, PgConnection, i64> + Send + 'static,
    T: Send,
{
    type Error = PgError;
    type Item = T;

    #[tracing::instrument(skip(self), target = TRACING_TARGET_STORE)]
    async fn paginate_offset(&mut self, limit: i64, offset: i64) -> Result<i64, Self::Error> {
        self.items = self
            .query
            .offset_query(limit, offset)
            .load::<T>(&mut *self.conn)
            .await?;

        let total = self
            .query
            .count_query()
            .get_result::<i64>(&mut *self.conn)
            .await?;

        tracing::debug!(
            target: TRACING_TARGET_STORE,
            returned = self.items.len(),
            total,
            "Paginated rows by offset"
        );

        Ok(total)
    }

    #[tracing::instrument(skip(self), target = TRACING_TARGET_STORE)]
    async fn paginate_cursor(
        &mut self,
        limit: i64,
        cursor: CursorValue,
        field_name: &str,
        reverse: bool,
    ) -> Result<(), Self::Error> {
        let predicate = CursorPredicate::new(field_name, cursor, reverse);

        self.items = self
            .query
            .cursor_query(limit, predicate)
            .load::<T>(&mut *self.conn)
            .await?;

        tracing::debug!(
            target: TRACING_TARGET_STORE,
            returned = self.items.len(),
            "Paginated rows by cursor"
        );

        Ok(())
    }

    fn items(&self) -> &[Self::Item] {
        &self.items
    }

    fn take_items(&mut self) -> Vec<Self::Item> {
        std::mem::take(&mut self.items)
    }
}

//! Data and count queries for a page.

use diesel::dsl::sql;
use diesel::expression::SqlLiteral;
use diesel::query_dsl::methods::{FilterDsl, LimitDsl, OffsetDsl, SelectDsl};
use diesel::sql_types::BigInt;

use crate::CursorPredicate;

type BaseFn<Q> = Box<dyn Fn() -> Q + Send + Sync>;
type OrderFn<Q> = Box<dyn Fn(Q) -> Q + Send + Sync>;

/// Query counting every row of a base query.
pub type CountQuery<Q> = <Q as SelectDsl<SqlLiteral<BigInt>>>::Output;

/// Builds the queries needed to read one page from a base query.
///
/// The base is a factory returning a fresh boxed select (for example
/// `users::table.filter(..).into_boxed()`) every time a query is built, so a
/// limit, offset or cursor filter from one call never carries over into the
/// next. An optional ordering step is applied to data queries only; count
/// queries stay unordered so Postgres accepts them.
pub struct PageQuery<Q> {
    base: BaseFn<Q>,
    order: Option<OrderFn<Q>>,
}

impl<Q> PageQuery<Q> {
    /// Creates page queries over `base`.
    pub fn new<F>(base: F) -> Self
    where
        F: Fn() -> Q + Send + Sync + 'static,
    {
        Self {
            base: Box::new(base),
            order: None,
        }
    }

    /// Orders data queries with `order`, e.g. `|q| q.order(users::id.asc())`.
    pub fn ordered_by<F>(mut self, order: F) -> Self
    where
        F: Fn(Q) -> Q + Send + Sync + 'static,
    {
        self.order = Some(Box::new(order));
        self
    }

    /// Returns whether data queries are ordered.
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.order.is_some()
    }

    /// Builds the unconstrained base query.
    pub fn base(&self) -> Q {
        (self.base)()
    }

    fn data(&self) -> Q {
        let query = self.base();
        match &self.order {
            Some(order) => order(query),
            None => query,
        }
    }
}

impl<Q> PageQuery<Q>
where
    Q: LimitDsl<Output = Q> + OffsetDsl<Output = Q>,
{
    /// `LIMIT limit OFFSET offset` over the (ordered) base query.
    pub fn offset_query(&self, limit: i64, offset: i64) -> Q {
        let query = LimitDsl::limit(self.data(), limit);
        OffsetDsl::offset(query, offset)
    }
}

impl<Q> PageQuery<Q>
where
    Q: LimitDsl<Output = Q> + FilterDsl<CursorPredicate, Output = Q>,
{
    /// `WHERE <predicate> LIMIT limit` over the (ordered) base query.
    pub fn cursor_query(&self, limit: i64, predicate: CursorPredicate) -> Q {
        let query = FilterDsl::filter(self.data(), predicate);
        LimitDsl::limit(query, limit)
    }
}

impl<Q> PageQuery<Q>
where
    Q: SelectDsl<SqlLiteral<BigInt>>,
{
    /// `SELECT COUNT(*)` over the unordered base query.
    pub fn count_query(&self) -> CountQuery<Q> {
        SelectDsl::select(self.base(), sql::<BigInt>("COUNT(*)"))
    }
}

//! Cursor comparison as a diesel expression.

use diesel::expression::{
    AppearsOnTable, Expression, SelectableExpression, ValidGrouping, is_aggregate,
};
use diesel::pg::Pg;
use diesel::query_builder::{AstPass, QueryFragment, QueryId};
use diesel::result::QueryResult;
use diesel::sql_types::{BigInt, Bool, Text, Timestamptz, Uuid as SqlUuid};
use paging_core::{Comparison, CursorValue};
use uuid::Uuid;

/// Bind parameter carrying a cursor, typed for Postgres.
#[derive(Debug, Clone, PartialEq)]
enum CursorBind {
    BigInt(i64),
    Text(String),
    Uuid(Uuid),
    Timestamptz(jiff_diesel::Timestamp),
}

impl From<CursorValue> for CursorBind {
    fn from(cursor: CursorValue) -> Self {
        match cursor {
            CursorValue::Int(value) => Self::BigInt(value),
            CursorValue::Text(value) => Self::Text(value),
            CursorValue::Uuid(value) => Self::Uuid(value),
            CursorValue::Timestamp(value) => Self::Timestamptz(value.into()),
        }
    }
}

/// `<field> > $1` or `<field> < $1`, usable as a filter on any query source.
///
/// The field is written as a quoted identifier; dotted names such as
/// `users.id` quote each segment. The cursor is sent as a bind parameter of
/// the SQL type matching its kind, so the column must be comparable with it.
/// Whether the field exists is only checked by the database.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPredicate {
    field: String,
    comparison: Comparison,
    bind: CursorBind,
}

impl CursorPredicate {
    /// Creates the predicate for a pagination direction.
    pub fn new(field_name: impl Into<String>, cursor: CursorValue, reverse: bool) -> Self {
        Self {
            field: field_name.into(),
            comparison: Comparison::from_reverse(reverse),
            bind: cursor.into(),
        }
    }

    /// Returns the compared field name.
    #[inline]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the comparison applied.
    #[inline]
    pub fn comparison(&self) -> Comparison {
        self.comparison
    }
}

impl Expression for CursorPredicate {
    type SqlType = Bool;
}

impl<GB> ValidGrouping<GB> for CursorPredicate {
    type IsAggregate = is_aggregate::Never;
}

impl<QS> AppearsOnTable<QS> for CursorPredicate {}

impl<QS> SelectableExpression<QS> for CursorPredicate {}

impl QueryId for CursorPredicate {
    type QueryId = ();

    const HAS_STATIC_QUERY_ID: bool = false;
}

impl QueryFragment<Pg> for CursorPredicate {
    fn walk_ast<'b>(&'b self, mut out: AstPass<'_, 'b, Pg>) -> QueryResult<()> {
        for (index, segment) in self.field.split('.').enumerate() {
            if index > 0 {
                out.push_sql(".");
            }
            out.push_identifier(segment)?;
        }

        out.push_sql(" ");
        out.push_sql(self.comparison.sql_operator());
        out.push_sql(" ");

        match &self.bind {
            CursorBind::BigInt(value) => out.push_bind_param::<BigInt, _>(value),
            CursorBind::Text(value) => out.push_bind_param::<Text, _>(value),
            CursorBind::Uuid(value) => out.push_bind_param::<SqlUuid, _>(value),
            CursorBind::Timestamptz(value) => out.push_bind_param::<Timestamptz, _>(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;

    #[test]
    fn predicate_direction() {
        let forward = CursorPredicate::new("id", CursorValue::Int(3), false);
        assert_eq!(forward.comparison(), Comparison::GreaterThan);
        assert_eq!(forward.field(), "id");

        let reverse = CursorPredicate::new("id", CursorValue::Int(3), true);
        assert_eq!(reverse.comparison(), Comparison::LessThan);
    }

    #[test]
    fn cursor_binds_follow_kind() {
        assert_eq!(CursorBind::from(CursorValue::Int(7)), CursorBind::BigInt(7));
        assert_eq!(
            CursorBind::from(CursorValue::from("abc")),
            CursorBind::Text("abc".into())
        );

        let now = Timestamp::now();
        assert_eq!(
            CursorBind::from(CursorValue::Timestamp(now)),
            CursorBind::Timestamptz(now.into())
        );
    }
}

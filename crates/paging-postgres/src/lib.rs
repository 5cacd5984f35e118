#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for store pagination calls.
///
/// Use this target for logging offset and cursor pagination requests, row counts and totals.
pub const TRACING_TARGET_STORE: &str = "paging_postgres::store";

mod predicate;
pub mod prelude;
mod query;
mod store;

pub use diesel_async::AsyncPgConnection as PgConnection;
pub use predicate::CursorPredicate;
pub use query::{CountQuery, PageQuery};
pub use store::PgStore;

/// Error type returned by [`PgStore`], passed through from diesel.
pub type PgError = diesel::result::Error;

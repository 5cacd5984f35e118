//! Prelude module for paging-postgres.
//!
//! This module re-exports the most commonly used types and traits from paging-postgres,
//! making it easy to import everything you need with a single `use` statement.

pub use paging_core::prelude::*;

pub use crate::{CountQuery, CursorPredicate, PageQuery, PgConnection, PgError, PgStore};

//! Pagination requests and the pages they produce.
//!
//! Requests are plain values, usually built through [`PaginationConfig`] from
//! user input. Fetching a request drives a [`Store`] and moves the records it
//! wrote into an owned page.
//!
//! [`PaginationConfig`]: crate::PaginationConfig
//! [`Store`]: crate::Store

mod cursor;
mod offset;

pub use cursor::{CursorPage, CursorPagination};
pub use offset::{OffsetPage, OffsetPagination};

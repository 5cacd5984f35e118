#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for page fetching driven by pagination requests.
///
/// Use this target for logging request normalization, page assembly, and cursor handling.
pub const TRACING_TARGET_PAGINATION: &str = "paging_core::pagination";

/// Tracing target for pagination configuration.
///
/// Use this target for logging configuration construction and validation.
pub const TRACING_TARGET_CONFIG: &str = "paging_core::config";

mod config;
mod cursor;
mod error;
pub mod pagination;
pub mod prelude;
mod store;

pub use config::PaginationConfig;
pub use cursor::{Comparison, CursorKind, CursorValue};
pub use error::{Error, Result};
pub use pagination::{CursorPage, CursorPagination, OffsetPage, OffsetPagination};
pub use store::Store;

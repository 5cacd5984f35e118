//! Prelude module for paging-core.
//!
//! This module re-exports the most commonly used types and traits from paging-core,
//! making it easy to import everything you need with a single `use` statement.
//!
//! # Example
//!
//! ```rust
//! use paging_core::prelude::*;
//!
//! let config = PaginationConfig::default();
//! let pagination = config.cursor(Some(10), "id", Some(CursorValue::Int(42)));
//! assert!(pagination.has_cursor());
//! ```

// Interface
pub use crate::Store;
// Cursor types
pub use crate::cursor::{Comparison, CursorKind, CursorValue};
// Requests and pages
pub use crate::pagination::{CursorPage, CursorPagination, OffsetPage, OffsetPagination};
// Configuration
pub use crate::config::PaginationConfig;
// Error types
pub use crate::error::{Error, Result};

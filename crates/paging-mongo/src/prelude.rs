//! Prelude module for paging-mongo.
//!
//! This module re-exports the most commonly used types and traits from paging-mongo,
//! making it easy to import everything you need with a single `use` statement.

// Filter documents
pub use mongodb::bson::{Bson, Document, doc};
pub use paging_core::prelude::*;

pub use crate::{DocumentCollection, FindWindow, MongoStore};

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for store pagination calls.
///
/// Use this target for logging offset and cursor pagination requests and their results.
pub const TRACING_TARGET_STORE: &str = "paging_mongo::store";

/// Tracing target for collection access.
///
/// Use this target for logging count and find calls issued against a collection.
pub const TRACING_TARGET_COLLECTION: &str = "paging_mongo::collection";

mod collection;
pub mod filter;
pub mod prelude;
mod store;

// Re-export the bson crate used by filter documents
pub use mongodb::bson;
pub use collection::{DocumentCollection, FindWindow};
pub use store::MongoStore;

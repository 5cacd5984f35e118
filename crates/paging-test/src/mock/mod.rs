//! In-memory implementations of the pagination seams for testing.
//!
//! [`MemoryStore`] implements [`Store`] directly over a vector of records, and
//! [`MemoryCollection`] implements [`DocumentCollection`] over bson documents
//! so the MongoDB store can be exercised without a server. Both can be told to
//! fail every call, to check that errors reach callers unchanged.
//!
//! [`Store`]: paging_core::Store
//! [`DocumentCollection`]: paging_mongo::DocumentCollection

mod collection;
mod store;

pub use collection::{MemoryCollection, MemoryCollectionError};
pub use store::{MemoryStore, MemoryStoreError, StoreCall};

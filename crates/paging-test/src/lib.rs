#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for in-memory test doubles.
pub const TRACING_TARGET_MOCK: &str = "paging_test::mock";

mod mock;

pub use mock::{
    MemoryCollection, MemoryCollectionError, MemoryStore, MemoryStoreError, StoreCall,
};

/// Installs a test-friendly tracing subscriber once per process.
///
/// Filtering follows `RUST_LOG`; repeated calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

//! Collection handle seam used by [`MongoStore`].
//!
//! [`MongoStore`]: crate::MongoStore

use std::future::Future;

use futures::TryStreamExt;
use mongodb::Collection;
use mongodb::bson::Document;
use serde::de::DeserializeOwned;

use crate::TRACING_TARGET_COLLECTION;

/// Sort, limit and skip applied to a single find call.
#[derive(Debug, Clone, PartialEq)]
pub struct FindWindow {
    /// Maximum number of documents, forwarded as-is.
    pub limit: i64,
    /// Number of leading documents to skip.
    pub skip: Option<u64>,
    /// Sort specification, e.g. `{ "id": -1 }`.
    pub sort: Option<Document>,
}

impl FindWindow {
    /// Creates a window returning up to `limit` documents.
    pub fn new(limit: i64) -> Self {
        Self {
            limit,
            skip: None,
            sort: None,
        }
    }

    /// Orders documents by `sort` before skipping and limiting.
    pub fn with_sort(mut self, sort: Option<Document>) -> Self {
        self.sort = sort;
        self
    }

    /// Skips the first `offset` documents.
    ///
    /// The driver only accepts unsigned skips; negative offsets skip nothing.
    pub fn with_offset(mut self, offset: i64) -> Self {
        self.skip = Some(u64::try_from(offset).unwrap_or_default());
        self
    }
}

/// A document collection that can be counted and queried with a filter.
///
/// Implemented for [`mongodb::Collection`]; tests substitute an in-memory
/// collection that evaluates the same filter documents.
pub trait DocumentCollection: Send + Sync {
    /// Type documents are deserialized into.
    type Item: Send;

    /// Error type of the collection handle.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Counts the documents matching `filter`.
    fn count(&self, filter: Document) -> impl Future<Output = Result<u64, Self::Error>> + Send;

    /// Returns the documents matching `filter` within `window`.
    fn find_all(
        &self,
        filter: Document,
        window: FindWindow,
    ) -> impl Future<Output = Result<Vec<Self::Item>, Self::Error>> + Send;
}

impl<T> DocumentCollection for Collection<T>
where
    T: DeserializeOwned + Send + Sync + Unpin + 'static,
{
    type Error = mongodb::error::Error;
    type Item = T;

    async fn count(&self, filter: Document) -> Result<u64, Self::Error> {
        tracing::trace!(
            target: TRACING_TARGET_COLLECTION,
            collection = self.name(),
            "Counting documents"
        );

        self.count_documents(filter).await
    }

    async fn find_all(&self, filter: Document, window: FindWindow) -> Result<Vec<T>, Self::Error> {
        tracing::trace!(
            target: TRACING_TARGET_COLLECTION,
            collection = self.name(),
            limit = window.limit,
            skip = ?window.skip,
            sort = ?window.sort,
            "Finding documents"
        );

        let FindWindow { limit, skip, sort } = window;
        let mut find = self.find(filter).limit(limit);
        if let Some(skip) = skip {
            find = find.skip(skip);
        }
        if let Some(sort) = sort {
            find = find.sort(sort);
        }

        find.await?.try_collect().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_offsets() {
        assert_eq!(FindWindow::new(10).skip, None);
        assert_eq!(FindWindow::new(10).with_offset(20).skip, Some(20));
        assert_eq!(FindWindow::new(10).with_offset(-4).skip, Some(0));
    }

    #[test]
    fn window_sort() {
        use mongodb::bson::doc;

        assert_eq!(FindWindow::new(10).sort, None);
        let window = FindWindow::new(10).with_sort(Some(doc! { "id": -1 }));
        assert_eq!(window.sort, Some(doc! { "id": -1 }));
    }
}

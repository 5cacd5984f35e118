//! Pagination store over a MongoDB collection.

use mongodb::bson::Document;
use paging_core::{CursorValue, Store};

use crate::{DocumentCollection, FindWindow, TRACING_TARGET_STORE, filter};

/// Store that pages through the documents of a collection matching a filter.
///
/// Offset pagination counts against the filter first, then finds with
/// limit/skip. Cursor pagination writes a `$gt`/`$lt` constraint for the
/// cursor field into the filter itself before finding with a limit, so the
/// constraint stays in place for every later call on the same store. An
/// optional sort set with [`MongoStore::with_sort`] applies to every find
/// and never to counts.
///
/// ## Example
///
/// ```rust,no_run
/// use mongodb::bson::{Document, doc};
/// use paging_core::Store;
/// use paging_mongo::MongoStore;
///
/// # async fn example(collection: mongodb::Collection<Document>) -> mongodb::error::Result<()> {
/// let mut store = MongoStore::new(collection, doc! { "status": "active" });
/// let total = store.paginate_offset(10, 0).await?;
/// println!("{} of {total}", store.items().len());
/// # Ok(())
/// # }
/// ```
pub struct MongoStore<C>
where
    C: DocumentCollection,
{
    collection: C,
    filter: Document,
    sort: Option<Document>,
    items: Vec<C::Item>,
}

impl<C> MongoStore<C>
where
    C: DocumentCollection,
{
    /// Creates a store over `collection` restricted by `filter`.
    pub fn new(collection: C, filter: Document) -> Self {
        Self {
            collection,
            filter,
            sort: None,
            items: Vec::new(),
        }
    }

    /// Sorts found documents by `sort`, e.g. `doc! { "id": -1 }` for a
    /// reverse walk over `id`.
    pub fn with_sort(mut self, sort: Document) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Returns the sort applied to finds.
    #[inline]
    pub fn sort(&self) -> Option<&Document> {
        self.sort.as_ref()
    }

    /// Uses `items` as the destination container.
    pub fn with_items(mut self, items: Vec<C::Item>) -> Self {
        self.items = items;
        self
    }

    /// Returns the filter as the last cursor call left it.
    #[inline]
    pub fn filter(&self) -> &Document {
        &self.filter
    }

    /// Returns the collection handle.
    #[inline]
    pub fn collection(&self) -> &C {
        &self.collection
    }
}

impl<C> Store for MongoStore<C>
where
    C: DocumentCollection,
{
    type Error = C::Error;
    type Item = C::Item;

    #[tracing::instrument(skip(self), target = TRACING_TARGET_STORE)]
    async fn paginate_offset(&mut self, limit: i64, offset: i64) -> Result<i64, Self::Error> {
        let total = self.collection.count(self.filter.clone()).await?;

        let window = FindWindow::new(limit)
            .with_offset(offset)
            .with_sort(self.sort.clone());
        self.items = self
            .collection
            .find_all(self.filter.clone(), window)
            .await?;

        tracing::debug!(
            target: TRACING_TARGET_STORE,
            returned = self.items.len(),
            total,
            "Paginated documents by offset"
        );

        Ok(i64::try_from(total).unwrap_or(i64::MAX))
    }

    #[tracing::instrument(skip(self), target = TRACING_TARGET_STORE)]
    async fn paginate_cursor(
        &mut self,
        limit: i64,
        cursor: CursorValue,
        field_name: &str,
        reverse: bool,
    ) -> Result<(), Self::Error> {
        filter::apply_cursor(&mut self.filter, field_name, cursor, reverse);

        self.items = self
            .collection
            .find_all(
                self.filter.clone(),
                FindWindow::new(limit).with_sort(self.sort.clone()),
            )
            .await?;

        tracing::debug!(
            target: TRACING_TARGET_STORE,
            returned = self.items.len(),
            "Paginated documents by cursor"
        );

        Ok(())
    }

    fn items(&self) -> &[Self::Item] {
        &self.items
    }

    fn take_items(&mut self) -> Vec<Self::Item> {
        std::mem::take(&mut self.items)
    }
}

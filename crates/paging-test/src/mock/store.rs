//! In-memory pagination store.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use paging_core::{Comparison, CursorValue, Store};

use crate::TRACING_TARGET_MOCK;

/// Errors returned by [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MemoryStoreError {
    /// The field accessor does not know the requested field.
    #[error("Unknown field '{0}'")]
    UnknownField(String),

    /// The cursor cannot be compared with the field's values.
    #[error("Cursor of kind '{kind}' is not comparable with field '{field}'")]
    IncomparableCursor { field: String, kind: String },

    /// Failure configured through [`MemoryStore::failing`].
    #[error("Injected failure: {0}")]
    Injected(String),
}

/// A paginate call received by a [`MemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// Offset pagination.
    Offset { limit: i64, offset: i64 },
    /// Cursor pagination.
    Cursor {
        limit: i64,
        cursor: CursorValue,
        field: String,
        reverse: bool,
    },
}

type FieldFn<T> = Arc<dyn Fn(&T, &str) -> Option<CursorValue> + Send + Sync>;

/// Store over an in-memory vector of rows.
///
/// Rows are returned in insertion order unless an order is set with
/// [`MemoryStore::ordered_by`] or [`MemoryStore::ordered_by_desc`], which
/// plays the part of an `ORDER BY` on the underlying query. Negative limits
/// mean "no limit" and negative offsets start at the first row. Fields are
/// read through the accessor given to [`MemoryStore::new`].
pub struct MemoryStore<T> {
    rows: Vec<T>,
    field_fn: FieldFn<T>,
    order: Option<(String, bool)>,
    items: Vec<T>,
    failure: Option<String>,
    calls: Vec<StoreCall>,
}

impl<T> MemoryStore<T>
where
    T: Clone,
{
    /// Creates a store over `rows`.
    ///
    /// `field_fn` returns the cursor value of a row for a field name, or
    /// `None` when the field does not exist.
    pub fn new<F>(rows: Vec<T>, field_fn: F) -> Self
    where
        F: Fn(&T, &str) -> Option<CursorValue> + Send + Sync + 'static,
    {
        Self {
            rows,
            field_fn: Arc::new(field_fn),
            order: None,
            items: Vec::new(),
            failure: None,
            calls: Vec::new(),
        }
    }

    /// Returns rows in ascending order of `field`.
    pub fn ordered_by(mut self, field: impl Into<String>) -> Self {
        self.order = Some((field.into(), false));
        self
    }

    /// Returns rows in descending order of `field`.
    pub fn ordered_by_desc(mut self, field: impl Into<String>) -> Self {
        self.order = Some((field.into(), true));
        self
    }

    /// Makes every subsequent paginate call fail with `reason`.
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }

    /// Returns the paginate calls received so far.
    pub fn calls(&self) -> &[StoreCall] {
        &self.calls
    }

    /// Returns every row held by the store.
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    fn check_failure(&self) -> Result<(), MemoryStoreError> {
        match &self.failure {
            Some(reason) => Err(MemoryStoreError::Injected(reason.clone())),
            None => Ok(()),
        }
    }

    fn window(limit: i64) -> usize {
        usize::try_from(limit).unwrap_or(usize::MAX)
    }

    fn field(&self, row: &T, field_name: &str) -> Result<CursorValue, MemoryStoreError> {
        (self.field_fn)(row, field_name)
            .ok_or_else(|| MemoryStoreError::UnknownField(field_name.to_owned()))
    }

    fn ordered(&self) -> Result<Vec<&T>, MemoryStoreError> {
        let Some((field_name, descending)) = &self.order else {
            return Ok(self.rows.iter().collect());
        };

        let mut keyed = Vec::with_capacity(self.rows.len());
        for row in &self.rows {
            keyed.push((self.field(row, field_name)?, row));
        }

        keyed.sort_by(|(a, _), (b, _)| {
            let ordering = a.compare(b).unwrap_or(Ordering::Equal);
            if *descending { ordering.reverse() } else { ordering }
        });

        Ok(keyed.into_iter().map(|(_, row)| row).collect())
    }

    fn select_past(
        &self,
        cursor: &CursorValue,
        field_name: &str,
        reverse: bool,
    ) -> Result<Vec<T>, MemoryStoreError> {
        let comparison = Comparison::from_reverse(reverse);
        let mut selected = Vec::new();

        for row in self.ordered()? {
            let value = self.field(row, field_name)?;
            let ordering =
                value
                    .compare(cursor)
                    .ok_or_else(|| MemoryStoreError::IncomparableCursor {
                        field: field_name.to_owned(),
                        kind: cursor.kind().to_string(),
                    })?;

            if comparison.accepts(ordering) {
                selected.push(row.clone());
            }
        }

        Ok(selected)
    }
}

impl<T> Store for MemoryStore<T>
where
    T: Clone + Send + Sync + 'static,
{
    type Error = MemoryStoreError;
    type Item = T;

    async fn paginate_offset(&mut self, limit: i64, offset: i64) -> Result<i64, Self::Error> {
        self.calls.push(StoreCall::Offset { limit, offset });
        self.check_failure()?;

        let skip = usize::try_from(offset).unwrap_or_default();
        let items = self
            .ordered()?
            .into_iter()
            .skip(skip)
            .take(Self::window(limit))
            .cloned()
            .collect();
        self.items = items;

        tracing::trace!(
            target: TRACING_TARGET_MOCK,
            limit,
            offset,
            returned = self.items.len(),
            "Memory store offset page"
        );

        Ok(self.rows.len() as i64)
    }

    async fn paginate_cursor(
        &mut self,
        limit: i64,
        cursor: CursorValue,
        field_name: &str,
        reverse: bool,
    ) -> Result<(), Self::Error> {
        self.calls.push(StoreCall::Cursor {
            limit,
            cursor: cursor.clone(),
            field: field_name.to_owned(),
            reverse,
        });
        self.check_failure()?;

        let mut selected = self.select_past(&cursor, field_name, reverse)?;
        selected.truncate(Self::window(limit));
        self.items = selected;

        tracing::trace!(
            target: TRACING_TARGET_MOCK,
            limit,
            %cursor,
            field_name,
            reverse,
            returned = self.items.len(),
            "Memory store cursor page"
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

impl<T> fmt::Debug for MemoryStore<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("rows", &self.rows.len())
            .field("items", &self.items)
            .field("failure", &self.failure)
            .field("calls", &self.calls)
            .finish()
    }
}

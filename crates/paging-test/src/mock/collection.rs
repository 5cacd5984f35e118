//! In-memory document collection.

use std::cmp::Ordering;
use std::marker::PhantomData;

use mongodb::bson::{self, Bson, Document};
use paging_mongo::{DocumentCollection, FindWindow};
use serde::de::DeserializeOwned;

use crate::TRACING_TARGET_MOCK;

/// Errors returned by [`MemoryCollection`].
#[derive(Debug, thiserror::Error)]
pub enum MemoryCollectionError {
    /// The filter uses a query operator the collection does not evaluate.
    #[error("Unsupported query operator '{0}'")]
    UnsupportedOperator(String),

    /// A matching document could not be decoded into the item type.
    #[error("Deserialization error: {0}")]
    Deserialization(#[from] bson::de::Error),

    /// A sort specification entry is neither `1` nor `-1`.
    #[error("Unsupported sort direction for '{0}'")]
    UnsupportedSort(String),

    /// Failure configured through [`MemoryCollection::failing`].
    #[error("Injected failure: {0}")]
    Injected(String),
}

/// Collection over in-memory bson documents, kept in insertion order.
///
/// Filters support plain equality and the `$eq`, `$ne`, `$gt`, `$gte`, `$lt`
/// and `$lte` operators; sorts take `1`/`-1` per key, with missing fields
/// first in ascending order. Numbers compare across integer and double types;
/// strings, dates, booleans and binaries compare within their own type.
/// A limit of zero means "no limit" and negative limits use their absolute
/// value, as MongoDB does.
#[derive(Debug, Clone)]
pub struct MemoryCollection<T> {
    documents: Vec<Document>,
    failure: Option<String>,
    marker: PhantomData<fn() -> T>,
}

impl<T> MemoryCollection<T> {
    /// Creates a collection holding `documents`.
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            failure: None,
            marker: PhantomData,
        }
    }

    /// Makes every subsequent call fail with `reason`.
    pub fn failing(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }

    /// Returns the stored documents.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    fn check_failure(&self) -> Result<(), MemoryCollectionError> {
        match &self.failure {
            Some(reason) => Err(MemoryCollectionError::Injected(reason.clone())),
            None => Ok(()),
        }
    }

    fn matching(&self, filter: &Document) -> Result<Vec<&Document>, MemoryCollectionError> {
        let mut matched = Vec::new();
        for document in &self.documents {
            if matches_filter(document, filter)? {
                matched.push(document);
            }
        }

        Ok(matched)
    }
}

impl<T> DocumentCollection for MemoryCollection<T>
where
    T: DeserializeOwned + Send,
{
    type Error = MemoryCollectionError;
    type Item = T;

    async fn count(&self, filter: Document) -> Result<u64, Self::Error> {
        self.check_failure()?;
        Ok(self.matching(&filter)?.len() as u64)
    }

    async fn find_all(&self, filter: Document, window: FindWindow) -> Result<Vec<T>, Self::Error> {
        self.check_failure()?;

        let skip = usize::try_from(window.skip.unwrap_or_default()).unwrap_or(usize::MAX);
        let take = match window.limit.unsigned_abs() {
            0 => usize::MAX,
            limit => usize::try_from(limit).unwrap_or(usize::MAX),
        };

        let mut matched = self.matching(&filter)?;
        if let Some(sort) = &window.sort {
            sort_documents(&mut matched, sort)?;
        }

        let items = matched
            .into_iter()
            .skip(skip)
            .take(take)
            .map(|document| bson::from_document(document.clone()))
            .collect::<Result<Vec<T>, _>>()?;

        tracing::trace!(
            target: TRACING_TARGET_MOCK,
            %filter,
            returned = items.len(),
            "Memory collection find"
        );

        Ok(items)
    }
}

fn matches_filter(document: &Document, filter: &Document) -> Result<bool, MemoryCollectionError> {
    for (key, condition) in filter {
        let value = document.get(key);

        let matched = match condition {
            Bson::Document(operators) if is_operator_document(operators) => {
                let mut all = true;
                for (operator, operand) in operators {
                    if !apply_operator(operator, value, operand)? {
                        all = false;
                        break;
                    }
                }
                all
            }
            expected => value.is_some_and(|value| compare(value, expected) == Some(Ordering::Equal)),
        };

        if !matched {
            return Ok(false);
        }
    }

    Ok(true)
}

fn sort_documents(documents: &mut [&Document], sort: &Document) -> Result<(), MemoryCollectionError> {
    let mut keys = Vec::with_capacity(sort.len());
    for (key, direction) in sort {
        let descending = match as_integer(direction) {
            Some(1) => false,
            Some(-1) => true,
            _ => return Err(MemoryCollectionError::UnsupportedSort(key.clone())),
        };
        keys.push((key.as_str(), descending));
    }

    documents.sort_by(|a, b| {
        keys.iter()
            .map(|(key, descending)| {
                let ordering = compare_present(a.get(*key), b.get(*key));
                if *descending { ordering.reverse() } else { ordering }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });

    Ok(())
}

fn compare_present(left: Option<&Bson>, right: Option<&Bson>) -> Ordering {
    match (left, right) {
        (Some(left), Some(right)) => compare(left, right).unwrap_or(Ordering::Equal),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn is_operator_document(document: &Document) -> bool {
    !document.is_empty() && document.keys().all(|key| key.starts_with('$'))
}

fn apply_operator(
    operator: &str,
    value: Option<&Bson>,
    operand: &Bson,
) -> Result<bool, MemoryCollectionError> {
    let ordering = value.and_then(|value| compare(value, operand));

    let matched = match operator {
        "$eq" => ordering == Some(Ordering::Equal),
        "$ne" => ordering != Some(Ordering::Equal),
        "$gt" => ordering == Some(Ordering::Greater),
        "$gte" => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
        "$lt" => ordering == Some(Ordering::Less),
        "$lte" => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
        other => return Err(MemoryCollectionError::UnsupportedOperator(other.to_owned())),
    };

    Ok(matched)
}

fn compare(left: &Bson, right: &Bson) -> Option<Ordering> {
    match (left, right) {
        (Bson::String(a), Bson::String(b)) => Some(a.cmp(b)),
        (Bson::Boolean(a), Bson::Boolean(b)) => Some(a.cmp(b)),
        (Bson::DateTime(a), Bson::DateTime(b)) => Some(a.cmp(b)),
        (Bson::Binary(a), Bson::Binary(b)) if a.subtype == b.subtype => Some(a.bytes.cmp(&b.bytes)),
        (Bson::Null, Bson::Null) => Some(Ordering::Equal),
        _ => match (as_integer(left), as_integer(right)) {
            (Some(a), Some(b)) => Some(a.cmp(&b)),
            _ => as_double(left)?.partial_cmp(&as_double(right)?),
        },
    }
}

fn as_integer(value: &Bson) -> Option<i64> {
    match value {
        Bson::Int32(value) => Some(i64::from(*value)),
        Bson::Int64(value) => Some(*value),
        _ => None,
    }
}

fn as_double(value: &Bson) -> Option<f64> {
    match value {
        Bson::Double(value) => Some(*value),
        Bson::Int32(value) => Some(f64::from(*value)),
        Bson::Int64(value) => Some(*value as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::doc;

    use super::*;

    #[test]
    fn equality_and_ranges() {
        let document = doc! { "id": 3, "name": "c", "score": 1.5 };

        assert!(matches_filter(&document, &doc! { "name": "c" }).expect("filter"));
        assert!(matches_filter(&document, &doc! { "id": 3_i64 }).expect("filter"));
        assert!(matches_filter(&document, &doc! { "id": { "$gt": 2_i64, "$lte": 3 } }).expect("filter"));
        assert!(!matches_filter(&document, &doc! { "id": { "$lt": 3 } }).expect("filter"));
        assert!(matches_filter(&document, &doc! { "score": { "$gt": 1 } }).expect("filter"));
        assert!(!matches_filter(&document, &doc! { "missing": { "$gt": 0 } }).expect("filter"));
        assert!(matches_filter(&document, &doc! { "missing": { "$ne": 0 } }).expect("filter"));
    }

    #[test]
    fn unsupported_operator() {
        let err = matches_filter(&doc! { "id": 1 }, &doc! { "id": { "$in": [1] } })
            .expect_err("operator is not evaluated");
        assert!(matches!(err, MemoryCollectionError::UnsupportedOperator(ref op) if op == "$in"));
    }

    #[tokio::test]
    async fn sort_before_window() {
        let collection: MemoryCollection<Document> =
            MemoryCollection::new((1..=4).map(|id| doc! { "id": id }).collect());

        let window = FindWindow::new(2).with_offset(1).with_sort(Some(doc! { "id": -1 }));
        let found = collection.find_all(Document::new(), window).await.expect("find");
        assert_eq!(found, vec![doc! { "id": 3 }, doc! { "id": 2 }]);

        let window = FindWindow::new(2).with_sort(Some(doc! { "id": "up" }));
        let err = collection
            .find_all(Document::new(), window)
            .await
            .expect_err("direction must be numeric");
        assert!(matches!(err, MemoryCollectionError::UnsupportedSort(ref key) if key == "id"));
    }

    #[tokio::test]
    async fn limit_zero_is_unlimited() {
        let collection: MemoryCollection<Document> =
            MemoryCollection::new((1..=4).map(|id| doc! { "id": id }).collect());

        let all = collection
            .find_all(Document::new(), FindWindow::new(0))
            .await
            .expect("find");
        assert_eq!(all.len(), 4);

        let two = collection
            .find_all(Document::new(), FindWindow::new(-2).with_offset(1))
            .await
            .expect("find");
        assert_eq!(two, vec![doc! { "id": 2 }, doc! { "id": 3 }]);
    }
}

//! Cursor values and comparison direction for cursor-based pagination.

use std::cmp::Ordering;
use std::fmt;

use base64::prelude::*;
use jiff::Timestamp;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumDiscriminants, EnumString, IntoStaticStr};
use uuid::Uuid;

use crate::{Error, Result};

/// An opaque, comparable position in a result set.
///
/// Cursors are usually the ID or the timestamp of the last item a caller has
/// seen. Stores compare the cursor against a single field and keep the rows
/// strictly past it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, EnumDiscriminants)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
#[strum_discriminants(name(CursorKind))]
#[strum_discriminants(derive(Hash, AsRefStr, IntoStaticStr, Display, EnumString))]
#[strum_discriminants(strum(serialize_all = "snake_case"))]
pub enum CursorValue {
    /// Numeric identifier.
    Int(i64),
    /// Textual key.
    Text(String),
    /// UUID identifier.
    Uuid(Uuid),
    /// Point in time.
    Timestamp(Timestamp),
}

impl CursorValue {
    /// Returns the kind of value this cursor holds.
    #[inline]
    pub fn kind(&self) -> CursorKind {
        CursorKind::from(self)
    }

    /// Orders two cursors of the same kind.
    ///
    /// Returns `None` when the kinds differ.
    pub fn compare(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            (Self::Uuid(a), Self::Uuid(b)) => Some(a.cmp(b)),
            (Self::Timestamp(a), Self::Timestamp(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Encodes the cursor as a URL-safe base64 token.
    pub fn encode(&self) -> String {
        let data = format!("{}|{}", self.kind(), self);
        BASE64_URL_SAFE_NO_PAD.encode(data.as_bytes())
    }

    /// Decodes a cursor from a URL-safe base64 token.
    pub fn decode(encoded: &str) -> Result<Self> {
        let bytes = BASE64_URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|err| Error::invalid_cursor(err.to_string()))?;
        let data = String::from_utf8(bytes)
            .map_err(|_| Error::invalid_cursor("token is not valid UTF-8"))?;
        let (kind, value) = data
            .split_once('|')
            .ok_or_else(|| Error::invalid_cursor("missing kind separator"))?;

        let kind: CursorKind = kind
            .parse()
            .map_err(|_| Error::invalid_cursor(format!("unknown cursor kind '{kind}'")))?;

        let cursor = match kind {
            CursorKind::Int => Self::Int(value.parse().map_err(|_| {
                Error::invalid_cursor(format!("'{value}' is not an integer"))
            })?),
            CursorKind::Text => Self::Text(value.to_owned()),
            CursorKind::Uuid => Self::Uuid(
                value
                    .parse()
                    .map_err(|_| Error::invalid_cursor(format!("'{value}' is not a UUID")))?,
            ),
            CursorKind::Timestamp => Self::Timestamp(value.parse().map_err(|_| {
                Error::invalid_cursor(format!("'{value}' is not a timestamp"))
            })?),
        };

        Ok(cursor)
    }
}

impl fmt::Display for CursorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
            Self::Uuid(value) => write!(f, "{value}"),
            Self::Timestamp(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for CursorValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for CursorValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<String> for CursorValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for CursorValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<Uuid> for CursorValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

impl From<Timestamp> for CursorValue {
    fn from(value: Timestamp) -> Self {
        Self::Timestamp(value)
    }
}

/// Strict comparison applied between a field and a cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, IntoStaticStr)]
pub enum Comparison {
    /// Keeps values strictly greater than the cursor.
    #[strum(serialize = "$gt")]
    GreaterThan,
    /// Keeps values strictly less than the cursor.
    #[strum(serialize = "$lt")]
    LessThan,
}

impl Comparison {
    /// Picks the comparison for a pagination direction.
    #[inline]
    pub fn from_reverse(reverse: bool) -> Self {
        if reverse {
            Self::LessThan
        } else {
            Self::GreaterThan
        }
    }

    /// SQL operator for this comparison.
    #[inline]
    pub fn sql_operator(self) -> &'static str {
        match self {
            Self::GreaterThan => ">",
            Self::LessThan => "<",
        }
    }

    /// Document-store query operator for this comparison.
    #[inline]
    pub fn document_operator(self) -> &'static str {
        self.into()
    }

    /// Returns whether `ordering` (field compared to cursor) passes.
    #[inline]
    pub fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::GreaterThan => ordering == Ordering::Greater,
            Self::LessThan => ordering == Ordering::Less,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_token_roundtrip_per_kind() {
        let cursors = [
            CursorValue::Int(-42),
            CursorValue::Text("a|b".into()),
            CursorValue::Uuid(Uuid::new_v4()),
            CursorValue::Timestamp(Timestamp::now()),
        ];

        for cursor in cursors {
            let decoded = CursorValue::decode(&cursor.encode()).expect("decode should succeed");
            assert_eq!(decoded, cursor);
        }
    }

    #[test]
    fn cursor_decode_invalid() {
        assert!(CursorValue::decode("").is_err());
        assert!(CursorValue::decode("not base64!").is_err());

        let unknown = BASE64_URL_SAFE_NO_PAD.encode("float|1.5");
        assert_eq!(
            CursorValue::decode(&unknown),
            Err(Error::invalid_cursor("unknown cursor kind 'float'"))
        );

        let bad_int = BASE64_URL_SAFE_NO_PAD.encode("int|abc");
        assert!(CursorValue::decode(&bad_int).is_err());
    }

    #[test]
    fn cursor_compare_same_kind_only() {
        assert_eq!(
            CursorValue::Int(1).compare(&CursorValue::Int(2)),
            Some(Ordering::Less)
        );
        assert_eq!(
            CursorValue::from("b").compare(&CursorValue::from("a")),
            Some(Ordering::Greater)
        );
        assert_eq!(CursorValue::Int(1).compare(&CursorValue::from("1")), None);
    }

    #[test]
    fn cursor_kind_names() {
        assert_eq!(CursorValue::Int(1).kind().as_ref(), "int");
        assert_eq!(CursorValue::Timestamp(Timestamp::UNIX_EPOCH).kind().to_string(), "timestamp");
    }

    #[test]
    fn comparison_operators() {
        assert_eq!(Comparison::from_reverse(false), Comparison::GreaterThan);
        assert_eq!(Comparison::from_reverse(true), Comparison::LessThan);
        assert_eq!(Comparison::GreaterThan.sql_operator(), ">");
        assert_eq!(Comparison::LessThan.document_operator(), "$lt");
        assert!(Comparison::GreaterThan.accepts(Ordering::Greater));
        assert!(!Comparison::GreaterThan.accepts(Ordering::Equal));
        assert!(Comparison::LessThan.accepts(Ordering::Less));
    }
}

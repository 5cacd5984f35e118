//! Cursor constraints expressed as filter documents.

use mongodb::bson::{self, Bson, Document};
use paging_core::{Comparison, CursorValue};

/// Converts a cursor into the bson value it is compared against.
///
/// Timestamps become bson dates (millisecond precision) and UUIDs become
/// binary subtype 4.
pub fn cursor_to_bson(cursor: CursorValue) -> Bson {
    match cursor {
        CursorValue::Int(value) => Bson::Int64(value),
        CursorValue::Text(value) => Bson::String(value),
        CursorValue::Uuid(value) => Bson::from(bson::Uuid::from_bytes(value.into_bytes())),
        CursorValue::Timestamp(value) => {
            Bson::DateTime(bson::DateTime::from_millis(value.as_millisecond()))
        }
    }
}

/// Builds the range constraint `{ "$gt" | "$lt": cursor }`.
pub fn cursor_constraint(cursor: CursorValue, reverse: bool) -> Document {
    let operator = Comparison::from_reverse(reverse).document_operator();

    let mut constraint = Document::new();
    constraint.insert(operator, cursor_to_bson(cursor));
    constraint
}

/// Writes the cursor constraint for `field_name` into `filter`.
///
/// Any constraint previously stored under `field_name` is replaced; the rest
/// of the filter is left untouched.
pub fn apply_cursor(filter: &mut Document, field_name: &str, cursor: CursorValue, reverse: bool) {
    filter.insert(field_name, cursor_constraint(cursor, reverse));
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use mongodb::bson::doc;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn constraint_direction() {
        assert_eq!(
            cursor_constraint(CursorValue::Int(2), false),
            doc! { "$gt": 2_i64 }
        );
        assert_eq!(
            cursor_constraint(CursorValue::from("m"), true),
            doc! { "$lt": "m" }
        );
    }

    #[test]
    fn cursor_values_to_bson() {
        let ts: Timestamp = "2024-03-01T12:00:00.250Z".parse().expect("valid timestamp");
        assert_eq!(
            cursor_to_bson(CursorValue::Timestamp(ts)),
            Bson::DateTime(bson::DateTime::from_millis(ts.as_millisecond()))
        );

        let id = Uuid::new_v4();
        let Bson::Binary(binary) = cursor_to_bson(CursorValue::Uuid(id)) else {
            panic!("uuid cursors should become binary values");
        };
        assert_eq!(binary.bytes, id.as_bytes().to_vec());
    }

    #[test]
    fn apply_cursor_keeps_other_constraints() {
        let mut filter = doc! { "status": "active", "id": { "$gt": 1_i64 } };

        apply_cursor(&mut filter, "id", CursorValue::Int(5), true);

        assert_eq!(filter, doc! { "status": "active", "id": { "$lt": 5_i64 } });
    }
}

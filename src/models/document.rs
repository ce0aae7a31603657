//! Wire representation of documents returned by the remote document store.
//!
//! Field values arrive tagged with their store type (`stringValue`,
//! `timestampValue`, ...). [`Document`] keeps them in that shape and offers
//! lenient typed accessors; the per-collection conversions in the sibling
//! modules decide which fields are required.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field holding the creation timestamp on every collection.
pub const CREATED_AT_FIELD: &str = "createdAt";

/// A single typed field value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    /// 64-bit integers travel as decimal strings.
    IntegerValue(String),
    DoubleValue(f64),
    TimestampValue(DateTime<Utc>),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(GeoPoint),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoPoint {
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MapValue {
    #[serde(default)]
    pub fields: HashMap<String, Value>,
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::StringValue(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::BooleanValue(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer view of numeric values; doubles are truncated.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::IntegerValue(raw) => raw.trim().parse().ok(),
            Value::DoubleValue(d) if d.is_finite() => Some(d.trunc() as i64),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self {
            Value::TimestampValue(ts) => Some(*ts),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::ArrayValue(array) => Some(&array.values),
            _ => None,
        }
    }

    fn type_rank(&self) -> u8 {
        match self {
            Value::NullValue(_) => 0,
            Value::BooleanValue(_) => 1,
            Value::IntegerValue(_) | Value::DoubleValue(_) => 2,
            Value::TimestampValue(_) => 3,
            Value::StringValue(_) => 4,
            Value::BytesValue(_) => 5,
            Value::ReferenceValue(_) => 6,
            Value::GeoPointValue(_) => 7,
            Value::ArrayValue(_) => 8,
            Value::MapValue(_) => 9,
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Value::IntegerValue(raw) => raw.trim().parse::<i64>().ok().map(|i| i as f64),
            Value::DoubleValue(d) => Some(*d),
            _ => None,
        }
    }

    /// Orders values the way the store orders mixed-type fields: by type
    /// first, then by value within a type.
    pub fn store_cmp(&self, other: &Value) -> Ordering {
        let by_type = self.type_rank().cmp(&other.type_rank());
        if by_type != Ordering::Equal {
            return by_type;
        }
        match (self, other) {
            (Value::BooleanValue(a), Value::BooleanValue(b)) => a.cmp(b),
            (Value::TimestampValue(a), Value::TimestampValue(b)) => a.cmp(b),
            (Value::StringValue(a), Value::StringValue(b))
            | (Value::BytesValue(a), Value::BytesValue(b))
            | (Value::ReferenceValue(a), Value::ReferenceValue(b)) => a.cmp(b),
            (Value::ArrayValue(a), Value::ArrayValue(b)) => {
                for (x, y) in a.values.iter().zip(&b.values) {
                    let ord = x.store_cmp(y);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                }
                a.values.len().cmp(&b.values.len())
            }
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.total_cmp(&b),
                _ => Ordering::Equal,
            },
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::StringValue(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::StringValue(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::BooleanValue(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::IntegerValue(value.to_string())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::TimestampValue(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::ArrayValue(ArrayValue {
            values: values.into_iter().map(Into::into).collect(),
        })
    }
}

/// Document exactly as the store serializes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawDocument {
    /// Full resource name ending in `/{collection}/{id}`.
    pub name: String,
    #[serde(default)]
    pub fields: HashMap<String, Value>,
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub update_time: Option<DateTime<Utc>>,
}

/// One record of a collection: its identifier plus typed fields.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub id: String,
    pub fields: HashMap<String, Value>,
}

impl From<RawDocument> for Document {
    fn from(raw: RawDocument) -> Self {
        let id = raw
            .name
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            id,
            fields: raw.fields,
        }
    }
}

impl Document {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: HashMap::new(),
        }
    }

    /// Builder-style field setter, mostly useful for fixtures.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn string(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// String field or the empty string when absent or not a string.
    pub fn string_or_default(&self, field: &str) -> String {
        self.string(field).unwrap_or_default().to_string()
    }

    pub fn bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(Value::as_bool)
    }

    pub fn integer(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_i64)
    }

    pub fn timestamp(&self, field: &str) -> Option<DateTime<Utc>> {
        self.get(field).and_then(Value::as_timestamp)
    }

    /// String elements of an array field; other element types are skipped.
    pub fn string_array(&self, field: &str) -> Vec<String> {
        self.get(field)
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Creation time normalized from the store timestamp.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.timestamp(CREATED_AT_FIELD)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_raw() -> RawDocument {
        serde_json::from_value(json!({
            "name": "projects/shop/databases/(default)/documents/products/p1",
            "fields": {
                "title": { "stringValue": "Bunny" },
                "order": { "integerValue": "3" },
                "price": { "doubleValue": 4.5 },
                "isFeatured": { "booleanValue": true },
                "createdAt": { "timestampValue": "2024-01-01T10:00:00.123456Z" },
                "tags": { "arrayValue": { "values": [
                    { "stringValue": "cute" },
                    { "integerValue": "1" },
                    { "stringValue": "gift" }
                ] } },
                "empty": { "arrayValue": {} },
                "note": { "nullValue": null }
            },
            "createTime": "2024-01-01T10:00:00Z",
            "updateTime": "2024-01-02T10:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn takes_id_from_last_name_segment() {
        let doc = Document::from(sample_raw());
        assert_eq!(doc.id, "p1");
    }

    #[test]
    fn typed_accessors_read_wire_values() {
        let doc = Document::from(sample_raw());
        assert_eq!(doc.string("title"), Some("Bunny"));
        assert_eq!(doc.integer("order"), Some(3));
        assert_eq!(doc.integer("price"), Some(4));
        assert_eq!(doc.bool("isFeatured"), Some(true));
        assert_eq!(doc.string_array("tags"), vec!["cute", "gift"]);
        assert!(doc.string_array("empty").is_empty());
        assert_eq!(doc.get("note"), Some(&Value::NullValue(())));
        assert_eq!(
            doc.created_at().unwrap().to_rfc3339(),
            "2024-01-01T10:00:00.123456+00:00"
        );
    }

    #[test]
    fn missing_or_mistyped_fields_read_as_absent() {
        let doc = Document::new("x").with("createdAt", "2024-01-01");
        assert_eq!(doc.created_at(), None);
        assert_eq!(doc.string_or_default("title"), "");
        assert!(doc.string_array("tags").is_empty());
        assert_eq!(doc.bool("isFeatured"), None);
    }

    #[test]
    fn store_ordering_ranks_types_before_values() {
        assert_eq!(
            Value::from(5_i64).store_cmp(&Value::DoubleValue(5.5)),
            Ordering::Less
        );
        assert_eq!(
            Value::from("a").store_cmp(&Value::from(100_i64)),
            Ordering::Greater
        );
        assert_eq!(
            Value::NullValue(()).store_cmp(&Value::from(false)),
            Ordering::Less
        );
    }
}

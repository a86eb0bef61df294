//! # Unmarshaled Output Tree
//!
//! [`Unmarshaled`] is what the engine hands back: the shape of
//! `serde_json::Value` plus a [`Record`] variant for object branches bound
//! to a named definition. Trees are built fresh per call and owned by the
//! caller.

use std::collections::BTreeMap;

use serde::ser::{Serialize, Serializer};
use serde_json::{Number, Value};

use crate::record::Record;

/// Mapping node of the output tree. Key order is not significant.
pub type Mapping = BTreeMap<String, Unmarshaled>;

/// A node of the output value tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Unmarshaled {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<Unmarshaled>),
    Mapping(Mapping),
    /// An object bound to a record type.
    Record(Record),
}

impl Unmarshaled {
    /// Deep-copy a raw value into an output tree without consulting any
    /// schema.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => Self::Number(n.clone()),
            Value::String(s) => Self::String(s.clone()),
            Value::Array(items) => Self::Sequence(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => Self::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert back to a raw value. Records become plain objects.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Number(n) => Value::Number(n.clone()),
            Self::String(s) => Value::String(s.clone()),
            Self::Sequence(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            Self::Mapping(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Self::Record(record) => {
                let mut object = serde_json::Map::new();
                for (name, value) in record.fields() {
                    object.insert(name.to_string(), value.to_json());
                }
                for (name, value) in record.additional() {
                    object.insert(name.clone(), value.to_json());
                }
                Value::Object(object)
            }
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Unmarshaled]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(record) => Some(record),
            _ => None,
        }
    }

    /// Field lookup on either a mapping or a record.
    pub fn get(&self, key: &str) -> Option<&Unmarshaled> {
        match self {
            Self::Mapping(map) => map.get(key),
            Self::Record(record) => record.get(key),
            _ => None,
        }
    }
}

impl From<Value> for Unmarshaled {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&Value> for Unmarshaled {
    fn from(value: &Value) -> Self {
        Self::from_json(value)
    }
}

impl From<Record> for Unmarshaled {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<Mapping> for Unmarshaled {
    fn from(map: Mapping) -> Self {
        Self::Mapping(map)
    }
}

impl Serialize for Unmarshaled {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Number(n) => n.serialize(serializer),
            Self::String(s) => serializer.serialize_str(s),
            Self::Sequence(items) => serializer.collect_seq(items),
            Self::Mapping(map) => serializer.collect_map(map),
            Self::Record(record) => record.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordDescriptor;
    use proptest::prelude::*;
    use serde_json::json;

    fn arb_json() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
        ];
        leaf.prop_recursive(4, 32, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..6)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    #[test]
    fn owned_and_borrowed_conversions_agree() {
        let raw = json!({"number": 1600, "tags": ["home", null, true], "ratio": 0.5});
        assert_eq!(Unmarshaled::from(raw.clone()), Unmarshaled::from_json(&raw));
    }

    #[test]
    fn get_reads_mappings_and_records() {
        let mapping = Unmarshaled::from(json!({"name": "foo"}));
        assert_eq!(mapping.get("name").and_then(Unmarshaled::as_str), Some("foo"));
        assert!(mapping.get("missing").is_none());

        let descriptor = RecordDescriptor::new("Pet", ["name"]);
        let fields = mapping.as_mapping().cloned().unwrap_or_default();
        let record = Unmarshaled::from(Record::from_fields(&descriptor, fields));
        assert_eq!(record.get("name").and_then(Unmarshaled::as_str), Some("foo"));
        assert!(record.as_record().is_some());
        assert!(record.as_mapping().is_none());
        assert!(Unmarshaled::String("x".into()).get("name").is_none());
    }

    #[test]
    fn record_flattens_to_plain_object() {
        let descriptor = RecordDescriptor::new("Location", ["longitude", "latitude"]);
        let mut fields = Mapping::new();
        fields.insert("longitude".into(), Unmarshaled::from(json!(100.1)));
        fields.insert("latitude".into(), Unmarshaled::from(json!(99.9)));
        let value = Unmarshaled::Sequence(vec![Record::from_fields(&descriptor, fields).into()]);
        assert_eq!(value.to_json(), json!([{"longitude": 100.1, "latitude": 99.9}]));
        assert_eq!(
            serde_json::to_value(&value).expect("serialize"),
            json!([{"longitude": 100.1, "latitude": 99.9}])
        );
    }

    proptest! {
        #[test]
        fn json_conversion_is_lossless(raw in arb_json()) {
            let tree = Unmarshaled::from_json(&raw);
            prop_assert_eq!(tree.to_json(), raw.clone());
            prop_assert_eq!(serde_json::to_value(&tree).unwrap(), raw);
        }
    }
}

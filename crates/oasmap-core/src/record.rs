//! # Records: Typed Bundles for Named Definitions
//!
//! A [`RecordDescriptor`] is produced at ingestion time for each named
//! definition that acquires a model type. A [`Record`] is an immutable
//! instance of one, built by the model binder from an assembled field
//! mapping.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::value::{Mapping, Unmarshaled};

/// Name and ordered field list of a generated record type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordDescriptor {
    name: String,
    fields: Vec<String>,
}

impl RecordDescriptor {
    pub fn new<I, S>(name: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Field names in declaration order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

/// Instance of a record type.
///
/// Declared fields keep descriptor order. Keys the additional-properties
/// policy let through are kept separately in [`Record::additional`].
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    model: String,
    fields: Vec<(String, Unmarshaled)>,
    additional: Mapping,
}

impl Record {
    /// Build a record from an assembled mapping.
    ///
    /// Descriptor fields present in `values` are taken by name, in
    /// descriptor order. A descriptor field absent from `values` is left out
    /// of the record, so `get` returns `None` for it. Leftover entries
    /// become additional fields.
    pub fn from_fields(descriptor: &RecordDescriptor, mut values: Mapping) -> Self {
        let fields = descriptor
            .fields()
            .iter()
            .filter_map(|name| values.remove(name).map(|value| (name.clone(), value)))
            .collect();

        Self {
            model: descriptor.name().to_string(),
            fields,
            additional: values,
        }
    }

    /// Name of the record type.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Look up a declared or additional field.
    pub fn get(&self, name: &str) -> Option<&Unmarshaled> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
            .or_else(|| self.additional.get(name))
    }

    /// Declared fields in descriptor order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Unmarshaled)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn additional(&self) -> &Mapping {
        &self.additional
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + self.additional.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        for (name, value) in &self.additional {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn location() -> RecordDescriptor {
        RecordDescriptor::new("Location", ["longitude", "latitude"])
    }

    fn mapping(value: serde_json::Value) -> Mapping {
        match Unmarshaled::from(value) {
            Unmarshaled::Mapping(m) => m,
            other => panic!("expected mapping, got {other:?}"),
        }
    }

    #[test]
    fn descriptor_preserves_field_order() {
        let d = location();
        assert_eq!(d.name(), "Location");
        assert_eq!(d.fields(), ["longitude", "latitude"]);
    }

    #[test]
    fn record_takes_fields_in_descriptor_order() {
        let record = Record::from_fields(
            &location(),
            mapping(json!({"latitude": 99.9, "longitude": 100.1})),
        );
        assert_eq!(record.model(), "Location");
        let names: Vec<&str> = record.fields().map(|(n, _)| n).collect();
        assert_eq!(names, ["longitude", "latitude"]);
        assert_eq!(record.get("latitude"), Some(&Unmarshaled::from(json!(99.9))));
        assert!(record.additional().is_empty());
    }

    #[test]
    fn absent_descriptor_field_is_left_out() {
        let record = Record::from_fields(&location(), mapping(json!({"longitude": 1})));
        assert_eq!(record.get("latitude"), None);
        let names: Vec<&str> = record.fields().map(|(n, _)| n).collect();
        assert_eq!(names, ["longitude"]);
        assert_eq!(
            serde_json::to_value(&record).expect("serialize"),
            json!({"longitude": 1})
        );
    }

    #[test]
    fn leftover_entries_become_additional_fields() {
        let record = Record::from_fields(
            &location(),
            mapping(json!({"longitude": 1, "latitude": 2, "datum": "WGS84"})),
        );
        assert_eq!(record.additional().len(), 1);
        assert_eq!(record.get("datum"), Some(&Unmarshaled::String("WGS84".into())));
        assert_eq!(record.fields().count(), 2);
    }

    #[test]
    fn record_serializes_as_a_json_object() {
        let record = Record::from_fields(
            &location(),
            mapping(json!({"longitude": 100.1, "latitude": 99.9})),
        );
        let value = serde_json::to_value(&record).expect("serialize");
        assert_eq!(value, json!({"longitude": 100.1, "latitude": 99.9}));
    }
}

//! Declarative field extraction from domain objects into JSON records.
//!
//! Every entity exposes two explicit accessor tables: [`Mappable::get`] for plain values and
//! [`Mappable::is`] for boolean flags. A [`FieldMapping`] lists which accessors to read, and
//! [`map_object`] resolves each entry against those tables.

use serde_json::{Map, Value};
use thiserror::Error;

/// A JSON object produced by the mapper. Keys keep mapping order.
pub type Record = Map<String, Value>;

/// Ordered `(rpc field, accessor)` pairs.
///
/// The first column is the field name the Transmission daemon uses, and is what gets requested in
/// `torrent-get`. The second column is the accessor name, which is also the output key.
pub type FieldMapping = &'static [(&'static str, &'static str)];

/// Error returned when a mapping cannot be applied.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// The mapping has no entries.
    #[error("invalid arguments for map_object: empty mapping")]
    EmptyMapping,
}

/// An entity that can be flattened into a [`Record`].
pub trait Mappable {
    /// The default mapping for this entity type.
    const MAPPING: FieldMapping;

    /// Returns the value of the named accessor, or `None` if the entity has no such accessor.
    fn get(&self, accessor: &str) -> Option<Value>;

    /// Returns the value of the named boolean accessor, or `None` if there is none.
    fn is(&self, _accessor: &str) -> Option<bool> {
        None
    }
}

/// Extracts the accessors named in `mapping` from `object`.
///
/// For each entry the `get` accessor is tried first, then the `is` accessor. Entries that resolve
/// to neither are left out of the record.
pub fn map_object<T: Mappable + ?Sized>(
    object: &T,
    mapping: &[(&str, &str)],
) -> Result<Record, MappingError> {
    if mapping.is_empty() {
        return Err(MappingError::EmptyMapping);
    }

    let mut record = Record::new();
    for (_, accessor) in mapping {
        if let Some(value) = object.get(accessor) {
            record.insert((*accessor).to_string(), value);
        } else if let Some(flag) = object.is(accessor) {
            record.insert((*accessor).to_string(), Value::Bool(flag));
        }
    }
    Ok(record)
}

/// Maps every element of `items` with its type's default mapping, preserving order.
pub fn map_all<T: Mappable>(items: &[T]) -> Result<Vec<Value>, MappingError> {
    items
        .iter()
        .map(|item| map_object(item, T::MAPPING).map(Value::Object))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    struct Sample {
        name: String,
        size: u64,
        hidden: bool,
    }

    impl Mappable for Sample {
        const MAPPING: FieldMapping = &[("name", "name"), ("length", "size"), ("hidden", "hidden")];

        fn get(&self, accessor: &str) -> Option<Value> {
            match accessor {
                "name" => Some(self.name.clone().into()),
                "size" => Some(self.size.into()),
                _ => None,
            }
        }

        fn is(&self, accessor: &str) -> Option<bool> {
            match accessor {
                "hidden" => Some(self.hidden),
                // Shadowed by `get`.
                "name" => Some(true),
                _ => None,
            }
        }
    }

    fn sample() -> Sample {
        Sample {
            name: "ubuntu.iso".into(),
            size: 42,
            hidden: true,
        }
    }

    #[test]
    fn maps_get_and_is_accessors_under_accessor_names() {
        let record = map_object(&sample(), Sample::MAPPING).unwrap();

        assert_eq!(
            Value::Object(record),
            json!({"name": "ubuntu.iso", "size": 42, "hidden": true})
        );
    }

    #[test]
    fn get_accessor_wins_over_is_accessor() {
        let record = map_object(&sample(), &[("name", "name")]).unwrap();
        assert_eq!(record.get("name"), Some(&json!("ubuntu.iso")));
    }

    #[test]
    fn unknown_accessors_are_omitted() {
        let mapping = [("name", "name"), ("peers", "peers"), ("x", "missing")];
        let record = map_object(&sample(), &mapping).unwrap();

        assert_eq!(record.len(), 1);
        assert!(record.contains_key("name"));
        assert!(!record.contains_key("peers"));
        assert!(!record.contains_key("missing"));
    }

    #[test]
    fn empty_mapping_is_rejected() {
        assert_eq!(
            map_object(&sample(), &[]).unwrap_err(),
            MappingError::EmptyMapping
        );
    }

    #[test]
    fn keys_follow_mapping_order() {
        let mapping = [("hidden", "hidden"), ("length", "size"), ("name", "name")];
        let record = map_object(&sample(), &mapping).unwrap();
        let keys: Vec<&str> = record.keys().map(String::as_str).collect();

        assert_eq!(keys, ["hidden", "size", "name"]);
    }

    #[test]
    fn values_are_read_at_call_time() {
        let mut sample = sample();
        let before = map_object(&sample, Sample::MAPPING).unwrap();
        sample.size = 7;
        let after = map_object(&sample, Sample::MAPPING).unwrap();

        assert_eq!(before["size"], json!(42));
        assert_eq!(after["size"], json!(7));
    }

    #[test]
    fn map_all_preserves_order() {
        let items = vec![
            Sample {
                name: "a".into(),
                size: 1,
                hidden: false,
            },
            Sample {
                name: "b".into(),
                size: 2,
                hidden: false,
            },
        ];
        let values = map_all(&items).unwrap();

        assert_eq!(values[0]["name"], json!("a"));
        assert_eq!(values[1]["name"], json!("b"));
        assert!(map_all::<Sample>(&[]).unwrap().is_empty());
    }
}

//! The decoded data tree, independent of the format it was read from.
//!
//! Every decoder produces the same [`Value`] shape. Integers are normalised
//! so that the comparator sees one category per number family: anything that
//! fits in an `i64` becomes [`Value::Int`], and only larger positive integers
//! become [`Value::Uint`]. Floats are never merged with integers.

use serde::ser::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// A dynamically-typed node of the data tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    /// Only used for integers above `i64::MAX`.
    Uint(u64),
    Float(f64),
    String(String),
    Sequence(Vec<Value>),
    /// Key order follows the map, not the source document.
    Mapping(BTreeMap<String, Value>),
}

/// The tag of a [`Value`], used in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Null,
    Bool,
    Int,
    Uint,
    Float,
    String,
    Sequence,
    Mapping,
    /// A template-side object with no data-tree counterpart, such as a time.
    Opaque,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Null => "null",
            Kind::Bool => "bool",
            Kind::Int => "integer",
            Kind::Uint => "unsigned integer",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Sequence => "sequence",
            Kind::Mapping => "mapping",
            Kind::Opaque => "object",
        };
        f.write_str(name)
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Uint(_) => Kind::Uint,
            Value::Float(_) => Kind::Float,
            Value::String(_) => Kind::String,
            Value::Sequence(_) => Kind::Sequence,
            Value::Mapping(_) => Kind::Mapping,
        }
    }

    /// Look up `key` when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Mapping(map) => map.get(key),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Builds an integer value, preferring the signed representation.
    pub fn from_u64(n: u64) -> Value {
        match i64::try_from(n) {
            Ok(i) => Value::Int(i),
            Err(_) => Value::Uint(n),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                number(n.as_i64(), n.as_u64(), n.as_f64().unwrap_or(f64::NAN))
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<serde_yaml::Value> for Value {
    fn from(yaml: serde_yaml::Value) -> Self {
        match yaml {
            serde_yaml::Value::Null => Value::Null,
            serde_yaml::Value::Bool(b) => Value::Bool(b),
            serde_yaml::Value::Number(n) => {
                number(n.as_i64(), n.as_u64(), n.as_f64().unwrap_or(f64::NAN))
            }
            serde_yaml::Value::String(s) => Value::String(s),
            serde_yaml::Value::Sequence(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            serde_yaml::Value::Mapping(map) => Value::Mapping(
                map.into_iter()
                    .map(|(k, v)| (yaml_key(k), Value::from(v)))
                    .collect(),
            ),
            serde_yaml::Value::Tagged(tagged) => Value::from(tagged.value),
        }
    }
}

impl From<toml::Value> for Value {
    fn from(toml: toml::Value) -> Self {
        match toml {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::Int(i),
            toml::Value::Float(f) => Value::Float(f),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => Value::String(dt.to_string()),
            toml::Value::Array(items) => {
                Value::Sequence(items.into_iter().map(Value::from).collect())
            }
            toml::Value::Table(table) => Value::Mapping(
                table
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

fn number(signed: Option<i64>, unsigned: Option<u64>, float: f64) -> Value {
    match (unsigned, signed) {
        (Some(u), _) => Value::from_u64(u),
        (None, Some(i)) => Value::Int(i),
        (None, None) => Value::Float(float),
    }
}

/// YAML allows any node as a key. Scalars are stringified, anything else is
/// serialized back to YAML text.
fn yaml_key(key: serde_yaml::Value) -> String {
    match key {
        serde_yaml::Value::String(s) => s,
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Tagged(tagged) => yaml_key(tagged.value),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Uint(u) => serializer.serialize_u64(*u),
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::String(s) => serializer.serialize_str(s),
            Value::Sequence(items) => serializer.collect_seq(items),
            Value::Mapping(map) => serializer.collect_map(map),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_integers_prefer_signed() {
        assert_eq!(Value::from(json!(3)), Value::Int(3));
        assert_eq!(Value::from(json!(-3)), Value::Int(-3));
        assert_eq!(Value::from(json!(u64::MAX)), Value::Uint(u64::MAX));
        assert_eq!(Value::from(json!(1.5)), Value::Float(1.5));
    }

    #[test]
    fn yaml_scalar_keys_are_stringified() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("1: one\ntrue: yes\n").unwrap();
        let value = Value::from(yaml);
        assert_eq!(value.get("1"), Some(&Value::from("one")));
        assert_eq!(value.get("true"), Some(&Value::from("yes")));
    }

    #[test]
    fn yaml_tags_are_transparent() {
        let yaml: serde_yaml::Value = serde_yaml::from_str("!thing 42").unwrap();
        assert_eq!(Value::from(yaml), Value::Int(42));
    }

    #[test]
    fn toml_datetimes_become_strings() {
        let toml: toml::Value = toml::from_str("when = 1979-05-27T07:32:00Z").unwrap();
        let value = Value::from(toml);
        assert_eq!(value.get("when"), Some(&Value::from("1979-05-27T07:32:00Z")));
    }

    #[test]
    fn from_u64_keeps_unsigned_only_when_needed() {
        assert_eq!(Value::from_u64(7), Value::Int(7));
        assert_eq!(Value::from_u64(u64::MAX), Value::Uint(u64::MAX));
    }

    #[test]
    fn serializes_back_to_json() {
        let value = Value::from(json!({"a": [1, "x", null, true, 2.5]}));
        let back = serde_json::to_value(&value).unwrap();
        assert_eq!(back, json!({"a": [1, "x", null, true, 2.5]}));
    }
}

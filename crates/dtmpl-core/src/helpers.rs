//! The helper function table exposed to templates.
//!
//! | name           | arguments        | result                                   |
//! |----------------|------------------|------------------------------------------|
//! | `notLast`      | seq, index       | `false` only for the last valid index    |
//! | `timeParse`    | layout, text     | time (see [`crate::time`])               |
//! | `timeNow`      |                  | current time                             |
//! | `stringSplit`  | s, sep           | list of pieces                           |
//! | `stringFields` | s                | list of whitespace-separated words       |
//! | `stringJoin`   | seq, sep         | joined string                            |
//! | `stringUpper`  | s                | upper case                               |
//! | `stringLower`  | s                | lower case                               |
//! | `stringTitle`  | s                | every character in title case            |
//! | `sliceSort`    | seq              | ascending copy                           |
//! | `sliceSortKey` | seq, key         | stable copy ordered by `key`             |
//! | `sliceReverse` | seq              | reversed copy                            |
//!
//! The table is built once and installed into an environment before any
//! template is compiled, so calls resolve at parse time.

use crate::compare::{Lookup, Scalar, Sortable};
use crate::error::OrderError;
use crate::order::{reverse_values, sort_values, sort_values_by_field};
use crate::time::Time;
use crate::value::Kind;
use minijinja::value::ValueKind;
use minijinja::{Environment, Error, ErrorKind, Value};
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Immutable registry of the named helper functions.
#[derive(Debug, Clone)]
pub struct HelperTable {
    entries: BTreeMap<&'static str, Value>,
}

impl HelperTable {
    pub fn new() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("notLast", Value::from_function(not_last));
        entries.insert("timeParse", Value::from_function(time_parse));
        entries.insert("timeNow", Value::from_function(time_now));
        entries.insert("stringSplit", Value::from_function(string_split));
        entries.insert("stringFields", Value::from_function(string_fields));
        entries.insert("stringJoin", Value::from_function(string_join));
        entries.insert("stringUpper", Value::from_function(string_upper));
        entries.insert("stringLower", Value::from_function(string_lower));
        entries.insert("stringTitle", Value::from_function(string_title));
        entries.insert("sliceSort", Value::from_function(slice_sort));
        entries.insert("sliceSortKey", Value::from_function(slice_sort_key));
        entries.insert("sliceReverse", Value::from_function(slice_reverse));
        Self { entries }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }

    /// The callable registered under `name`.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Bind every helper as a global callable of `env`.
    pub fn install(&self, env: &mut Environment<'_>) {
        for (name, function) in &self.entries {
            env.add_global(*name, function.clone());
        }
    }
}

impl Default for HelperTable {
    fn default() -> Self {
        Self::new()
    }
}

fn not_last(seq: Value, index: i64) -> Result<bool, Error> {
    let len = seq.len().ok_or_else(|| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("notLast: expected a sequence, got {}", kind_of(&seq)),
        )
    })?;
    Ok(index != len as i64 - 1)
}

fn time_parse(layout: String, text: String) -> Result<Value, Error> {
    Time::parse(&layout, &text).map(Value::from_object).map_err(|e| {
        Error::new(
            ErrorKind::InvalidOperation,
            format!("timeParse: cannot parse {text:?} with layout {layout:?}: {e}"),
        )
    })
}

fn time_now() -> Value {
    Value::from_object(Time::now())
}

fn string_split(s: String, sep: String) -> Vec<String> {
    if sep.is_empty() {
        s.chars().map(String::from).collect()
    } else {
        s.split(sep.as_str()).map(String::from).collect()
    }
}

fn string_fields(s: String) -> Vec<String> {
    s.split_whitespace().map(String::from).collect()
}

fn string_join(items: Vec<Value>, sep: String) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join(&sep)
}

fn string_upper(s: String) -> String {
    s.to_uppercase()
}

fn string_lower(s: String) -> String {
    s.to_lowercase()
}

fn string_title(s: String) -> String {
    s.chars().flat_map(char::to_uppercase).collect()
}

fn slice_sort(seq: Vec<Value>) -> Result<Value, Error> {
    sort_values(&seq)
        .map(Value::from)
        .map_err(|e| helper_error("sliceSort", e))
}

fn slice_sort_key(seq: Vec<Value>, key: String) -> Result<Value, Error> {
    sort_values_by_field(&seq, &key)
        .map(Value::from)
        .map_err(|e| helper_error("sliceSortKey", e))
}

fn slice_reverse(seq: Vec<Value>) -> Value {
    Value::from(reverse_values(&seq))
}

fn helper_error(helper: &str, err: OrderError) -> Error {
    Error::new(ErrorKind::InvalidOperation, format!("{helper}: {err}"))
}

/// Classify a template value the way the data tree would be classified.
pub(crate) fn kind_of(value: &Value) -> Kind {
    match value.kind() {
        ValueKind::Undefined | ValueKind::None => Kind::Null,
        ValueKind::Bool => Kind::Bool,
        ValueKind::Number if value.is_integer() => {
            if i64::try_from(value.clone()).is_ok() {
                Kind::Int
            } else {
                Kind::Uint
            }
        }
        ValueKind::Number => Kind::Float,
        ValueKind::String => Kind::String,
        ValueKind::Seq => Kind::Sequence,
        ValueKind::Map => Kind::Mapping,
        _ => Kind::Opaque,
    }
}

impl Sortable for Value {
    fn scalar(&self) -> Scalar<'_> {
        match kind_of(self) {
            Kind::Int => i64::try_from(self.clone()).map_or(Scalar::Other(Kind::Int), Scalar::Int),
            Kind::Uint => {
                u64::try_from(self.clone()).map_or(Scalar::Other(Kind::Uint), Scalar::Uint)
            }
            Kind::Float => {
                f64::try_from(self.clone()).map_or(Scalar::Other(Kind::Float), Scalar::Float)
            }
            Kind::String => self.as_str().map_or(Scalar::Other(Kind::String), Scalar::Str),
            other => Scalar::Other(other),
        }
    }

    fn lookup(&self, key: &str) -> Lookup<'_, Self> {
        match kind_of(self) {
            Kind::Mapping => match self.get_item(&Value::from(key)) {
                Ok(found) if !found.is_undefined() => Lookup::Found(Cow::Owned(found)),
                _ => Lookup::Missing,
            },
            other => Lookup::NotAMapping(other),
        }
    }
}

//! Generic comparison over dynamically-typed scalars.
//!
//! Two values are comparable only when they fall into the same category:
//! signed integers, unsigned integers, floats or strings. Every other pairing
//! (a string against an integer, a bool, a nested sequence) is an error, never
//! a silent coercion.
//!
//! The [`Sortable`] trait lets the same logic run over the decoded
//! [`Value`] tree and over the template engine's own values.

use crate::error::OrderError;
use crate::value::{Kind, Value};
use std::borrow::Cow;
use std::cmp::Ordering;

/// A borrowed scalar view of a value, as seen by the comparator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(&'a str),
    /// Anything without a natural ordering.
    Other(Kind),
}

/// The comparability partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Signed,
    Unsigned,
    Float,
    String,
}

impl Scalar<'_> {
    pub fn kind(&self) -> Kind {
        match self {
            Scalar::Int(_) => Kind::Int,
            Scalar::Uint(_) => Kind::Uint,
            Scalar::Float(_) => Kind::Float,
            Scalar::Str(_) => Kind::String,
            Scalar::Other(kind) => *kind,
        }
    }

    pub fn category(&self) -> Option<Category> {
        match self {
            Scalar::Int(_) => Some(Category::Signed),
            Scalar::Uint(_) => Some(Category::Unsigned),
            Scalar::Float(_) => Some(Category::Float),
            Scalar::Str(_) => Some(Category::String),
            Scalar::Other(_) => None,
        }
    }
}

/// Result of looking a field up on a possible mapping.
#[derive(Debug)]
pub enum Lookup<'a, T: Clone> {
    NotAMapping(Kind),
    Missing,
    Found(Cow<'a, T>),
}

/// A value the orderers know how to inspect.
pub trait Sortable: Clone {
    /// The comparator's view of this value.
    fn scalar(&self) -> Scalar<'_>;

    /// Look up `key`, distinguishing "not a mapping" from "no such key".
    fn lookup(&self, key: &str) -> Lookup<'_, Self>;
}

impl Sortable for Value {
    fn scalar(&self) -> Scalar<'_> {
        match self {
            Value::Int(i) => Scalar::Int(*i),
            Value::Uint(u) => Scalar::Uint(*u),
            Value::Float(f) => Scalar::Float(*f),
            Value::String(s) => Scalar::Str(s),
            other => Scalar::Other(other.kind()),
        }
    }

    fn lookup(&self, key: &str) -> Lookup<'_, Self> {
        match self {
            Value::Mapping(map) => match map.get(key) {
                Some(found) => Lookup::Found(Cow::Borrowed(found)),
                None => Lookup::Missing,
            },
            other => Lookup::NotAMapping(other.kind()),
        }
    }
}

/// Check that `a` and `b` share a category, returning it.
///
/// # Errors
/// [`OrderError::Unordered`] if either operand has no ordering at all,
/// [`OrderError::Incomparable`] if both are scalars of different categories.
pub fn check(a: &Scalar<'_>, b: &Scalar<'_>) -> Result<Category, OrderError> {
    match (a.category(), b.category()) {
        (Some(x), Some(y)) if x == y => Ok(x),
        _ => Err(mismatch(a, b)),
    }
}

/// Strict less-than with IEEE semantics for floats (anything against NaN is
/// `false`). Strings compare byte-lexicographically.
pub fn less(a: &Scalar<'_>, b: &Scalar<'_>) -> Result<bool, OrderError> {
    match (a, b) {
        (Scalar::Int(x), Scalar::Int(y)) => Ok(x < y),
        (Scalar::Uint(x), Scalar::Uint(y)) => Ok(x < y),
        (Scalar::Float(x), Scalar::Float(y)) => Ok(x < y),
        (Scalar::Str(x), Scalar::Str(y)) => Ok(x.as_bytes() < y.as_bytes()),
        _ => Err(mismatch(a, b)),
    }
}

/// Three-way comparison used for sorting.
///
/// Agrees with [`less`] on every pair it accepts, except that NaN is placed
/// by the IEEE total order instead of being unordered, so a sort over floats
/// always sees a consistent comparator.
pub fn compare(a: &Scalar<'_>, b: &Scalar<'_>) -> Result<Ordering, OrderError> {
    match (a, b) {
        (Scalar::Int(x), Scalar::Int(y)) => Ok(x.cmp(y)),
        (Scalar::Uint(x), Scalar::Uint(y)) => Ok(x.cmp(y)),
        (Scalar::Float(x), Scalar::Float(y)) => {
            Ok(x.partial_cmp(y).unwrap_or_else(|| x.total_cmp(y)))
        }
        (Scalar::Str(x), Scalar::Str(y)) => Ok(x.as_bytes().cmp(y.as_bytes())),
        _ => Err(mismatch(a, b)),
    }
}

fn mismatch(a: &Scalar<'_>, b: &Scalar<'_>) -> OrderError {
    match (a.category(), b.category()) {
        (None, _) => OrderError::Unordered(a.kind()),
        (_, None) => OrderError::Unordered(b.kind()),
        _ => OrderError::Incomparable {
            left: a.kind(),
            right: b.kind(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_names_the_unordered_side() {
        let err = less(&Scalar::Int(1), &Scalar::Other(Kind::Bool)).unwrap_err();
        assert_eq!(err, OrderError::Unordered(Kind::Bool));
    }

    #[test]
    fn nan_is_placed_after_numbers_when_sorting() {
        let nan = Scalar::Float(f64::NAN);
        let one = Scalar::Float(1.0);
        assert!(!less(&nan, &one).unwrap());
        assert!(!less(&one, &nan).unwrap());
        assert_eq!(compare(&one, &nan).unwrap(), Ordering::Less);
    }

    #[test]
    fn negative_zero_equals_zero() {
        let ord = compare(&Scalar::Float(-0.0), &Scalar::Float(0.0)).unwrap();
        assert_eq!(ord, Ordering::Equal);
    }
}

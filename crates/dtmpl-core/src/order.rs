//! Collection orderers built on the comparator.
//!
//! All three return a new sequence and leave the input untouched. Elements
//! are cloned, which for template values only bumps a reference count.
//!
//! Types are validated before anything moves: once the keys are known to
//! share a category the sort itself cannot fail.

use crate::compare::{check, compare, Lookup, Scalar, Sortable};
use crate::error::OrderError;
use std::cmp::Ordering;

/// Sort scalars ascending. Not stable.
///
/// # Errors
/// Fails when two elements do not share a scalar category, or when an
/// element has no ordering at all. A sequence with fewer than two elements
/// is returned as-is.
///
/// # Examples
///
/// ```
/// use dtmpl_core::{sort_values, Value};
///
/// let sorted = sort_values(&[Value::from("c"), Value::from("a"), Value::from("b")]).unwrap();
/// assert_eq!(sorted, vec![Value::from("a"), Value::from("b"), Value::from("c")]);
/// ```
pub fn sort_values<T: Sortable>(seq: &[T]) -> Result<Vec<T>, OrderError> {
    let keys: Vec<Scalar<'_>> = seq.iter().map(Sortable::scalar).collect();
    ensure_uniform(keys.iter())?;

    let mut order: Vec<usize> = (0..seq.len()).collect();
    order.sort_unstable_by(|&a, &b| ordering(&keys[a], &keys[b]));
    Ok(order.into_iter().map(|i| seq[i].clone()).collect())
}

/// Stable sort of mappings by the value under `key`.
///
/// Mappings without `key` come first and keep their relative order. The
/// remaining ones are ordered by their `key` values, ties keeping input
/// order.
///
/// # Errors
/// [`OrderError::NotAMapping`] if any element is not a mapping, otherwise the
/// same category errors as [`sort_values`] over the present key values.
pub fn sort_values_by_field<T: Sortable>(seq: &[T], key: &str) -> Result<Vec<T>, OrderError> {
    let mut fields = Vec::with_capacity(seq.len());
    for (index, item) in seq.iter().enumerate() {
        match item.lookup(key) {
            Lookup::NotAMapping(kind) => return Err(OrderError::NotAMapping { index, kind }),
            Lookup::Missing => fields.push(None),
            Lookup::Found(field) => fields.push(Some(field)),
        }
    }

    let keys: Vec<Option<Scalar<'_>>> = fields
        .iter()
        .map(|field| field.as_deref().map(Sortable::scalar))
        .collect();
    ensure_uniform(keys.iter().flatten())?;

    let mut order: Vec<usize> = (0..seq.len()).collect();
    order.sort_by(|&a, &b| match (&keys[a], &keys[b]) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => ordering(x, y),
    });
    Ok(order.into_iter().map(|i| seq[i].clone()).collect())
}

/// Reverse a sequence. Never inspects the elements.
pub fn reverse_values<T: Clone>(seq: &[T]) -> Vec<T> {
    seq.iter().rev().cloned().collect()
}

/// Every key must share the first key's category. Fewer than two keys are
/// never compared, so they always pass.
fn ensure_uniform<'a, 'b: 'a>(
    mut keys: impl Iterator<Item = &'a Scalar<'b>>,
) -> Result<(), OrderError> {
    let Some(first) = keys.next() else {
        return Ok(());
    };
    for key in keys {
        check(first, key)?;
    }
    Ok(())
}

fn ordering(a: &Scalar<'_>, b: &Scalar<'_>) -> Ordering {
    compare(a, b).unwrap_or(Ordering::Equal)
}

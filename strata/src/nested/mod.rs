//! Dotted-key addressing over tree-shaped configuration maps.
//!
//! A key such as `db.pool.size` is split on the delimiter into path
//! segments. There is no escaping: a delimiter character inside a key is
//! always treated as a path boundary.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::StrataError;

/// Tree of configuration values: each entry holds a scalar, a sequence, or
/// another map.
pub type ConfigMap = Map<String, Value>;

/// Delimiter used when a store is not configured otherwise.
pub const DEFAULT_DELIMITER: char = '.';

/// Split `key` into path segments.
///
/// ```
/// assert_eq!(strata::nested::split("db.host", '.'), vec!["db", "host"]);
/// assert_eq!(strata::nested::split("", '.'), vec![""]);
/// ```
#[must_use]
pub fn split(key: &str, delimiter: char) -> Vec<&str> {
    key.split(delimiter).collect()
}

/// Join path segments back into a key.
#[must_use]
pub fn join<S: AsRef<str>>(segments: &[S], delimiter: char) -> String {
    let mut out = String::new();
    for (index, segment) in segments.iter().enumerate() {
        if index > 0 {
            out.push(delimiter);
        }
        out.push_str(segment.as_ref());
    }
    out
}

/// Look up the value addressed by `segments`.
///
/// The final segment's value is returned verbatim, whether scalar or map.
/// Descending through a non-map value yields `None` rather than an error.
#[must_use]
pub fn find<'a>(root: &'a ConfigMap, segments: &[&str]) -> Option<&'a Value> {
    let (last, parents) = segments.split_last()?;
    let mut node = root;
    for segment in parents {
        match node.get(*segment)? {
            Value::Object(child) => node = child,
            _ => return None,
        }
    }
    node.get(*last)
}

/// Write `value` at the path addressed by `segments`, creating empty
/// intermediate maps as needed.
///
/// # Errors
///
/// Returns [`StrataError::PathConflict`] when an intermediate segment
/// already holds a non-map value. `root` is left untouched in that case.
pub fn set(
    root: &mut ConfigMap,
    segments: &[&str],
    value: Value,
    delimiter: char,
) -> Result<(), StrataError> {
    let Some((last, parents)) = segments.split_last() else {
        return Ok(());
    };
    if let Some(depth) = conflict_depth(root, parents) {
        let prefix = segments.get(..=depth).unwrap_or(segments);
        return Err(StrataError::path_conflict(
            join(segments, delimiter),
            join(prefix, delimiter),
        ));
    }
    let mut node = root;
    for segment in parents {
        let entry = node
            .entry(*segment)
            .or_insert_with(|| Value::Object(Map::new()));
        let Value::Object(child) = entry else {
            return Ok(());
        };
        node = child;
    }
    node.insert((*last).to_owned(), value);
    Ok(())
}

/// Index of the first intermediate segment that holds a non-map value.
fn conflict_depth(root: &ConfigMap, parents: &[&str]) -> Option<usize> {
    let mut node = root;
    for (depth, segment) in parents.iter().enumerate() {
        match node.get(*segment) {
            None => return None,
            Some(Value::Object(child)) => node = child,
            Some(_) => return Some(depth),
        }
    }
    None
}

/// Deep-merge `src` into `dst`.
///
/// Keys holding maps on both sides merge recursively; in every other case
/// the incoming value replaces the existing one.
pub fn merge(dst: &mut ConfigMap, src: ConfigMap) {
    for (key, incoming) in src {
        if let Value::Object(child) = incoming {
            if let Some(Value::Object(existing)) = dst.get_mut(&key) {
                merge(existing, child);
                continue;
            }
            dst.insert(key, Value::Object(child));
        } else {
            dst.insert(key, incoming);
        }
    }
}

/// Convert a dynamic value with a map at its root into a [`ConfigMap`].
///
/// # Errors
///
/// Returns [`StrataError::NotAMap`] when `value` is not an object.
pub fn into_map(value: Value) -> Result<ConfigMap, StrataError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(StrataError::NotAMap {
            found: kind_of(&other).to_owned(),
        }),
    }
}

/// Convert any serialisable mapping into a [`ConfigMap`].
///
/// This is the bridge for foreign nested representations: maps with
/// non-string keys (integers, booleans) have their keys stringified.
///
/// # Errors
///
/// Returns [`StrataError::Json`] when serialisation fails and
/// [`StrataError::NotAMap`] when the root is not a mapping.
pub fn from_serializable<T: Serialize + ?Sized>(data: &T) -> Result<ConfigMap, StrataError> {
    into_map(serde_json::to_value(data)?)
}

/// Every leaf of `map` as a `(key, value)` pair in lexicographic key order.
///
/// Empty maps count as leaves so that writing `{}` is still observable.
#[must_use]
pub fn leaves(map: &ConfigMap, delimiter: char) -> Vec<(String, Value)> {
    let mut out = Vec::new();
    let mut path = Vec::new();
    collect_leaves(map, &mut path, delimiter, &mut out);
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

fn collect_leaves<'a>(
    map: &'a ConfigMap,
    path: &mut Vec<&'a str>,
    delimiter: char,
    out: &mut Vec<(String, Value)>,
) {
    for (key, value) in map {
        path.push(key.as_str());
        match value {
            Value::Object(child) if !child.is_empty() => {
                collect_leaves(child, path, delimiter, out);
            }
            _ => out.push((join(path.as_slice(), delimiter), value.clone())),
        }
        path.pop();
    }
}

/// Short name for the runtime kind of a dynamic value.
#[must_use]
pub const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "map",
    }
}

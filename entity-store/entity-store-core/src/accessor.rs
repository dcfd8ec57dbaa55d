//! Reading and mutating values at a [`DocPath`] inside a JSON document.
//!
//! All three operations share one traversal rule. Reads treat values that do
//! not pass the [`Presence`] test as missing and never touch the document.
//! Writes and deletes replace every intermediate that is not a container with
//! an empty object before descending, so a path that does not exist yet is
//! created on the way down.

use serde_json::{Map, Value};

use crate::path::DocPath;

/// Rule deciding whether a value found during a read counts as existing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Presence {
    /// `null`, `false`, `0` and `""` read as missing.
    #[default]
    Truthy,
    /// Only an absent key or index reads as missing.
    Strict,
}

impl Presence {
    pub fn is_present(self, value: &Value) -> bool {
        match self {
            Presence::Truthy => is_truthy(value),
            Presence::Strict => true,
        }
    }
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Canonical decimal array index: `"0"`, `"17"`, but not `"01"`, `"+1"` or `"-1"`.
fn array_index(segment: &str) -> Option<usize> {
    let canonical = !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment == "0" || !segment.starts_with('0'));
    if canonical {
        segment.parse().ok()
    } else {
        None
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

fn child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => items.get(array_index(segment)?),
        _ => None,
    }
}

/// Mutable slot for `segment` under `container`, created as `null` if absent.
///
/// Arrays grow (padding with `null`) to reach an index segment. Anything that
/// cannot hold the segment is replaced by an empty object first.
fn slot<'a>(container: &'a mut Value, segment: &str) -> &'a mut Value {
    let index = array_index(segment).filter(|_| container.is_array());
    if index.is_none() && !container.is_object() {
        *container = Value::Object(Map::new());
    }
    match (container, index) {
        (Value::Array(items), Some(idx)) => {
            if idx >= items.len() {
                items.resize(idx + 1, Value::Null);
            }
            &mut items[idx]
        }
        (Value::Object(map), _) => map.entry(segment).or_insert(Value::Null),
        _ => unreachable!("slot container is an object or an indexed array"),
    }
}

/// Walk `segments`, turning every non-container on the way into `{}`.
fn materialize<'a>(root: &'a mut Value, segments: &[String]) -> &'a mut Value {
    segments.iter().fold(root, |current, segment| {
        let next = slot(current, segment);
        if !is_container(next) {
            *next = Value::Object(Map::new());
        }
        next
    })
}

/// Value at `path`, or `None` if any step is missing or fails `presence`.
///
/// The root path always yields the document itself.
pub fn get<'a>(root: &'a Value, path: &DocPath, presence: Presence) -> Option<&'a Value> {
    if path.is_root() {
        return Some(root);
    }
    path.segments().iter().try_fold(root, |current, segment| {
        child(current, segment).filter(|next| presence.is_present(next))
    })
}

/// Assign `value` at `path`, creating intermediate objects as needed.
///
/// A root path is left untouched.
pub fn set(root: &mut Value, path: &DocPath, value: Value) {
    if path.is_root() {
        return;
    }
    let Some((last, parents)) = path.segments().split_last() else {
        return;
    };
    let parent = materialize(root, parents);
    *slot(parent, last) = value;
}

/// Remove the key at `path`.
///
/// Intermediates are materialised exactly as [`set`] does, even when the
/// target turns out not to exist. Array elements are nulled rather than
/// removed so sibling indices stay stable.
pub fn delete(root: &mut Value, path: &DocPath) {
    if path.is_root() {
        return;
    }
    let Some((last, parents)) = path.segments().split_last() else {
        return;
    };
    match materialize(root, parents) {
        Value::Object(map) => {
            map.remove(last.as_str());
        }
        Value::Array(items) => {
            if let Some(item) = array_index(last).and_then(|idx| items.get_mut(idx)) {
                *item = Value::Null;
            }
        }
        _ => {}
    }
}

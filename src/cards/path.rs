//! Dot-path access into a card's JSON projection.
//!
//! Search fields are configured as paths like `"contentArea.description"`.
//! A missing segment anywhere along the path resolves to the caller's
//! default; it is never an error.

use serde_json::{Map, Value};

/// Resolve `path` inside `value`.
///
/// Numeric segments index into arrays. Returns `None` if any segment is
/// missing.
#[must_use]
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Resolve `path` inside `value`, falling back to `default`.
#[must_use]
pub fn get_by_path<'a>(value: &'a Value, path: &str, default: &'a Value) -> &'a Value {
    lookup(value, path).unwrap_or(default)
}

/// Resolve `path` as display text.
///
/// Strings are returned as-is, numbers and booleans are formatted,
/// anything else (absent, null, objects, arrays) is `""`.
#[must_use]
pub fn text_at(value: &Value, path: &str) -> String {
    match lookup(value, path) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Return a copy of `value` with `path` set to `new_value`.
///
/// Missing intermediate objects are created. A non-object in the way is
/// replaced by an object. The input is left untouched.
#[must_use]
pub fn set_by_path(value: &Value, path: &str, new_value: Value) -> Value {
    let mut updated = value.clone();
    set_in_place(&mut updated, path, new_value);
    updated
}

fn set_in_place(target: &mut Value, path: &str, new_value: Value) {
    let (head, rest) = match path.split_once('.') {
        Some((head, rest)) => (head, Some(rest)),
        None => (path, None),
    };

    if let Value::Array(items) = target {
        if let Some(slot) = head.parse::<usize>().ok().and_then(|i| items.get_mut(i)) {
            match rest {
                Some(rest) => set_in_place(slot, rest, new_value),
                None => *slot = new_value,
            }
            return;
        }
    }

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }
    if let Value::Object(map) = target {
        match rest {
            Some(rest) => {
                let child = map.entry(head.to_string()).or_insert(Value::Null);
                set_in_place(child, rest, new_value);
            }
            None => {
                map.insert(head.to_string(), new_value);
            }
        }
    }
}

use serde_json::Value;

/// Walks `path` through nested JSON objects. Returns `None` as soon as a key
/// is missing, a value on the way is `null`, or an intermediate is not an
/// object, so extraction sites degrade to their defaults instead of failing.
pub fn pluck<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = current.as_object()?.get(*key)?;
        if current.is_null() {
            return None;
        }
    }
    Some(current)
}

/// Deterministic display form of a JSON value: strings verbatim, everything
/// else via its compact JSON encoding. Used where the upstream field may be
/// a scalar or a structured value.
pub fn display_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

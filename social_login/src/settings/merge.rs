use serde_json::Value;

/// Deep-merge `overlay` onto `base` and return the result.
///
/// Objects are merged key by key, recursively. Any other overlay value,
/// arrays included, replaces the base value outright. A `null` overlay
/// replaces too, so callers can clear a default explicitly.
pub fn extend_deep(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                let merged = match base.remove(&key) {
                    Some(existing) => extend_deep(existing, value),
                    None => value,
                };
                base.insert(key, merged);
            }
            Value::Object(base)
        }
        (_, overlay) => overlay,
    }
}

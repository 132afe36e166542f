//! Shared test utilities for the devbranch workspace.

use serde_json::{Value, json};

/// Normalize non-deterministic JSON fields for report comparison.
///
/// `tool.version` is replaced only on the report envelope (root object carrying `schema`,
/// `tool`, `verdict` and `findings`). Timestamps are replaced at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = obj.contains_key("schema")
            && obj.contains_key("tool")
            && obj.contains_key("verdict")
            && obj.contains_key("findings");
        if is_envelope
            && let Some(tool) = obj.get_mut("tool")
            && let Some(tool_obj) = tool.as_object_mut()
            && tool_obj.contains_key("version")
        {
            tool_obj.insert(
                "version".to_string(),
                Value::String("__VERSION__".to_string()),
            );
        }
    }
    normalize_timestamps_recursive(&mut value);
    value
}

fn normalize_timestamps_recursive(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if map.contains_key(key) {
                    map.insert(key.to_string(), Value::String("__TIMESTAMP__".to_string()));
                }
            }
            for val in map.values_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps_recursive(val);
            }
        }
        _ => {}
    }
}

/// One entry of a `composer show --format=json` listing.
pub fn composer_package(name: &str, version: &str, direct: bool) -> Value {
    json!({
        "name": name,
        "version": version,
        "description": "",
        "direct-dependency": direct,
    })
}

/// A full listing document, as composer prints it.
pub fn composer_listing(packages: &[(&str, &str, bool)]) -> String {
    let installed: Vec<Value> = packages
        .iter()
        .map(|(name, version, direct)| composer_package(name, version, *direct))
        .collect();
    json!({ "installed": installed }).to_string()
}

//! Parsing of the JSON-encoded datasources attached to enumerated fields

use log::warn;
use serde_json::{Map, Value};

use super::ValueOption;

/// Parses a datasource string into value options.
///
/// The datasource is a JSON array of objects carrying `Id`, `Name` and an
/// optional `GroupId` (lower-case keys are accepted too). Ids may be strings
/// or numbers. Blank, malformed or non-array input yields no options.
pub fn parse_datasource(datasource: Option<&str>) -> Vec<ValueOption> {
    let raw = match datasource {
        Some(raw) if !raw.trim().is_empty() => raw,
        _ => return Vec::new(),
    };

    let parsed: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Failed to parse datasource: {}", e);
            return Vec::new();
        }
    };

    let Value::Array(items) = parsed else {
        warn!("Datasource is not an array: {}", raw);
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::Object(object) => Some(option_from_object(object)),
            other => {
                warn!("Skipping datasource item that is not an object: {}", other);
                None
            }
        })
        .collect()
}

fn option_from_object(object: &Map<String, Value>) -> ValueOption {
    let value = lookup_text(object, "Id", "id").unwrap_or_default();
    let label = lookup_text(object, "Name", "name").unwrap_or_default();

    let mut option = ValueOption::new(value, label);
    if let Some(group) = lookup_text(object, "GroupId", "groupId").filter(|g| !g.is_empty()) {
        option = option.with_group(group);
    }
    option
}

/// Reads a key as text, trying the server's PascalCase spelling first.
fn lookup_text(object: &Map<String, Value>, pascal: &str, camel: &str) -> Option<String> {
    let value = object.get(pascal).or_else(|| object.get(camel))?;
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

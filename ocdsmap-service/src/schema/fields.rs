//! Schema flattening.
//!
//! Pre-order walk over the resolved schema's `properties`, yielding one
//! [`SchemaField`] per position. Array fields recurse into `items/properties`
//! at the same path, matching the `/`-delimited paths of the ocdskit mapping
//! sheet. The `definitions` subtree is never entered.

use ocdsmap_core::prelude::*;
use serde_json::{Map, Value};

/// Flatten a resolved schema into an ordered field list.
///
/// Property order is preserved as authored. `required` reflects the
/// immediate parent's `required` array; `deprecated` is inherited by
/// descendants of a deprecated container.
///
/// # Errors
/// Returns a parse error if the document has no top-level `properties`
/// object.
pub fn schema_fields(schema: &Value) -> Result<Vec<SchemaField>> {
    let properties = schema
        .get("properties")
        .and_then(Value::as_object)
        .ok_or_else(|| MappingError::parse("schema has no top-level 'properties' object"))?;
    let mut fields = Vec::new();
    walk(properties, "", &required_names(schema), false, &mut fields);
    Ok(fields)
}

fn walk(
    properties: &Map<String, Value>,
    prefix: &str,
    required: &[&str],
    parent_deprecated: bool,
    out: &mut Vec<SchemaField>,
) {
    for (name, fragment) in properties {
        let path = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{prefix}/{name}")
        };
        let deprecated = parent_deprecated
            || fragment.get("deprecated").is_some_and(|d| !d.is_null());
        out.push(SchemaField::new(
            path.clone(),
            fragment.clone(),
            required.contains(&name.as_str()),
            deprecated,
        ));

        if let Some(children) = fragment.get("properties").and_then(Value::as_object) {
            walk(children, &path, &required_names(fragment), deprecated, out);
        } else if let Some(items) = fragment.get("items") {
            if let Some(children) = items.get("properties").and_then(Value::as_object) {
                walk(children, &path, &required_names(items), deprecated, out);
            }
        }
    }
}

fn required_names(node: &Value) -> Vec<&str> {
    node.get("required")
        .and_then(Value::as_array)
        .map(|names| names.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

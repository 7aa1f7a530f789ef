//! Internal `$ref` resolution.
//!
//! Inlines `#/...` JSON pointers within a single schema document. Sibling
//! keys on the referring node override the target (so a field can carry its
//! own `title` next to a `$ref`), and the original pointer is retained in
//! the inlined node as a stable marker for later detection logic.

use ocdsmap_core::prelude::*;
use serde_json::{Map, Value};

/// Resolve every internal reference in `schema`, returning a new document.
///
/// # Errors
/// Returns [`MappingError::UnresolvedRef`] for external references, dangling
/// pointers, reference cycles, and references to non-object targets that
/// cannot be merged with sibling keys.
pub fn resolve_refs(schema: &Value) -> Result<Value> {
    let mut active = Vec::new();
    resolve_node(schema, schema, &mut active)
}

fn resolve_node(root: &Value, node: &Value, active: &mut Vec<String>) -> Result<Value> {
    match node {
        Value::Object(map) => match map.get("$ref") {
            Some(Value::String(pointer)) => resolve_ref(root, map, pointer, active),
            Some(other) => Err(MappingError::unresolved_ref(
                other.to_string(),
                "$ref must be a string",
            )),
            None => {
                let mut out = Map::new();
                for (key, value) in map {
                    out.insert(key.clone(), resolve_node(root, value, active)?);
                }
                Ok(Value::Object(out))
            }
        },
        Value::Array(items) => {
            let resolved: Result<Vec<Value>> = items
                .iter()
                .map(|item| resolve_node(root, item, active))
                .collect();
            Ok(Value::Array(resolved?))
        }
        other => Ok(other.clone()),
    }
}

fn resolve_ref(
    root: &Value,
    map: &Map<String, Value>,
    pointer: &str,
    active: &mut Vec<String>,
) -> Result<Value> {
    if !pointer.starts_with("#/") {
        return Err(MappingError::unresolved_ref(
            pointer,
            "only internal references are supported; resolve external references upstream",
        ));
    }
    if active.iter().any(|p| p == pointer) {
        return Err(MappingError::unresolved_ref(pointer, "reference cycle"));
    }

    let target = lookup_pointer(root, pointer)?;
    active.push(pointer.to_string());
    let resolved = resolve_node(root, target, active)?;
    active.pop();

    let siblings: Vec<(&String, &Value)> = map
        .iter()
        .filter(|(key, _)| key.as_str() != "$ref")
        .collect();
    let mut merged = match resolved {
        Value::Object(target_map) => target_map,
        other if siblings.is_empty() => return Ok(other),
        _ => {
            return Err(MappingError::unresolved_ref(
                pointer,
                "cannot merge sibling keys into a non-object target",
            ));
        }
    };
    for (key, value) in siblings {
        merged.insert(key.clone(), resolve_node(root, value, active)?);
    }
    merged.insert("$ref".to_string(), Value::String(pointer.to_string()));
    Ok(Value::Object(merged))
}

fn lookup_pointer<'a>(root: &'a Value, pointer: &str) -> Result<&'a Value> {
    let mut node = root;
    for token in pointer.trim_start_matches("#/").split('/') {
        let token = token.replace("~1", "/").replace("~0", "~");
        node = match node {
            Value::Object(map) => map
                .get(&token)
                .ok_or_else(|| MappingError::unresolved_ref(pointer, "no such member"))?,
            Value::Array(items) => {
                let index: usize = token.parse().map_err(|_| {
                    MappingError::unresolved_ref(pointer, "expected an array index")
                })?;
                items
                    .get(index)
                    .ok_or_else(|| MappingError::unresolved_ref(pointer, "index out of range"))?
            }
            _ => return Err(MappingError::unresolved_ref(pointer, "not a container")),
        };
    }
    Ok(node)
}

use serde::Serialize;
use serde_json::{Map, Value};

const MAX_DEPTH: usize = 16;
const STRIPPED_KEYS: [&str; 5] = ["$schema", "$id", "title", "definitions", "$defs"];

/// Serializes a generated JSON Schema and inlines every `$ref`, leaving a
/// single self-contained document without metadata keys.
pub fn clean_schema<T: Serialize>(root: T) -> serde_json::Result<Value> {
    let mut doc = serde_json::to_value(root)?;

    let definitions = ["definitions", "$defs"]
        .iter()
        .find_map(|key| doc.get(*key).and_then(Value::as_object).cloned())
        .unwrap_or_default();

    inline_refs(&mut doc, &definitions, 0);

    if let Value::Object(map) = &mut doc {
        for key in STRIPPED_KEYS {
            map.remove(key);
        }
    }
    Ok(doc)
}

fn inline_refs(node: &mut Value, definitions: &Map<String, Value>, depth: usize) {
    if depth > MAX_DEPTH {
        return;
    }

    match node {
        Value::Object(map) => {
            if let Some(target) = map.get("$ref").and_then(Value::as_str) {
                let name = target.rsplit('/').next().unwrap_or_default();
                if let Some(def) = definitions.get(name) {
                    let mut resolved = def.clone();
                    // Keep sibling keys (e.g. a field description) next to the inlined body.
                    map.remove("$ref");
                    if let Value::Object(body) = &mut resolved {
                        for (k, v) in std::mem::take(map) {
                            body.entry(k).or_insert(v);
                        }
                    }
                    *node = resolved;
                    inline_refs(node, definitions, depth + 1);
                    return;
                }
            }
            // schemars wraps described refs in a single-element `allOf`.
            if let Some(Value::Array(all)) = map.get("allOf") {
                if all.len() == 1 {
                    let only = all[0].clone();
                    map.remove("allOf");
                    if let Value::Object(inner) = only {
                        for (k, v) in inner {
                            map.entry(k).or_insert(v);
                        }
                    }
                    inline_refs(node, definitions, depth + 1);
                    return;
                }
            }
            for value in map.values_mut() {
                inline_refs(value, definitions, depth + 1);
            }
        }
        Value::Array(items) => {
            for item in items {
                inline_refs(item, definitions, depth + 1);
            }
        }
        _ => {}
    }
}

//! Protocol document construction: ordered JSON objects with keys present
//! only when the grammar produced them.
//!
//! The document is built from `serde_json::Map`s (compiled with
//! `preserve_order`, so key insertion order survives serialization — downstream
//! generators rely on it). Absence of a key and a false/empty value are
//! distinct states throughout: a domain with no types has no `types` key.

use serde_json::Value;

/// One object node of the protocol document.
pub(crate) type Item = serde_json::Map<String, Value>;

/// The fixed primitive kinds of the protocol grammar. Any other kind token in
/// a declaration is a reference to a named type and is emitted under `$ref`.
pub const PRIMITIVE_TYPES: [&str; 8] = [
    "integer", "number", "boolean", "string", "object", "any", "array", "binary",
];

/// Base object for a declaration: seed field, then name, accumulated
/// description, and flags, in that key order. Flags are written only when
/// present in the source, the description only when it has text.
pub(crate) fn create_item(
    seed: Option<(&str, &str)>,
    name: Option<&str>,
    description: &str,
    experimental: bool,
    deprecated: bool,
) -> Item {
    let mut item = Item::new();
    if let Some((key, value)) = seed {
        item.insert(key.to_string(), Value::String(value.to_string()));
    }
    if let Some(name) = name {
        item.insert("name".to_string(), Value::String(name.to_string()));
    }
    let description = description.trim();
    if !description.is_empty() {
        item.insert(
            "description".to_string(),
            Value::String(description.to_string()),
        );
    }
    if experimental {
        item.insert("experimental".to_string(), Value::Bool(true));
    }
    if deprecated {
        item.insert("deprecated".to_string(), Value::Bool(true));
    }
    item
}

/// Resolve a declared kind onto `item`.
///
/// `array of K` wraps the resolved element under `{type: "array", items: ...}`
/// (the grammar has no arrays of arrays). The pseudo-kind `enum` is rewritten
/// to `string`; `binary` is rewritten to `string` when the caller asked for
/// it. Primitive kinds land under `type`, anything else is a `$ref` to a named
/// type in this or another domain — never resolved here.
pub(crate) fn assign_type(item: &mut Item, kind: &str, array_of: bool, map_binary_to_string: bool) {
    if array_of {
        item.insert("type".to_string(), Value::String("array".to_string()));
        let mut items = Item::new();
        assign_type(&mut items, kind, false, map_binary_to_string);
        item.insert("items".to_string(), Value::Object(items));
        return;
    }

    let kind = match kind {
        "enum" => "string",
        "binary" if map_binary_to_string => "string",
        other => other,
    };
    if PRIMITIVE_TYPES.contains(&kind) {
        item.insert("type".to_string(), Value::String(kind.to_string()));
    } else {
        item.insert("$ref".to_string(), Value::String(kind.to_string()));
    }
}

/// Append to the array at `item[key]`, creating it on first use.
pub(crate) fn push_to_list(item: &mut Item, key: &str, value: Value) {
    if let Value::Array(list) = item
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()))
    {
        list.push(value);
    }
}

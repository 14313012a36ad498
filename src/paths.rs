use indexmap::IndexMap;
use serde_json::Value;

/// Placeholder token substituted with a concrete locale code in file templates
pub const LOCALE_TOKEN: &str = "[locale]";

/// Flat mapping from leaf path (e.g. `a.b[2].c`) to string value.
///
/// Insertion order follows a depth-first pre-order traversal of the source
/// document, so chunking the keys preserves document order.
pub type StringMap = IndexMap<String, String>;

/// Extract all string leaves from a JSON value, keyed by their path
pub fn extract_strings(value: &Value, prefix: &str) -> StringMap {
    let mut strings = StringMap::new();
    collect_strings(value, prefix, &mut strings);
    strings
}

fn collect_strings(value: &Value, prefix: &str, out: &mut StringMap) {
    match value {
        Value::String(text) => {
            out.insert(prefix.to_string(), text.clone());
        }
        Value::Object(map) => {
            for (key, child) in map {
                collect_strings(child, &object_path(prefix, key), out);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                collect_strings(child, &array_path(prefix, index), out);
            }
        }
        // Numbers, booleans and nulls pass through replacement unchanged
        _ => {}
    }
}

/// Rebuild a JSON value with string leaves swapped for their translations.
///
/// Structural mirror of [`extract_strings`]: both visit the same paths in the
/// same order. A leaf whose path is absent from the mapping, or mapped to an
/// empty string, keeps its original value.
pub fn replace_strings(value: &Value, translations: &StringMap, prefix: &str) -> Value {
    match value {
        Value::String(text) => match translations.get(prefix) {
            Some(translated) if !translated.is_empty() => Value::String(translated.clone()),
            _ => Value::String(text.clone()),
        },
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (key, child) in map {
                let replaced = replace_strings(child, translations, &object_path(prefix, key));
                result.insert(key.clone(), replaced);
            }
            Value::Object(result)
        }
        Value::Array(items) => {
            let replaced = items
                .iter()
                .enumerate()
                .map(|(index, child)| replace_strings(child, translations, &array_path(prefix, index)))
                .collect();
            Value::Array(replaced)
        }
        other => other.clone(),
    }
}

/// Substitute every `[locale]` occurrence in a path template
pub fn resolve_locale_path(template: &str, locale: &str) -> String {
    template.replace(LOCALE_TOKEN, locale)
}

fn object_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn array_path(prefix: &str, index: usize) -> String {
    format!("{}[{}]", prefix, index)
}

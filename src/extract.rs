//! Lookup strategies for pulling fields out of the site's shape-shifting JSON
//! responses. Each strategy is independently usable; [`find`] and [`find_str`]
//! chain them left-to-right, first success wins.

use std::collections::VecDeque;

use regex::Regex;
use serde_json::Value;

/// Nesting cap for the recursive fallback search.
const MAX_SEARCH_DEPTH: usize = 10;

/// Looks up `key` somewhere under `root`.
///
/// Tried in order: exact key on `root` itself, case-insensitive key on `root`
/// itself, then a breadth-first descent into nested maps and arrays. The
/// breadth-first order means the shallowest occurrence of a duplicated key
/// always wins.
///
/// Returns `None` only when the key is absent; a present-but-null value comes
/// back as `Some(&Value::Null)`.
#[must_use]
pub fn find<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    if let Value::Object(map) = root {
        if let Some(value) = map.get(key) {
            return Some(value);
        }
        if let Some(value) = map
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
        {
            return Some(value);
        }
    }

    find_nested(root, key)
}

/// Breadth-first exact-key search, capped at [`MAX_SEARCH_DEPTH`] levels.
fn find_nested<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    let mut queue = VecDeque::from([(root, 0usize)]);

    while let Some((node, depth)) = queue.pop_front() {
        match node {
            Value::Object(map) => {
                if let Some(value) = map.get(key) {
                    return Some(value);
                }
                if depth < MAX_SEARCH_DEPTH {
                    queue.extend(
                        map.values()
                            .filter(|v| v.is_object() || v.is_array())
                            .map(|v| (v, depth + 1)),
                    );
                }
            }
            Value::Array(items) => {
                if depth < MAX_SEARCH_DEPTH {
                    queue.extend(
                        items
                            .iter()
                            .filter(|v| v.is_object() || v.is_array())
                            .map(|v| (v, depth + 1)),
                    );
                }
            }
            _ => {}
        }
    }

    None
}

/// [`find`] for string-valued fields, with one extra fallback: a regex over
/// the serialized document, for when the structural search comes up empty.
///
/// Numbers are stringified since the API flip-flops between `"userId": "123"`
/// and `"userId": 123`.
#[must_use]
pub fn find_str(root: &Value, key: &str) -> Option<String> {
    match find(root, key) {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => find_str_in_text(root, key),
    }
}

/// Serializes the whole subtree and scans it for `"<key>": "<value>"`.
fn find_str_in_text(root: &Value, key: &str) -> Option<String> {
    let pattern = format!(r#""{}"\s*:\s*"([^"]+)""#, regex::escape(key));
    let re = Regex::new(&pattern).ok()?;
    re.captures(&root.to_string())
        .map(|captures| captures[1].to_string())
}

/// Walks a fixed path of object keys / array indices. A segment that parses
/// as an integer indexes into an array; everything else is an object key.
#[must_use]
pub fn get_by_path<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut node = root;
    for segment in path {
        node = match node {
            Value::Object(map) => map.get(*segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(node)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn finds_exact_key_at_root() {
        let doc = json!({ "identifier": "abc" });
        assert_eq!(find(&doc, "identifier"), Some(&json!("abc")));
    }

    #[test]
    fn finds_key_case_insensitively() {
        let doc = json!({ "Identifier": "abc" });
        assert_eq!(find(&doc, "identifier"), Some(&json!("abc")));
    }

    #[test]
    fn finds_key_nested_in_list_of_objects() {
        let doc = json!({
            "pageProps": {
                "channels": [
                    { "meta": { "identifier": "deep" } }
                ]
            }
        });
        assert_eq!(find(&doc, "identifier"), Some(&json!("deep")));
    }

    #[test]
    fn shallowest_duplicate_wins() {
        let doc = json!({
            "wrapper": { "identifier": "shallow" },
            "list": [ { "nested": { "identifier": "deep" } } ]
        });
        assert_eq!(find(&doc, "identifier"), Some(&json!("shallow")));
    }

    #[test]
    fn absent_is_distinct_from_null() {
        let doc = json!({ "identifier": null });
        assert_eq!(find(&doc, "identifier"), Some(&Value::Null));
        assert_eq!(find(&doc, "missing"), None);
    }

    #[test]
    fn depth_cap_stops_the_descent() {
        let mut doc = json!({ "identifier": "too deep" });
        for _ in 0..=MAX_SEARCH_DEPTH {
            doc = json!({ "wrap": doc });
        }
        assert_eq!(find(&doc, "identifier"), None);
        // ... but the text fallback still gets there
        assert_eq!(find_str(&doc, "identifier"), Some("too deep".to_string()));
    }

    #[test]
    fn find_str_stringifies_numbers() {
        let doc = json!({ "userId": 42 });
        assert_eq!(find_str(&doc, "userId"), Some("42".to_string()));
    }

    #[test]
    fn find_str_ignores_non_string_matches_without_text_hit() {
        let doc = json!({ "identifier": { "not": "a string" } });
        assert_eq!(find_str(&doc, "identifier"), None);
    }

    #[test]
    fn path_lookup_crosses_arrays() {
        let doc = json!({ "channels": [ { "slug": "BTV" }, { "slug": "BTV World" } ] });
        assert_eq!(
            get_by_path(&doc, &["channels", "1", "slug"]),
            Some(&json!("BTV World"))
        );
        assert_eq!(get_by_path(&doc, &["channels", "9", "slug"]), None);
    }
}

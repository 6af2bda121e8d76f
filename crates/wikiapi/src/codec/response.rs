//! Decoded response tree.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ProtocolError;

/// A decoded Action API response: a generic mapping of mappings.
///
/// Responses that carried an `error` marker never become a tree; see
/// [`decode`](super::decode).
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseTree(Map<String, Value>);

impl ResponseTree {
    pub(crate) fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Look up a value by path. Numeric segments index into arrays.
    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        let (first, rest) = path.split_first()?;
        rest.iter().try_fold(self.0.get(*first)?, |node, segment| match node {
            Value::Object(map) => map.get(*segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// Look up a value that must be present.
    pub fn require(&self, path: &[&str]) -> Result<&Value, ProtocolError> {
        self.get(path).ok_or_else(|| ProtocolError::MissingField {
            path: path.join("."),
        })
    }

    /// Deserialize the value at `path` into a typed record.
    pub fn extract<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T, ProtocolError> {
        let value = self.require(path)?;
        T::deserialize(value).map_err(|e| ProtocolError::Malformed {
            reason: format!("{}: {}", path.join("."), e),
        })
    }

    /// Deserialize the value at `path`, treating absence as an empty list.
    pub fn extract_list<T: DeserializeOwned>(&self, path: &[&str]) -> Result<Vec<T>, ProtocolError> {
        match self.get(path) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(_) => self.extract(path),
        }
    }

    /// The continuation value for a list module, if enumeration can continue.
    ///
    /// Accepts both `query-continue.<module>.<param>` and `continue.<param>`.
    /// An absent key and an empty value both mean "no more results".
    pub fn continuation(&self, module: &str, param: &str) -> Option<String> {
        let value = self
            .get(&["query-continue", module, param])
            .or_else(|| self.get(&["continue", param]))?;

        match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// The non-fatal `warnings` block, if any.
    pub fn warnings(&self) -> Option<&Value> {
        self.0.get("warnings")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree(value: Value) -> ResponseTree {
        match value {
            Value::Object(map) => ResponseTree::new(map),
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn path_lookup_through_objects_and_arrays() {
        let tree = tree(json!({
            "query": {"pages": [{"title": "Foo", "revisions": [{"revid": 7}]}]}
        }));
        assert_eq!(
            tree.get(&["query", "pages", "0", "revisions", "0", "revid"]),
            Some(&json!(7))
        );
        assert_eq!(tree.get(&["query", "pages", "1"]), None);
        assert_eq!(tree.get(&["query", "pages", "x"]), None);
        assert_eq!(tree.get(&[]), None);
    }

    #[test]
    fn require_reports_missing_path() {
        let tree = tree(json!({"query": {}}));
        let err = tree.require(&["query", "tokens", "csrftoken"]).unwrap_err();
        assert_eq!(err.to_string(), "response is missing 'query.tokens.csrftoken'");
    }

    #[test]
    fn extract_list_treats_absence_as_empty() {
        let tree = tree(json!({"query": {}}));
        let items: Vec<Value> = tree.extract_list(&["query", "search"]).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn continuation_from_raw_continue() {
        let tree = tree(json!({
            "query-continue": {"usercontribs": {"uccontinue": "20240101|123"}}
        }));
        assert_eq!(
            tree.continuation("usercontribs", "uccontinue"),
            Some("20240101|123".to_string())
        );
        assert_eq!(tree.continuation("backlinks", "blcontinue"), None);
    }

    #[test]
    fn continuation_from_continue_block() {
        let tree = tree(json!({"continue": {"sroffset": 20, "continue": "-||"}}));
        assert_eq!(tree.continuation("search", "sroffset"), Some("20".to_string()));
    }

    #[test]
    fn empty_continuation_means_exhausted() {
        let tree = tree(json!({"query-continue": {"allpages": {"apcontinue": ""}}}));
        assert_eq!(tree.continuation("allpages", "apcontinue"), None);
    }
}

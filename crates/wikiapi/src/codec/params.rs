//! Request parameters.

use std::fmt;

use url::form_urlencoded;

/// Separator for multi-valued parameters.
const MULTI_SEPARATOR: &str = "|";

/// Alternative separator, used when a value itself contains `|`.
const UNIT_SEPARATOR: &str = "\u{1f}";

/// A parameter value that will be sent.
///
/// Absent parameters are simply never inserted into [`Params`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    /// A single value.
    Scalar(String),
    /// Several values, joined on the wire.
    Multi(Vec<String>),
    /// Present but explicitly empty (`name=`).
    Empty,
}

impl ParamValue {
    /// The wire representation of this value.
    pub fn encoded(&self) -> String {
        match self {
            ParamValue::Scalar(value) => value.clone(),
            ParamValue::Multi(values) => {
                if values.iter().any(|v| v.contains(MULTI_SEPARATOR)) {
                    format!("{}{}", UNIT_SEPARATOR, values.join(UNIT_SEPARATOR))
                } else {
                    values.join(MULTI_SEPARATOR)
                }
            }
            ParamValue::Empty => String::new(),
        }
    }
}

/// An ordered set of named request parameters.
///
/// Setting a name that is already present replaces its value in place.
///
/// # Example
///
/// ```
/// use wikiapi::codec::Params;
///
/// let params = Params::new()
///     .set("action", "query")
///     .multi("rvprop", ["ids", "user"])
///     .opt("rvstartid", None::<u64>)
///     .set("summary", "");
/// assert_eq!(params.encode(), "action=query&rvprop=ids%7Cuser&summary=");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(&'static str, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters for the given `action`.
    pub fn action(action: &str) -> Self {
        Self::new().set("action", action)
    }

    /// Set a scalar value. An empty string is sent as an explicitly empty value.
    pub fn set(self, name: &'static str, value: impl ToString) -> Self {
        let value = value.to_string();
        let value = if value.is_empty() {
            ParamValue::Empty
        } else {
            ParamValue::Scalar(value)
        };
        self.insert(name, value)
    }

    /// Set a scalar value if present; `None` leaves the parameter out.
    pub fn opt<V: ToString>(self, name: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(name, value),
            None => self,
        }
    }

    /// Set a multi-valued parameter. No values leaves the parameter out.
    pub fn multi<I, S>(self, name: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            self
        } else {
            self.insert(name, ParamValue::Multi(values))
        }
    }

    /// Send `name=1` when `on`, otherwise leave the parameter out.
    pub fn flag(self, name: &'static str, on: bool) -> Self {
        if on { self.set(name, "1") } else { self }
    }

    /// Returns the value of a parameter, if present.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Whether a parameter is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// URL/form-encode the parameters in insertion order.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (name, value) in &self.entries {
            serializer.append_pair(name, &value.encoded());
        }
        serializer.finish()
    }

    fn insert(mut self, name: &'static str, value: ParamValue) -> Self {
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
        self
    }
}

// Values may hold passwords and tokens
impl fmt::Debug for Params {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.entries.iter().map(|(name, _)| name))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_values_are_omitted() {
        let params = Params::new()
            .set("action", "query")
            .opt("rcstart", None::<String>)
            .flag("bot", false)
            .multi("rvprop", Vec::<String>::new());
        assert_eq!(params.encode(), "action=query");
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn empty_values_are_sent() {
        let params = Params::new().set("summary", "");
        assert_eq!(params.get("summary"), Some(&ParamValue::Empty));
        assert_eq!(params.encode(), "summary=");
    }

    #[test]
    fn scalars_are_form_encoded() {
        let params = Params::new().set("titles", "User:Foo Bar/Run & more");
        assert_eq!(params.encode(), "titles=User%3AFoo+Bar%2FRun+%26+more");
    }

    #[test]
    fn multi_values_join_with_pipe() {
        let params = Params::new().multi("rvprop", ["timestamp", "ids", "user"]);
        assert_eq!(params.encode(), "rvprop=timestamp%7Cids%7Cuser");
    }

    #[test]
    fn multi_values_containing_pipe_use_unit_separator() {
        let value = ParamValue::Multi(vec!["a|b".into(), "c".into()]);
        assert_eq!(value.encoded(), "\u{1f}a|b\u{1f}c");
    }

    #[test]
    fn setting_twice_replaces_in_place() {
        let params = Params::new()
            .set("action", "query")
            .set("list", "search")
            .set("action", "parse");
        assert_eq!(params.encode(), "action=parse&list=search");
    }

    #[test]
    fn debug_hides_values() {
        let params = Params::new().set("lgpassword", "hunter2");
        let debug = format!("{:?}", params);
        assert!(debug.contains("lgpassword"));
        assert!(!debug.contains("hunter2"));
    }
}

//! Request encoding and response decoding.
//!
//! Every request asks for the same serialization (`format=json`,
//! `formatversion=2`). Decoding turns the body into a [`ResponseTree`],
//! surfacing an `error` marker as [`ProtocolError::Api`] and reporting a
//! `warnings` marker through `tracing` without changing control flow.

mod params;
mod response;

use serde_json::Value;
use tracing::warn;

use crate::error::ProtocolError;
use crate::transport::{Method, Request};
use crate::types::ApiUrl;

pub use params::{ParamValue, Params};
pub use response::ResponseTree;

/// Response serialization requested for every call.
pub const FORMAT: &str = "json";

/// Response format version requested for every call.
pub const FORMAT_VERSION: &str = "2";

/// Encode parameters into a request against the endpoint.
///
/// GET parameters travel in the query string, POST parameters in a
/// form-encoded body.
pub fn encode(endpoint: &ApiUrl, method: Method, params: &Params) -> Request {
    let encoded = params
        .clone()
        .set("format", FORMAT)
        .set("formatversion", FORMAT_VERSION)
        .encode();

    match method {
        Method::Get => Request {
            method,
            url: endpoint.with_query(&encoded),
            body: None,
        },
        Method::Post => Request {
            method,
            url: endpoint.as_str().to_string(),
            body: Some(encoded),
        },
    }
}

/// Decode a response body.
///
/// # Errors
///
/// Returns [`ProtocolError::Malformed`] for bytes that are not a JSON object
/// and [`ProtocolError::Api`] when the response carries an `error` marker.
pub fn decode(bytes: &[u8]) -> Result<ResponseTree, ProtocolError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| ProtocolError::Malformed {
        reason: e.to_string(),
    })?;

    let Value::Object(map) = value else {
        return Err(ProtocolError::Malformed {
            reason: "top level is not an object".to_string(),
        });
    };

    if let Some(error) = map.get("error") {
        let text = |key: &str| {
            error
                .get(key)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        return Err(ProtocolError::api(text("code"), text("info")));
    }

    let tree = ResponseTree::new(map);

    if let Some(warnings) = tree.warnings() {
        warn!(warnings = %warnings, "API returned warnings");
    }

    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use url::form_urlencoded;

    fn api() -> ApiUrl {
        ApiUrl::new("https://en.wikipedia.org/w/api.php").unwrap()
    }

    #[test]
    fn get_encodes_into_query_string() {
        let params = Params::action("query").set("meta", "userinfo");
        let request = encode(&api(), Method::Get, &params);
        assert_eq!(request.method, Method::Get);
        assert_eq!(
            request.url,
            "https://en.wikipedia.org/w/api.php?action=query&meta=userinfo&format=json&formatversion=2"
        );
        assert!(request.body.is_none());
    }

    #[test]
    fn post_encodes_into_body() {
        let params = Params::action("edit").set("title", "Sandbox").set("text", "a+b");
        let request = encode(&api(), Method::Post, &params);
        assert_eq!(request.url, "https://en.wikipedia.org/w/api.php");
        assert_eq!(
            request.body.as_deref(),
            Some("action=edit&title=Sandbox&text=a%2Bb&format=json&formatversion=2")
        );
    }

    #[test]
    fn decode_surfaces_error_marker() {
        let body = br#"{"error":{"code":"badtoken","info":"Invalid CSRF token."},"servedby":"mw1"}"#;
        let err = decode(body).unwrap_err();
        assert!(err.is_bad_token());
        assert_eq!(err.to_string(), "API error [badtoken]: Invalid CSRF token.");
    }

    #[test]
    fn decode_keeps_going_on_warnings() {
        let body = br#"{"warnings":{"main":{"warnings":"Unrecognized parameter: foo."}},"batchcomplete":true}"#;
        let tree = decode(body).unwrap();
        assert_eq!(tree.get(&["batchcomplete"]), Some(&json!(true)));
        assert!(tree.warnings().is_some());
    }

    #[test]
    fn decode_rejects_malformed_bytes() {
        assert!(matches!(
            decode(b"a:1:{s:5:\"query\";}"),
            Err(ProtocolError::Malformed { .. })
        ));
        assert!(matches!(decode(b""), Err(ProtocolError::Malformed { .. })));
        assert!(matches!(decode(b"[1,2]"), Err(ProtocolError::Malformed { .. })));
    }

    #[test]
    fn multi_value_round_trip_preserves_order_and_count() {
        let props = ["timestamp", "ids", "user", "comment", "content"];
        let request = encode(&api(), Method::Get, &Params::new().multi("rvprop", props));

        let query = request.url.split_once('?').unwrap().1;
        let sent: String = form_urlencoded::parse(query.as_bytes())
            .find(|(name, _)| name == "rvprop")
            .map(|(_, value)| value.into_owned())
            .unwrap();
        let sent: Vec<&str> = sent.split('|').collect();

        let body = serde_json::to_vec(&json!({"paraminfo": {"rvprop": sent}})).unwrap();
        let tree = decode(&body).unwrap();
        let echoed: Vec<String> = tree.extract(&["paraminfo", "rvprop"]).unwrap();

        assert_eq!(echoed.len(), props.len());
        assert_eq!(echoed, props);
    }
}

//! Conversion of request/response bodies into report text.
//!
//! Bodies are rendered by trying an ordered list of [`BodyFormat`]s; the
//! first one that accepts the bytes wins. If none does, the body is replaced
//! by [`UNSERIALIZABLE`]. Rendering never fails.

use crate::transport::RequestBody;

/// Placeholder for a body no format could represent.
pub const UNSERIALIZABLE: &str = "<unserializable>";

/// Placeholder for the response body of a call that never got a response.
pub const NO_RESPONSE: &str = "<no response due to exception>";

/// A way of turning body bytes into display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyFormat {
    /// Structured JSON (object or array), pretty-printed.
    Json,
    /// Plain UTF-8 text.
    Text,
}

impl BodyFormat {
    /// Formats tried for raw bytes, in order.
    pub const CHAIN: [Self; 2] = [Self::Json, Self::Text];

    /// Renders `bytes` in this format, or `None` if they don't fit it.
    #[must_use]
    pub fn render(self, bytes: &[u8]) -> Option<String> {
        match self {
            Self::Json => match serde_json::from_slice::<serde_json::Value>(bytes) {
                Ok(value) if value.is_object() || value.is_array() => pretty_json(&value),
                _ => None,
            },
            Self::Text => std::str::from_utf8(bytes).ok().map(str::to_string),
        }
    }
}

/// Pretty-prints a JSON value. Object keys come out sorted.
fn pretty_json(value: &serde_json::Value) -> Option<String> {
    serde_json::to_string_pretty(value).ok()
}

/// Renders raw bytes through [`BodyFormat::CHAIN`].
///
/// An empty body renders as an empty string.
#[must_use]
pub fn describe_bytes(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return String::new();
    }

    BodyFormat::CHAIN
        .iter()
        .find_map(|format| format.render(bytes))
        .unwrap_or_else(|| UNSERIALIZABLE.to_string())
}

/// Renders an outgoing request body.
#[must_use]
pub fn describe_request(body: &RequestBody) -> String {
    match body {
        RequestBody::Empty => String::new(),
        RequestBody::Json(value) => {
            pretty_json(value).unwrap_or_else(|| UNSERIALIZABLE.to_string())
        }
        RequestBody::Raw(bytes) => describe_bytes(bytes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structured_json_is_pretty_printed() {
        let rendered = describe_bytes(br#"{"bookingid":1,"booking":{"firstname":"Jim"}}"#);

        assert!(rendered.contains('\n'));
        assert!(rendered.contains("  \"bookingid\": 1"));
    }

    #[test]
    fn pretty_json_round_trips() {
        let payload = json!({
            "firstname": "Sally",
            "totalprice": 111,
            "depositpaid": true,
            "bookingdates": {"checkin": "2025-01-01", "checkout": "2025-01-05"},
            "tags": ["a", "b"]
        });

        let rendered = describe_request(&RequestBody::Json(payload.clone()));
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();

        assert_eq!(parsed, payload);
    }

    #[test]
    fn object_keys_are_sorted() {
        let rendered = describe_request(&RequestBody::Json(json!({"b": 1, "a": 2})));

        assert!(rendered.find("\"a\"").unwrap() < rendered.find("\"b\"").unwrap());
    }

    #[test]
    fn scalar_json_falls_through_to_text() {
        assert_eq!(describe_bytes(b"42"), "42");
        assert_eq!(describe_bytes(b"Created"), "Created");
    }

    #[test]
    fn invalid_utf8_becomes_placeholder() {
        assert_eq!(describe_bytes(&[0xFF, 0xFE, 0x00]), UNSERIALIZABLE);
    }

    #[test]
    fn empty_bodies_render_empty() {
        assert_eq!(describe_bytes(b""), "");
        assert_eq!(describe_request(&RequestBody::Empty), "");
    }

    #[test]
    fn raw_request_body_uses_chain() {
        let body = RequestBody::Raw(br#"[1,2]"#.to_vec());

        assert_eq!(describe_request(&body), "[\n  1,\n  2\n]");
    }

    #[test]
    fn format_render_rejects_mismatched_input() {
        assert_eq!(BodyFormat::Json.render(b"not json"), None);
        assert_eq!(BodyFormat::Text.render(&[0xC3]), None);
    }
}

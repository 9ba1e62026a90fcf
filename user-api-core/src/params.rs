//! Boundary decoding: path ids and JSON request bodies.

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use bytes::Bytes;
use serde_json::Value;

use crate::error::HttpError;
use crate::model::UserInput;

/// Parse a path segment the way JavaScript's `parseInt` reads it.
///
/// Leading whitespace and an optional sign are accepted, a `0x` prefix
/// switches to hexadecimal, and parsing stops at the first character that
/// is not a digit. Returns `None` when no digit was read, or when the value
/// cannot be a record id (negative or larger than `u64`).
pub fn parse_id(raw: &str) -> Option<u64> {
    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let mut value: u64 = 0;
    for c in digits[..end].chars() {
        let digit = c.to_digit(radix)? as u64;
        value = value.checked_mul(radix as u64)?.checked_add(digit)?;
    }

    if negative && value != 0 {
        None
    } else {
        Some(value)
    }
}

/// JSON body extractor for user payloads.
///
/// Mirrors a lenient JSON body parser: a missing body or a non-JSON content
/// type yields an empty [`UserInput`], as does a JSON array. Malformed JSON,
/// a scalar document, or a `name`/`email` of the wrong type is rejected with
/// a 400.
pub struct UserBody(pub UserInput);

impl<S: Send + Sync> FromRequest<S> for UserBody {
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !is_json_content_type(req.headers()) {
            return Ok(UserBody(UserInput::default()));
        }
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| HttpError::Custom {
                status: rejection.status(),
                body: serde_json::json!({ "message": rejection.body_text() }),
            })?;
        decode_user_input(&bytes).map(UserBody)
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    essence == "application/json"
}

/// Decode a raw body into a [`UserInput`].
pub fn decode_user_input(bytes: &[u8]) -> Result<UserInput, HttpError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(UserInput::default());
    }
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|_| HttpError::BadRequest("Invalid JSON body".into()))?;
    match value {
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|_| HttpError::BadRequest("Invalid user payload".into())),
        Value::Array(_) => Ok(UserInput::default()),
        _ => Err(HttpError::BadRequest("Invalid JSON body".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_plain_numbers() {
        assert_eq!(parse_id("1"), Some(1));
        assert_eq!(parse_id("999"), Some(999));
        assert_eq!(parse_id("007"), Some(7));
    }

    #[test]
    fn parse_id_stops_at_first_non_digit() {
        assert_eq!(parse_id("12abc"), Some(12));
        assert_eq!(parse_id("3.9"), Some(3));
        assert_eq!(parse_id("  4 "), Some(4));
        assert_eq!(parse_id("+5"), Some(5));
    }

    #[test]
    fn parse_id_hex_prefix() {
        assert_eq!(parse_id("0x10"), Some(16));
        assert_eq!(parse_id("0XfF"), Some(255));
        assert_eq!(parse_id("0x"), None);
    }

    #[test]
    fn parse_id_rejects_non_numeric() {
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("-"), None);
        assert_eq!(parse_id("filter"), None);
    }

    #[test]
    fn parse_id_negative_and_overflow_match_nothing() {
        assert_eq!(parse_id("-1"), None);
        assert_eq!(parse_id("-0"), Some(0));
        assert_eq!(parse_id("99999999999999999999999"), None);
    }

    #[test]
    fn decode_object_body() {
        let input = decode_user_input(br#"{"name":"Z","email":"z@x.com"}"#).unwrap();
        assert_eq!(input, UserInput::new("Z", "z@x.com"));
    }

    #[test]
    fn decode_empty_and_array_bodies_as_empty_input() {
        assert_eq!(decode_user_input(b"").unwrap(), UserInput::default());
        assert_eq!(decode_user_input(b"  \n").unwrap(), UserInput::default());
        assert_eq!(decode_user_input(b"[1, 2]").unwrap(), UserInput::default());
    }

    #[test]
    fn decode_rejects_malformed_and_scalar_documents() {
        assert!(matches!(decode_user_input(b"{nope"), Err(HttpError::BadRequest(m)) if m == "Invalid JSON body"));
        assert!(matches!(decode_user_input(b"42"), Err(HttpError::BadRequest(m)) if m == "Invalid JSON body"));
    }

    #[test]
    fn decode_rejects_wrongly_typed_fields() {
        assert!(matches!(
            decode_user_input(br#"{"name": 5}"#),
            Err(HttpError::BadRequest(m)) if m == "Invalid user payload"
        ));
    }

    #[test]
    fn json_content_type_detection() {
        let mut headers = HeaderMap::new();
        assert!(!is_json_content_type(&headers));
        headers.insert(CONTENT_TYPE, "application/json; charset=utf-8".parse().unwrap());
        assert!(is_json_content_type(&headers));
        headers.insert(CONTENT_TYPE, "Application/JSON".parse().unwrap());
        assert!(is_json_content_type(&headers));
        headers.insert(CONTENT_TYPE, "application/merge-patch+json".parse().unwrap());
        assert!(!is_json_content_type(&headers));
        headers.insert(CONTENT_TYPE, "text/plain".parse().unwrap());
        assert!(!is_json_content_type(&headers));
    }
}

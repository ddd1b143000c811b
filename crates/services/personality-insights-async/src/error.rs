use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Response header carrying the service's transaction id
pub const HDR_GLOBAL_TRANSACTION_ID: &str = "x-global-transaction-id";

const SNIPPET_LIMIT: usize = 400;

/// Errors that can occur when using the Personality Insights client
#[derive(Debug, Error)]
pub enum PersonalityInsightsError {
    /// HTTP transport error (DNS, TLS, timeout, connection reset)
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Non-2xx response returned by the service
    #[error("API error: {0}")]
    Api(ApiErrorObject),

    /// Request input rejected locally before any network call
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Configuration error (e.g., missing version, empty credentials)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(String),
}

/// Error details from a non-2xx service response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorObject {
    /// HTTP status code
    pub status_code: u16,
    /// Human-readable error message
    pub message: String,
    /// Status code echoed in the error body
    #[serde(default)]
    pub code: Option<u16>,
    /// Service-specific error code, e.g. `S00005`
    #[serde(default)]
    pub sub_code: Option<String>,
    /// Link to documentation for the error
    #[serde(default)]
    pub help: Option<String>,
    /// Value of the `X-Global-Transaction-Id` response header
    #[serde(default)]
    pub transaction_id: Option<String>,
    /// Response body, verbatim
    #[serde(default)]
    pub body: String,
}

impl std::fmt::Display for ApiErrorObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "status {}: {}", self.status_code, self.message)?;
        if let Some(sub_code) = &self.sub_code {
            write!(f, " ({sub_code})")?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawApiError {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    code: Option<u16>,
    #[serde(default, rename = "sub_code")]
    sub_code: Option<String>,
    #[serde(default)]
    help: Option<String>,
}

impl PersonalityInsightsError {
    /// Returns the HTTP status code for API errors
    #[must_use]
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api(obj) => Some(obj.status_code),
            Self::Reqwest(e) => e.status().map(|s| s.as_u16()),
            Self::Validation(_) | Self::Config(_) | Self::Serde(_) => None,
        }
    }
}

/// Lossy text of at most `SNIPPET_LIMIT` bytes, cut on a char boundary
fn snippet(body: &[u8]) -> String {
    // Decode a few bytes past the limit so a char straddling it stays whole
    let mut text =
        String::from_utf8_lossy(&body[..body.len().min(SNIPPET_LIMIT + 3)]).into_owned();
    if text.len() > SNIPPET_LIMIT {
        let mut end = SNIPPET_LIMIT;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}

/// Maps a serde deserialization error to a `PersonalityInsightsError` with context
#[must_use]
pub fn map_deser(e: &serde_json::Error, body: &[u8]) -> PersonalityInsightsError {
    PersonalityInsightsError::Serde(format!("{e}: {}", snippet(body)))
}

/// Builds an API error from a non-2xx response
///
/// Extracts the message from the JSON body when possible, falling back to plain text.
#[must_use]
pub fn deserialize_api_error(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
) -> PersonalityInsightsError {
    let transaction_id = headers
        .get(HDR_GLOBAL_TRANSACTION_ID)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut obj = ApiErrorObject {
        status_code: status.as_u16(),
        transaction_id,
        body: String::from_utf8_lossy(body).into_owned(),
        ..ApiErrorObject::default()
    };

    if let Ok(raw) = serde_json::from_slice::<RawApiError>(body) {
        obj.code = raw.code;
        obj.sub_code = raw.sub_code;
        obj.help = raw.help;
        if let Some(message) = raw.error.or(raw.message).or(raw.error_message) {
            obj.message = message;
        }
    }

    if obj.message.is_empty() {
        obj.message = if body.is_empty() {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            snippet(body)
        };
    }

    PersonalityInsightsError::Api(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn json_error_body_is_parsed() {
        let body = br#"{"code":400,"sub_code":"S00005","error":"The number of words 4 is less than the minimum number of words required for analysis: 100","help":"http://www.ibm.com/watson/developercloud/doc/personality-insights/errors.html"}"#;
        let mut headers = HeaderMap::new();
        headers.insert(HDR_GLOBAL_TRANSACTION_ID, HeaderValue::from_static("tx-42"));

        match deserialize_api_error(StatusCode::BAD_REQUEST, &headers, body) {
            PersonalityInsightsError::Api(obj) => {
                assert_eq!(obj.status_code, 400);
                assert_eq!(obj.code, Some(400));
                assert_eq!(obj.sub_code.as_deref(), Some("S00005"));
                assert!(obj.message.starts_with("The number of words 4"));
                assert!(obj.help.is_some());
                assert_eq!(obj.transaction_id.as_deref(), Some("tx-42"));
                assert_eq!(obj.body.as_bytes(), body);
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn message_field_fallback() {
        let body = br#"{"message":"Unauthorized","code":401}"#;
        let err = deserialize_api_error(StatusCode::UNAUTHORIZED, &HeaderMap::new(), body);
        assert_eq!(err.status_code(), Some(401));
        match err {
            PersonalityInsightsError::Api(obj) => assert_eq!(obj.message, "Unauthorized"),
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn plain_text_body_becomes_message() {
        let err = deserialize_api_error(
            StatusCode::BAD_GATEWAY,
            &HeaderMap::new(),
            b"upstream unavailable",
        );
        match err {
            PersonalityInsightsError::Api(obj) => {
                assert_eq!(obj.message, "upstream unavailable");
                assert!(obj.sub_code.is_none());
                assert!(obj.transaction_id.is_none());
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn empty_body_uses_reason_phrase() {
        let err = deserialize_api_error(StatusCode::NOT_FOUND, &HeaderMap::new(), b"");
        match err {
            PersonalityInsightsError::Api(obj) => assert_eq!(obj.message, "Not Found"),
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn long_plain_text_message_is_capped() {
        let body = "x".repeat(1000);
        let err = deserialize_api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &HeaderMap::new(),
            body.as_bytes(),
        );
        match err {
            PersonalityInsightsError::Api(obj) => {
                assert_eq!(obj.message.len(), SNIPPET_LIMIT);
                assert_eq!(obj.body.len(), 1000);
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn capped_message_keeps_multibyte_chars_whole() {
        // 1 + 2 * 300 bytes; the limit falls inside an 'é'
        let body = format!("x{}", "é".repeat(300));
        let err = deserialize_api_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            &HeaderMap::new(),
            body.as_bytes(),
        );
        match err {
            PersonalityInsightsError::Api(obj) => {
                assert_eq!(obj.message.len(), SNIPPET_LIMIT - 1);
                assert!(obj.message.ends_with('é'));
                assert!(!obj.message.contains('\u{FFFD}'));
            }
            other => panic!("Expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn display_includes_status_and_sub_code() {
        let err = PersonalityInsightsError::Api(ApiErrorObject {
            status_code: 400,
            message: "too few words".into(),
            sub_code: Some("S00005".into()),
            ..ApiErrorObject::default()
        });
        assert_eq!(
            err.to_string(),
            "API error: status 400: too few words (S00005)"
        );
    }

    #[test]
    fn map_deser_includes_snippet() {
        let body = b"not json";
        let e = serde_json::from_slice::<serde_json::Value>(body).unwrap_err();
        match map_deser(&e, body) {
            PersonalityInsightsError::Serde(msg) => assert!(msg.ends_with("not json")),
            other => panic!("Expected Serde error, got {other:?}"),
        }
    }
}

//! [`ApiError`]: the single error shape produced at the request boundary.

use reqwest::StatusCode;
use thiserror::Error;

// ---------------------------------------------------------------------------
// ApiError
// ---------------------------------------------------------------------------

/// Every failure a request can end in, tagged by where it originated.
///
/// All variants display as their bare `message`, so callers that only want
/// to show something to the user can call [`ApiError::message`] without
/// matching.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, TLS, timeout).
    #[error("{message}")]
    Transport { message: String },

    /// The server answered with a non-2xx status.
    ///
    /// `message` is the body's `message` field when one was present,
    /// otherwise the status text.
    #[error("{message}")]
    Server { status: StatusCode, message: String },

    /// Building the request or interpreting the response failed locally.
    #[error("{message}")]
    Client { message: String },
}

impl ApiError {
    /// The human-readable description carried by every variant.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Transport { message }
            | ApiError::Server { message, .. }
            | ApiError::Client { message } => message,
        }
    }

    /// The HTTP status for server-reported failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Transport { .. } | ApiError::Client { .. } => None,
        }
    }

    /// Message suitable for a notification, or `None` when the error carries
    /// nothing worth showing and the caller should use its generic fallback.
    pub fn user_message(&self) -> Option<&str> {
        let message = self.message().trim();
        (!message.is_empty()).then_some(message)
    }

    /// Build a server error from a failed response's status and body.
    ///
    /// A JSON body whose `message` is a non-empty string, a non-zero number
    /// or `true` wins, rendered as text.  Anything else (non-JSON, missing,
    /// empty, `null`, `0`, `false`, arrays, objects) falls back to the status
    /// text.
    pub fn from_server_response(status: StatusCode, body: &[u8]) -> Self {
        let declared = serde_json::from_slice::<serde_json::Value>(body)
            .ok()
            .and_then(|json| json.get("message").and_then(declared_message));

        ApiError::Server {
            status,
            message: declared.unwrap_or_else(|| status_text(status)),
        }
    }

    /// Build a server error from the status alone, without reading the body.
    pub fn from_status(status: StatusCode) -> Self {
        ApiError::Server {
            status,
            message: status_text(status),
        }
    }

    pub(crate) fn client(message: impl Into<String>) -> Self {
        ApiError::Client {
            message: message.into(),
        }
    }
}

fn declared_message(value: &serde_json::Value) -> Option<String> {
    use serde_json::Value;
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64().is_some_and(|f| f != 0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_owned()),
        _ => None,
    }
}

/// `err` followed by every distinct cause in its `source()` chain, joined
/// with `": "`.
///
/// Links whose text already appears earlier in the message are skipped.
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

/// The reason phrase for `status`, e.g. `"Service Unavailable"` for 503.
///
/// Unregistered codes fall back to the numeric code.
pub fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_owned)
        .unwrap_or_else(|| status.as_u16().to_string())
}

impl From<reqwest::Error> for ApiError {
    /// Send and connect failures become `Transport`, described by the whole
    /// cause chain (e.g. `... tcp connect error: Connection refused`); body
    /// encoding and decoding failures become `Client`.
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() || e.is_request() {
            ApiError::Transport {
                message: error_chain(&e),
            }
        } else if let Some(status) = e.status() {
            ApiError::from_status(status)
        } else {
            ApiError::Client {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Client {
            message: e.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_field_wins() {
        let err = ApiError::from_server_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            br#"{"message":"not found"}"#,
        );
        assert_eq!(err.message(), "not found");
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn missing_message_falls_back_to_status_text() {
        let err = ApiError::from_server_response(StatusCode::BAD_REQUEST, br#"{"error":"x"}"#);
        assert_eq!(err.message(), "Bad Request");
    }

    #[test]
    fn empty_message_falls_back_to_status_text() {
        let err = ApiError::from_server_response(StatusCode::NOT_FOUND, br#"{"message":""}"#);
        assert_eq!(err.message(), "Not Found");
    }

    #[test]
    fn scalar_message_is_rendered_as_text() {
        let err = ApiError::from_server_response(StatusCode::CONFLICT, br#"{"message":7}"#);
        assert_eq!(err.message(), "7");
        let err = ApiError::from_server_response(StatusCode::CONFLICT, br#"{"message":true}"#);
        assert_eq!(err.message(), "true");
    }

    #[test]
    fn falsy_or_structured_message_falls_back_to_status_text() {
        let bodies: [&[u8]; 5] = [
            br#"{"message":0}"#,
            br#"{"message":false}"#,
            br#"{"message":null}"#,
            br#"{"message":{"detail":"x"}}"#,
            br#"{"message":["x"]}"#,
        ];
        for body in bodies {
            let err = ApiError::from_server_response(StatusCode::CONFLICT, body);
            assert_eq!(err.message(), "Conflict");
        }
    }

    #[derive(Debug)]
    struct Wrapped {
        label: &'static str,
        cause: Option<Box<dyn std::error::Error + 'static>>,
    }

    impl std::fmt::Display for Wrapped {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.label)
        }
    }

    impl std::error::Error for Wrapped {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            self.cause.as_deref()
        }
    }

    #[test]
    fn error_chain_appends_every_cause() {
        let refused = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Connection refused");
        let err = Wrapped {
            label: "error sending request for url (http://127.0.0.1:9/api/voices)",
            cause: Some(Box::new(Wrapped {
                label: "tcp connect error",
                cause: Some(Box::new(refused)),
            })),
        };

        assert_eq!(
            error_chain(&err),
            "error sending request for url (http://127.0.0.1:9/api/voices): \
             tcp connect error: Connection refused"
        );
    }

    #[test]
    fn error_chain_skips_repeated_causes() {
        let err = Wrapped {
            label: "timed out: operation timed out",
            cause: Some(Box::new(Wrapped {
                label: "operation timed out",
                cause: None,
            })),
        };
        assert_eq!(error_chain(&err), "timed out: operation timed out");
    }

    #[test]
    fn unstructured_body_falls_back_to_status_text() {
        let err = ApiError::from_server_response(
            StatusCode::BAD_GATEWAY,
            b"<html>upstream exploded</html>",
        );
        assert_eq!(err.message(), "Bad Gateway");
    }

    #[test]
    fn status_only_uses_reason_phrase() {
        let err = ApiError::from_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.message(), "Service Unavailable");
        assert_eq!(err.to_string(), "Service Unavailable");
    }

    #[test]
    fn unregistered_status_uses_numeric_code() {
        let status = StatusCode::from_u16(599).unwrap();
        assert_eq!(status_text(status), "599");
    }

    #[test]
    fn user_message_is_none_for_blank_messages() {
        assert_eq!(ApiError::client("  ").user_message(), None);
        assert_eq!(ApiError::client("boom").user_message(), Some("boom"));
    }

    #[test]
    fn json_errors_are_client_errors() {
        let err: ApiError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ApiError::Client { .. }));
    }
}

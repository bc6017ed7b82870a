//! Request descriptors: what to send and how to read the answer.
//!
//! A [`RequestOptions`] is built fresh for every call and consumed by
//! [`ApiClient::dispatch`](super::ApiClient::dispatch); it is never reused.

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::multipart::Form;
use reqwest::Method;
use serde::de::DeserializeOwned;

use super::error::ApiError;
use super::stream::AudioStream;

pub const APPLICATION_JSON: &str = "application/json";

// ---------------------------------------------------------------------------
// RequestBody
// ---------------------------------------------------------------------------

/// The payload of one request.
///
/// `Multipart` and the JSON variants are mutually incompatible encodings:
/// a multipart body must carry the transport-generated boundary in its
/// content type, so the dispatcher never injects a JSON content type for it.
#[derive(Debug, Default)]
pub enum RequestBody {
    /// No body at all.
    #[default]
    Empty,
    /// A structured value serialised by the dispatcher.
    Json(serde_json::Value),
    /// An already-serialised JSON document, sent verbatim.
    RawJson(String),
    /// A `multipart/form-data` upload.
    Multipart(Form),
}

impl RequestBody {
    pub fn is_multipart(&self) -> bool {
        matches!(self, RequestBody::Multipart(_))
    }
}

// ---------------------------------------------------------------------------
// ResponseKind
// ---------------------------------------------------------------------------

/// How a successful response body should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseKind {
    /// Parse the body as JSON.  An empty body reads as `null`.
    #[default]
    Json,
    /// Buffer the whole body as raw bytes.
    Blob,
    /// Leave the body unread and hand back the live response.
    Stream,
}

// ---------------------------------------------------------------------------
// RequestOptions
// ---------------------------------------------------------------------------

/// Method, body, headers and response interpretation for one call.
///
/// ```rust
/// use tts_client::api::{RequestOptions, ResponseKind};
/// use serde_json::json;
///
/// let opts = RequestOptions::post(json!({ "voiceId": "v1" }))
///     .response(ResponseKind::Blob);
/// assert_eq!(opts.method, reqwest::Method::POST);
/// ```
#[derive(Debug)]
pub struct RequestOptions {
    pub method: Method,
    pub body: RequestBody,
    pub headers: HeaderMap,
    pub response: ResponseKind,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            body: RequestBody::Empty,
            headers: HeaderMap::new(),
            response: ResponseKind::Json,
        }
    }
}

impl RequestOptions {
    /// A bodyless `GET` expecting JSON.
    pub fn get() -> Self {
        Self::default()
    }

    /// A `POST` with a structured JSON body.
    pub fn post(body: serde_json::Value) -> Self {
        Self::default().method(Method::POST).body(RequestBody::Json(body))
    }

    /// A `POST` with a multipart form body.
    pub fn multipart(form: Form) -> Self {
        Self::default()
            .method(Method::POST)
            .body(RequestBody::Multipart(form))
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn response(mut self, kind: ResponseKind) -> Self {
        self.response = kind;
        self
    }
}

/// Final header set for a request.
///
/// Multipart bodies pass the caller's headers through untouched.  Every
/// other body gets `Content-Type: application/json` unless the caller
/// already set a content type.
pub fn prepare_headers(body: &RequestBody, mut headers: HeaderMap) -> HeaderMap {
    if body.is_multipart() {
        return headers;
    }
    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
    }
    headers
}

// ---------------------------------------------------------------------------
// ApiResponse
// ---------------------------------------------------------------------------

/// A successful response, already interpreted per [`ResponseKind`].
#[derive(Debug)]
pub enum ApiResponse {
    Json(serde_json::Value),
    Blob(Bytes),
    Stream(AudioStream),
}

impl ApiResponse {
    /// Deserialize a JSON response into `T`.
    pub fn into_json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            ApiResponse::Json(value) => Ok(serde_json::from_value(value)?),
            other => Err(ApiError::client(format!(
                "expected a JSON response, got {}",
                other.kind_name()
            ))),
        }
    }

    /// Take the buffered bytes of a blob response.
    pub fn into_blob(self) -> Result<Bytes, ApiError> {
        match self {
            ApiResponse::Blob(bytes) => Ok(bytes),
            other => Err(ApiError::client(format!(
                "expected a blob response, got {}",
                other.kind_name()
            ))),
        }
    }

    /// Take the live handle of a stream request.
    pub fn into_stream(self) -> Result<AudioStream, ApiError> {
        match self {
            ApiResponse::Stream(stream) => Ok(stream),
            other => Err(ApiError::client(format!(
                "expected a stream response, got {}",
                other.kind_name()
            ))),
        }
    }

    fn kind_name(&self) -> &'static str {
        match self {
            ApiResponse::Json(_) => "json",
            ApiResponse::Blob(_) => "blob",
            ApiResponse::Stream(_) => "stream",
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

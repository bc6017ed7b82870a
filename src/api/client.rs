//! [`ApiClient`]: the request dispatcher every remote call goes through.
//!
//! All connection details come from [`ApiConfig`]; endpoint paths are
//! appended to its resolved base URL.  The dispatcher picks the request
//! encoding, sends exactly one request, and turns every failure into an
//! [`ApiError`].  It never retries and never caches.

use reqwest::{RequestBuilder, Response};

use super::error::ApiError;
use super::request::{prepare_headers, ApiResponse, RequestBody, RequestOptions, ResponseKind};
use crate::config::ApiConfig;

/// HTTP client bound to one speech API base address.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from application config.
    ///
    /// A timeout is only configured when `timeout_secs` is set.  A default
    /// client is used as a last-resort fallback if the builder fails.
    pub fn from_config(config: &ApiConfig) -> Self {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder.build().unwrap_or_else(|e| {
            log::warn!("api: failed to build configured HTTP client ({e}); using defaults");
            reqwest::Client::new()
        });

        Self {
            client,
            base_url: config.resolved_base_url(),
        }
    }

    /// Build a client for an explicit base URL with default transport settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: crate::config::settings::normalize_base_url(&base_url.into()),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for `endpoint` (which should start with `/`).
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    // -----------------------------------------------------------------------
    // dispatch
    // -----------------------------------------------------------------------

    /// Send one request and interpret the answer per `options.response`.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Transport`] when no response arrived.
    /// * [`ApiError::Server`] for non-2xx statuses, carrying the body's
    ///   `message` field if present, else the status text.
    /// * [`ApiError::Client`] when the body could not be encoded or the
    ///   response could not be decoded.
    pub async fn dispatch(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let RequestOptions {
            method,
            body,
            headers,
            response: kind,
        } = options;

        let url = self.url(endpoint);
        log::debug!("api: {method} {url} ({kind:?})");

        let headers = prepare_headers(&body, headers);
        let builder = self.client.request(method.clone(), &url).headers(headers);
        let request = attach_body(builder, body)?;

        let response = request.send().await.map_err(|e| {
            log::warn!("api: {method} {url} failed before a response: {e}");
            ApiError::from(e)
        })?;

        let response = ensure_success(response).await?;
        interpret(response, kind).await
    }

    /// `GET endpoint` and deserialize the JSON body into `T`.
    pub async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<T, ApiError> {
        self.dispatch(endpoint, RequestOptions::get())
            .await?
            .into_json()
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.client
    }
}

fn attach_body(builder: RequestBuilder, body: RequestBody) -> Result<RequestBuilder, ApiError> {
    Ok(match body {
        RequestBody::Empty => builder,
        RequestBody::Json(value) => builder.body(serde_json::to_vec(&value)?),
        RequestBody::RawJson(raw) => builder.body(raw),
        RequestBody::Multipart(form) => builder.multipart(form),
    })
}

/// Pass 2xx responses through; read the body of anything else into an error.
async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // An unreadable error body still yields the status text.
    let body = response.bytes().await.unwrap_or_default();
    let err = ApiError::from_server_response(status, &body);
    log::warn!("api: server responded {status}: {}", err.message());
    Err(err)
}

async fn interpret(response: Response, kind: ResponseKind) -> Result<ApiResponse, ApiError> {
    match kind {
        ResponseKind::Json => {
            let bytes = response.bytes().await.map_err(ApiError::from)?;
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(ApiResponse::Json(serde_json::Value::Null));
            }
            Ok(ApiResponse::Json(serde_json::from_slice(&bytes)?))
        }
        ResponseKind::Blob => Ok(ApiResponse::Blob(
            response.bytes().await.map_err(ApiError::from)?,
        )),
        ResponseKind::Stream => Ok(ApiResponse::Stream(response.into())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

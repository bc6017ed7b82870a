//! Streaming response adapter.
//!
//! [`ApiClient::open_stream`] posts a JSON body and hands back the live
//! response as an [`AudioStream`] without reading any of its body.  Pulling
//! the bytes is up to the caller.

use bytes::Bytes;
use futures_util::{Stream, TryStreamExt};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde::Serialize;

use super::client::ApiClient;
use super::error::ApiError;
use super::request::APPLICATION_JSON;

// ---------------------------------------------------------------------------
// AudioStream
// ---------------------------------------------------------------------------

/// A successful, not-yet-consumed streaming response.
#[derive(Debug)]
pub struct AudioStream {
    response: Response,
}

impl AudioStream {
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.response.headers()
    }

    /// The `Content-Type` the server declared, if any.
    pub fn content_type(&self) -> Option<&str> {
        self.response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
    }

    /// Pull the next chunk; `Ok(None)` once the body is exhausted.
    pub async fn chunk(&mut self) -> Result<Option<Bytes>, ApiError> {
        self.response.chunk().await.map_err(ApiError::from)
    }

    /// Consume the handle as a stream of byte chunks.
    pub fn bytes_stream(self) -> impl Stream<Item = Result<Bytes, ApiError>> {
        self.response.bytes_stream().map_err(ApiError::from)
    }

    /// Give up the wrapper and take the raw transport response.
    pub fn into_response(self) -> Response {
        self.response
    }
}

impl From<Response> for AudioStream {
    fn from(response: Response) -> Self {
        Self { response }
    }
}

// ---------------------------------------------------------------------------
// open_stream
// ---------------------------------------------------------------------------

impl ApiClient {
    /// `POST endpoint` with a JSON `body` and return the live response.
    ///
    /// # Errors
    ///
    /// * [`ApiError::Server`] with the status text for any non-success
    ///   status.  The error body is never read.
    /// * [`ApiError::Transport`] when no response arrived.
    /// * [`ApiError::Client`] when `body` cannot be serialised.
    pub async fn open_stream<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<AudioStream, ApiError> {
        let url = self.url(endpoint);
        log::debug!("api: POST {url} (stream)");

        let payload = serde_json::to_vec(body)?;
        let response = self
            .http()
            .post(&url)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                log::warn!("api: POST {url} failed before a response: {e}");
                ApiError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("api: stream request to {url} rejected with {status}");
            return Err(ApiError::from_status(status));
        }

        Ok(AudioStream::from(response))
    }
}

//! Request dispatch for the speech API.
//!
//! This module provides:
//! * [`ApiClient`]: sends one request per call and unifies failures.
//! * [`RequestOptions`] / [`RequestBody`] / [`ResponseKind`]: the request
//!   descriptor and how to read the answer.
//! * [`ApiResponse`]: a response interpreted as JSON, blob or live stream.
//! * [`AudioStream`]: the live handle returned by [`ApiClient::open_stream`].
//! * [`ApiError`]: transport, server and client failures in one type.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use tts_client::api::ApiClient;
//! use tts_client::types::Model;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let client = ApiClient::new("http://localhost:3000");
//!     match client.get_json::<Vec<Model>>("/api/models").await {
//!         Ok(models) => println!("{} models", models.len()),
//!         Err(e) => eprintln!("{}", e.message()),
//!     }
//! }
//! ```

pub mod client;
pub mod error;
pub mod request;
pub mod stream;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::ApiClient;
pub use error::{status_text, ApiError};
pub use request::{prepare_headers, ApiResponse, RequestBody, RequestOptions, ResponseKind};
pub use stream::AudioStream;

/// Endpoint paths relative to the configured base URL.
pub mod endpoints {
    pub const MODELS: &str = "/api/models";
    pub const VOICES: &str = "/api/voices";
    pub const TTS_CONVERT: &str = "/api/tts/convert";
    pub const TTS_STREAM: &str = "/api/tts/stream";
}

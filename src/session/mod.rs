//! [`TtsSession`]: the operations the presentation layer calls.
//!
//! A session owns the [`ApiClient`], the [`Store`] and the [`Notifier`].
//! Each operation:
//!
//! 1. reads whatever fields it needs,
//! 2. runs its request inside [`lifecycle::run_with_failure_text`],
//! 3. writes results (or the failure text) back into the store,
//! 4. returns the original error on failure; nothing is swallowed.
//!
//! # Overlapping calls
//!
//! Operations are not deduplicated and cannot be cancelled.  Starting
//! `convert` twice before the first finishes issues two requests; both
//! raise and clear `is_converting` and the later write wins, regardless of
//! which request was issued first.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tts_client::config::AppConfig;
//! use tts_client::lifecycle::LogNotifier;
//! use tts_client::session::TtsSession;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let session = TtsSession::from_config(&AppConfig::default(), Arc::new(LogNotifier));
//!
//!     session.fetch_voices().await.ok();
//!     let first = session.store().voices.get().first().map(|v| v.voice_id.clone());
//!
//!     session.store().voice_id.set(first);
//!     session.store().text.set(Some("Hello there".into()));
//!     let audio = session.convert().await.unwrap();
//!     println!("{} bytes of audio", audio.len());
//! }
//! ```

mod catalog;
mod convert;
mod voices;

use std::future::Future;
use std::sync::Arc;

use crate::api::{ApiClient, ApiError};
use crate::config::AppConfig;
use crate::lifecycle::{self, Labels, Notifier, Operation};
use crate::store::{Field, Store};

// ---------------------------------------------------------------------------
// TtsSession
// ---------------------------------------------------------------------------

/// Client state plus the six operations that mutate it.
///
/// Cheap to clone; clones share the store, client and notifier.
#[derive(Clone)]
pub struct TtsSession {
    client: ApiClient,
    store: Store,
    notifier: Arc<dyn Notifier>,
}

impl TtsSession {
    pub fn new(client: ApiClient, store: Store, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            client,
            store,
            notifier,
        }
    }

    /// Session for the API and defaults described by `config`.
    pub fn from_config(config: &AppConfig, notifier: Arc<dyn Notifier>) -> Self {
        Self::new(
            ApiClient::from_config(&config.api),
            Store::new(&config.defaults),
            notifier,
        )
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Run `work` under the lifecycle wrapper.  On failure the text shown to
    /// the user is also written to the `error` field.
    async fn tracked<T, F>(
        &self,
        operation: Operation,
        labels: &Labels<ApiError>,
        work: F,
    ) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        lifecycle::run_with_failure_text(operation, labels, self.notifier.as_ref(), work)
            .await
            .map_err(|(err, text)| {
                self.store.error.set(Some(text));
                err
            })
    }
}

impl std::fmt::Debug for TtsSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtsSession")
            .field("base_url", &self.client.base_url())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The error's own message, or `fallback` when it has none.
fn describe(err: &ApiError, fallback: &str) -> String {
    err.user_message()
        .map(str::to_owned)
        .unwrap_or_else(|| fallback.to_owned())
}

/// `"{prefix}: {message}"`, or `fallback` when the error has no message.
fn describe_with_prefix(err: &ApiError, prefix: &str, fallback: &str) -> String {
    match err.user_message() {
        Some(message) => format!("{prefix}: {message}"),
        None => fallback.to_owned(),
    }
}

/// Holds a busy flag `true` for as long as it lives.
struct BusyGuard<'a> {
    flag: &'a Field<bool>,
}

impl<'a> BusyGuard<'a> {
    fn raise(flag: &'a Field<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

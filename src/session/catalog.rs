//! `fetch_models` / `fetch_voices`: refresh the catalogue collections.

use super::{describe, BusyGuard, TtsSession};
use crate::api::{endpoints, ApiError};
use crate::lifecycle::{Labels, Operation};
use crate::types::{Model, Voice};

impl TtsSession {
    /// `GET /api/models` into the `models` field.
    ///
    /// Success replaces the collection and clears `error`.  Failure leaves
    /// the previous collection in place.
    pub async fn fetch_models(&self) -> Result<(), ApiError> {
        let labels = Labels::new(
            "Loading models...",
            "Models fetched successfully",
            |e: &ApiError| describe(e, "An unknown error occurred trying to fetch models"),
        );

        let work = async {
            let models: Vec<Model> = self.client.get_json(endpoints::MODELS).await?;
            log::debug!("session: fetched {} models", models.len());
            self.store.models.set(models);
            self.store.error.set(None);
            Ok(())
        };

        self.tracked(Operation::FetchModels, &labels, work).await
    }

    /// `GET /api/voices` into the `voices` field.
    ///
    /// `is_fetching` is `true` for the whole call, notifications included,
    /// and is cleared on both success and failure.
    pub async fn fetch_voices(&self) -> Result<(), ApiError> {
        let _busy = BusyGuard::raise(&self.store.is_fetching);

        let labels = Labels::new(
            "Loading voices...",
            "Voices fetched successfully",
            |e: &ApiError| describe(e, "An unknown error occurred trying to fetch voices"),
        );

        let work = async {
            let voices: Vec<Voice> = self.client.get_json(endpoints::VOICES).await?;
            log::debug!("session: fetched {} voices", voices.len());
            self.store.voices.set(voices);
            self.store.error.set(None);
            Ok(())
        };

        self.tracked(Operation::FetchVoices, &labels, work).await
    }
}

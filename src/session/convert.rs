//! `convert` / `convert_as_stream`: text-to-speech.
//!
//! Both follow the same state machine:
//!
//! ```text
//! idle ──call──▶ pending (is_converting = true, error = None)
//!                  ├─ ok  ──▶ result returned  (is_converting = false)
//!                  └─ err ──▶ failed           (is_converting = false, error = text)
//! ```
//!
//! `is_converting` is cleared by a drop guard inside the tracked work, so
//! it is already `false` when the success or failure notification fires.

use bytes::Bytes;

use super::{describe_with_prefix, BusyGuard, TtsSession};
use crate::api::{endpoints, ApiError, AudioStream, RequestOptions, ResponseKind};
use crate::lifecycle::{Labels, Operation};
use crate::types::ConversionParams;

const CONVERSION_FAILED: &str = "Conversion failed";

impl TtsSession {
    /// Snapshot `{voiceId, text, outputFormat, modelId}` from the store.
    pub fn conversion_params(&self) -> ConversionParams {
        ConversionParams {
            voice_id: self.store.voice_id.get(),
            text: self.store.text.get(),
            output_format: self.store.output_format.get(),
            model_id: self.store.model_id.get(),
        }
    }

    /// `POST /api/tts/convert` and buffer the whole audio response.
    ///
    /// # Errors
    ///
    /// The dispatcher's [`ApiError`], unchanged.  The notification and the
    /// `error` field get `"Conversion failed: {message}"`.
    pub async fn convert(&self) -> Result<Bytes, ApiError> {
        let labels = Labels::new(
            "Converting text to speech...",
            "Conversion completed successfully",
            |e: &ApiError| {
                describe_with_prefix(
                    e,
                    CONVERSION_FAILED,
                    "An unknown error occurred trying to convert text-to-speech",
                )
            },
        );

        let busy = self.begin_conversion();
        let params = self.conversion_params();
        log::debug!("session: convert {params:?}");

        let work = async move {
            let _busy = busy;
            let body = serde_json::to_value(&params)?;
            self.client
                .dispatch(
                    endpoints::TTS_CONVERT,
                    RequestOptions::post(body).response(ResponseKind::Blob),
                )
                .await?
                .into_blob()
        };

        self.tracked(Operation::Convert, &labels, work).await
    }

    /// `POST /api/tts/stream` and return the live response without reading
    /// its body.
    ///
    /// # Errors
    ///
    /// A non-success status yields [`ApiError::Server`] whose message is the
    /// status text.  Once an [`AudioStream`] is returned, read errors belong
    /// to the caller.
    pub async fn convert_as_stream(&self) -> Result<AudioStream, ApiError> {
        let labels = Labels::new(
            "Converting text to speech as stream...",
            "Conversion completed successfully",
            |e: &ApiError| {
                describe_with_prefix(
                    e,
                    CONVERSION_FAILED,
                    "An unknown error occurred trying to convert text-to-speech as stream",
                )
            },
        );

        let busy = self.begin_conversion();
        let params = self.conversion_params();
        log::debug!("session: convert_as_stream {params:?}");

        let work = async move {
            let _busy = busy;
            self.client.open_stream(endpoints::TTS_STREAM, &params).await
        };

        self.tracked(Operation::ConvertAsStream, &labels, work).await
    }

    /// Enter the pending state: raise the busy flag and clear the last error.
    fn begin_conversion(&self) -> BusyGuard<'_> {
        let busy = BusyGuard::raise(&self.store.is_converting);
        self.store.error.set(None);
        busy
    }
}

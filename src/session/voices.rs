//! `add_voice` / `del_voice`: voice management.

use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::json;

use super::{describe_with_prefix, TtsSession};
use crate::api::{endpoints, ApiError, RequestBody, RequestOptions, ResponseKind};
use crate::lifecycle::{Labels, Operation};
use crate::store::VoiceSample;
use crate::types::RemoveBgNoise;

impl TtsSession {
    /// `POST /api/voices` as `multipart/form-data` with the parts `files`,
    /// `name` and `removeBackgroundNoise`.
    ///
    /// The response body is ignored.  The voice list is not refreshed; call
    /// [`fetch_voices`](Self::fetch_voices) afterwards to see the new voice.
    pub async fn add_voice(
        &self,
        sample: VoiceSample,
        name: &str,
        remove_background_noise: RemoveBgNoise,
    ) -> Result<(), ApiError> {
        let labels = Labels::new(
            "Creating a new voice...",
            "Voice created successfully",
            |e: &ApiError| {
                describe_with_prefix(
                    e,
                    "Failed to create voice",
                    "An unknown error occurred trying to create voice",
                )
            },
        );

        let name = name.to_owned();
        let work = async move {
            let form = voice_form(sample, name, remove_background_noise)?;
            self.client
                .dispatch(
                    endpoints::VOICES,
                    RequestOptions::multipart(form).response(ResponseKind::Blob),
                )
                .await?;
            Ok(())
        };

        self.tracked(Operation::AddVoice, &labels, work).await
    }

    /// `DELETE /api/voices` with the JSON body `{"voiceId": voice_id}`.
    pub async fn del_voice(&self, voice_id: &str) -> Result<(), ApiError> {
        let labels = Labels::new(
            "Deleting voice...",
            "Voice deleted successfully",
            |e: &ApiError| {
                describe_with_prefix(
                    e,
                    "Failed to delete voice",
                    "An unknown error occurred trying to delete voice",
                )
            },
        );

        let body = json!({ "voiceId": voice_id }).to_string();
        let work = async move {
            self.client
                .dispatch(
                    endpoints::VOICES,
                    RequestOptions::default()
                        .method(Method::DELETE)
                        .body(RequestBody::RawJson(body))
                        .response(ResponseKind::Blob),
                )
                .await?;
            Ok(())
        };

        self.tracked(Operation::DeleteVoice, &labels, work).await
    }
}

fn voice_form(
    sample: VoiceSample,
    name: String,
    remove_background_noise: RemoveBgNoise,
) -> Result<Form, ApiError> {
    let mut part = Part::bytes(sample.bytes.to_vec()).file_name(sample.file_name);
    if let Some(mime) = sample.mime_type.as_deref() {
        part = part
            .mime_str(mime)
            .map_err(|e| ApiError::client(format!("invalid sample MIME type {mime:?}: {e}")))?;
    }

    Ok(Form::new()
        .part("files", part)
        .text("name", name)
        .text("removeBackgroundNoise", remove_background_noise.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_form_rejects_bad_mime() {
        let sample = VoiceSample::new("a.mp3", vec![1u8, 2, 3]).with_mime_type("not a mime");
        let err = voice_form(sample, "Me".into(), RemoveBgNoise::True).unwrap_err();
        assert!(matches!(err, ApiError::Client { .. }));
    }

    #[test]
    fn voice_form_builds_with_mime() {
        let sample = VoiceSample::new("a.mp3", vec![1u8, 2, 3]).with_mime_type("audio/mpeg");
        let form = voice_form(sample, "Me".into(), RemoveBgNoise::False).unwrap();
        assert!(!form.boundary().is_empty());
    }
}

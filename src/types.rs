//! Wire records and enums exchanged with the speech API.
//!
//! Every record mirrors the server's camelCase JSON.  Records are read-only
//! projections: the client never assigns identity to them or caches them
//! beyond the latest fetched collection.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ModelId
// ---------------------------------------------------------------------------

/// Speech synthesis model identifiers accepted by `/api/tts/*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelId {
    #[serde(rename = "eleven_monolingual_v1")]
    ElevenMonolingualV1,
    #[serde(rename = "eleven_multilingual_v1")]
    ElevenMultilingualV1,
    #[serde(rename = "eleven_multilingual_v2")]
    ElevenMultilingualV2,
    #[serde(rename = "eleven_turbo_v2")]
    ElevenTurboV2,
    #[serde(rename = "eleven_flash_v2")]
    ElevenFlashV2,
    #[serde(rename = "eleven_turbo_v2_5")]
    ElevenTurboV2_5,
    #[serde(rename = "eleven_flash_v2_5")]
    ElevenFlashV2_5,
    #[serde(rename = "eleven_english_sts_v2")]
    ElevenEnglishStsV2,
    #[serde(rename = "eleven_multilingual_sts_v2")]
    ElevenMultilingualStsV2,
}

impl ModelId {
    /// The identifier as sent on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelId::ElevenMonolingualV1 => "eleven_monolingual_v1",
            ModelId::ElevenMultilingualV1 => "eleven_multilingual_v1",
            ModelId::ElevenMultilingualV2 => "eleven_multilingual_v2",
            ModelId::ElevenTurboV2 => "eleven_turbo_v2",
            ModelId::ElevenFlashV2 => "eleven_flash_v2",
            ModelId::ElevenTurboV2_5 => "eleven_turbo_v2_5",
            ModelId::ElevenFlashV2_5 => "eleven_flash_v2_5",
            ModelId::ElevenEnglishStsV2 => "eleven_english_sts_v2",
            ModelId::ElevenMultilingualStsV2 => "eleven_multilingual_sts_v2",
        }
    }
}

impl Default for ModelId {
    fn default() -> Self {
        ModelId::ElevenMultilingualV2
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// OutputFormat
// ---------------------------------------------------------------------------

/// Audio encodings the conversion endpoints can return.
///
/// Named `codec_samplerate_bitrate`, e.g. `mp3_44100_128`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputFormat {
    #[serde(rename = "mp3_22050_32")]
    Mp3_22050_32,
    #[serde(rename = "mp3_44100_32")]
    Mp3_44100_32,
    #[serde(rename = "mp3_44100_64")]
    Mp3_44100_64,
    #[serde(rename = "mp3_44100_96")]
    Mp3_44100_96,
    #[serde(rename = "mp3_44100_128")]
    Mp3_44100_128,
    #[serde(rename = "mp3_44100_192")]
    Mp3_44100_192,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Mp3_22050_32 => "mp3_22050_32",
            OutputFormat::Mp3_44100_32 => "mp3_44100_32",
            OutputFormat::Mp3_44100_64 => "mp3_44100_64",
            OutputFormat::Mp3_44100_96 => "mp3_44100_96",
            OutputFormat::Mp3_44100_128 => "mp3_44100_128",
            OutputFormat::Mp3_44100_192 => "mp3_44100_192",
        }
    }

    /// Conventional file extension (without the dot).
    pub fn extension(&self) -> &'static str {
        "mp3"
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Mp3_44100_128
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RemoveBgNoise
// ---------------------------------------------------------------------------

/// Whether the server should strip background noise from an uploaded sample.
///
/// Sent as the multipart text field `removeBackgroundNoise`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoveBgNoise {
    True,
    False,
}

impl RemoveBgNoise {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoveBgNoise::True => "true",
            RemoveBgNoise::False => "false",
        }
    }
}

impl Default for RemoveBgNoise {
    fn default() -> Self {
        RemoveBgNoise::True
    }
}

impl From<bool> for RemoveBgNoise {
    fn from(value: bool) -> Self {
        if value {
            RemoveBgNoise::True
        } else {
            RemoveBgNoise::False
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A language supported by a [`Model`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Language {
    pub name: String,
    pub language_id: String,
}

/// A synthesis model as listed by `GET /api/models`.
///
/// Only `modelId` is guaranteed; every other attribute is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub model_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "canDoTTS", skip_serializing_if = "Option::is_none")]
    pub can_do_tts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_do_voice_conversion: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_cost_factor: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_char_req_free_user: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_char_req_subscribed_user: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum_text_length_per_request: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<Language>>,
}

impl Model {
    /// Convenience constructor for a model known only by id.
    pub fn with_id(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            ..Self::default()
        }
    }
}

/// A voice as listed by `GET /api/voices`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Voice {
    pub voice_id: String,
    pub name: String,
}

// ---------------------------------------------------------------------------
// ConversionParams
// ---------------------------------------------------------------------------

/// JSON body of `POST /api/tts/convert` and `POST /api/tts/stream`.
///
/// Snapshotted from the session fields at call time.  Unset voice or text
/// are sent as `null`; the server rejects them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionParams {
    pub voice_id: Option<String>,
    pub text: Option<String>,
    pub output_format: OutputFormat,
    pub model_id: ModelId,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn model_with_only_id_deserializes() {
        let models: Vec<Model> = serde_json::from_value(json!([{ "modelId": "m1" }])).unwrap();
        assert_eq!(models, vec![Model::with_id("m1")]);
    }

    #[test]
    fn model_full_record_deserializes() {
        let model: Model = serde_json::from_value(json!({
            "modelId": "eleven_multilingual_v2",
            "name": "Multilingual v2",
            "canDoTTS": true,
            "canDoVoiceConversion": false,
            "tokenCostFactor": 1.0,
            "maximumTextLengthPerRequest": 10000,
            "languages": [{ "name": "English", "languageId": "en" }]
        }))
        .unwrap();

        assert_eq!(model.can_do_tts, Some(true));
        assert_eq!(model.can_do_voice_conversion, Some(false));
        assert_eq!(model.maximum_text_length_per_request, Some(10_000));
        let langs = model.languages.unwrap();
        assert_eq!(langs[0].language_id, "en");
    }

    #[test]
    fn voice_deserializes_camel_case() {
        let voice: Voice =
            serde_json::from_value(json!({ "voiceId": "v1", "name": "Rachel" })).unwrap();
        assert_eq!(voice.voice_id, "v1");
        assert_eq!(voice.name, "Rachel");
    }

    #[test]
    fn conversion_params_serialize_wire_names() {
        let params = ConversionParams {
            voice_id: Some("v1".into()),
            text: None,
            output_format: OutputFormat::default(),
            model_id: ModelId::default(),
        };
        assert_eq!(
            serde_json::to_value(&params).unwrap(),
            json!({
                "voiceId": "v1",
                "text": null,
                "outputFormat": "mp3_44100_128",
                "modelId": "eleven_multilingual_v2"
            })
        );
    }

    #[test]
    fn enum_as_str_matches_serde() {
        for id in [ModelId::ElevenTurboV2_5, ModelId::ElevenEnglishStsV2] {
            assert_eq!(serde_json::to_value(id).unwrap(), json!(id.as_str()));
        }
        for fmt in [OutputFormat::Mp3_22050_32, OutputFormat::Mp3_44100_192] {
            assert_eq!(serde_json::to_value(fmt).unwrap(), json!(fmt.as_str()));
        }
    }

    #[test]
    fn remove_bg_noise_defaults_to_true() {
        assert_eq!(RemoveBgNoise::default().as_str(), "true");
        assert_eq!(RemoveBgNoise::from(false), RemoveBgNoise::False);
    }
}

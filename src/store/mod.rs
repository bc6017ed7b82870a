//! Reactive state for the TTS front-end.
//!
//! [`Store`] groups one [`Field`] per logical piece of client state.  It is
//! created once when a session starts and lives as long as the session.
//! Fields never write each other: any cross-field effect (clearing `error`
//! after a successful fetch, raising a busy flag) is performed explicitly
//! by the operation that owns it in [`crate::session`].
//!
//! # Architecture
//!
//! ```text
//! presentation layer ──get / subscribe──▶ Store fields
//!        │                                     ▲
//!        └──calls──▶ TtsSession operations ──set┘
//! ```

pub mod field;

pub use field::{Field, Subscription};

use bytes::Bytes;

use crate::config::DefaultsConfig;
use crate::types::{Model, ModelId, OutputFormat, RemoveBgNoise, Voice};

// ---------------------------------------------------------------------------
// VoiceSample
// ---------------------------------------------------------------------------

/// An audio sample queued for upload as a new voice.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceSample {
    /// File name reported in the multipart part.
    pub file_name: String,
    /// Raw file contents.
    pub bytes: Bytes,
    /// MIME type of the sample, e.g. `audio/mpeg`.  `None` lets the server
    /// sniff it.
    pub mime_type: Option<String>,
}

impl VoiceSample {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime_type: None,
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Read a sample from disk, guessing the MIME type from the extension.
    pub async fn from_path(path: impl AsRef<std::path::Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sample".into());

        let sample = Self::new(file_name, bytes);
        Ok(match guess_audio_mime(path) {
            Some(mime) => sample.with_mime_type(mime),
            None => sample,
        })
    }
}

fn guess_audio_mime(path: &std::path::Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "mp3" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "ogg" => Some("audio/ogg"),
        "flac" => Some("audio/flac"),
        "m4a" => Some("audio/mp4"),
        "webm" => Some("audio/webm"),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Every observable field of a session.
///
/// Cloning a `Store` clones the field handles, not the values: both copies
/// observe and mutate the same state.
#[derive(Debug, Clone)]
pub struct Store {
    // ── conversion ─────────────────────────────────────────────────────────
    /// Voice used for conversions.
    pub voice_id: Field<Option<String>>,
    /// Text to convert.
    pub text: Field<Option<String>>,
    pub output_format: Field<OutputFormat>,
    pub model_id: Field<ModelId>,
    /// UI step counter for the conversion form.  Starts at 1.
    pub convert_state: Field<u32>,
    /// Busy flag for `convert` / `convert_as_stream`.
    pub is_converting: Field<bool>,

    // ── catalogue ──────────────────────────────────────────────────────────
    pub models: Field<Vec<Model>>,
    pub voices: Field<Vec<Voice>>,
    /// Busy flag for `fetch_voices`.
    pub is_fetching: Field<bool>,

    // ── voice management form ──────────────────────────────────────────────
    /// Name for the voice being created.
    pub name: Field<Option<String>>,
    /// Sample selected for the voice being created.
    pub files: Field<Option<VoiceSample>>,
    pub remove_background_noise: Field<RemoveBgNoise>,
    /// Voice selected for deletion.
    pub del_voice_id: Field<Option<String>>,

    // ── shared ─────────────────────────────────────────────────────────────
    /// Message of the last failed operation; `None` when cleared.
    pub error: Field<Option<String>>,
}

impl Store {
    /// A fresh store seeded with `defaults`.
    pub fn new(defaults: &DefaultsConfig) -> Self {
        Self {
            voice_id: Field::new("voice_id", None),
            text: Field::new("text", None),
            output_format: Field::new("output_format", defaults.output_format),
            model_id: Field::new("model_id", defaults.model_id),
            convert_state: Field::new("convert_state", 1),
            is_converting: Field::new("is_converting", false),
            models: Field::new("models", Vec::new()),
            voices: Field::new("voices", Vec::new()),
            is_fetching: Field::new("is_fetching", false),
            name: Field::new("name", None),
            files: Field::new("files", None),
            remove_background_noise: Field::new(
                "remove_background_noise",
                RemoveBgNoise::default(),
            ),
            del_voice_id: Field::new("del_voice_id", None),
            error: Field::new("error", None),
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(&DefaultsConfig::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

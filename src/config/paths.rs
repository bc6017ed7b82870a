//! Where the client keeps `settings.toml` and the audio it writes.
//!
//! | Platform | settings                                  | audio                                     |
//! |----------|-------------------------------------------|-------------------------------------------|
//! | Linux    | `~/.config/tts-client/`                   | `~/.local/share/tts-client/audio/`        |
//! | macOS    | `~/Library/Application Support/tts-client/` | `~/Library/Application Support/tts-client/audio/` |
//! | Windows  | `%APPDATA%\tts-client\`                   | `%LOCALAPPDATA%\tts-client\audio\`        |

use std::path::{Path, PathBuf};

use crate::types::OutputFormat;

const APP_DIR: &str = "tts-client";
const SETTINGS_FILE: &str = "settings.toml";
const AUDIO_DIR: &str = "audio";

/// Settings file and audio output locations for this user.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub settings_file: PathBuf,
    /// Conversions saved by the binary land here.
    pub output_dir: PathBuf,
}

impl AppPaths {
    /// Per-user locations from `dirs`; `.` stands in for any base the
    /// platform does not define.
    pub fn new() -> Self {
        Self::rooted(dirs::config_dir(), dirs::data_local_dir())
    }

    fn rooted(config_base: Option<PathBuf>, data_base: Option<PathBuf>) -> Self {
        let app_dir = |base: Option<PathBuf>| {
            base.unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR)
        };
        let config_dir = app_dir(config_base);

        Self {
            settings_file: config_dir.join(SETTINGS_FILE),
            output_dir: app_dir(data_base).join(AUDIO_DIR),
            config_dir,
        }
    }

    /// `<output_dir>/<stem>.<ext>` for audio encoded as `format`.
    pub fn audio_file(&self, stem: &str, format: OutputFormat) -> PathBuf {
        self.output_dir.join(Path::new(stem).with_extension(format.extension()))
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_live_in_the_config_dir() {
        let paths = AppPaths::new();
        assert!(paths.config_dir.ends_with(APP_DIR));
        assert!(paths.settings_file.starts_with(&paths.config_dir));
        assert!(paths.settings_file.ends_with(SETTINGS_FILE));
        assert!(paths.output_dir.ends_with(Path::new(APP_DIR).join(AUDIO_DIR)));
    }

    #[test]
    fn missing_platform_dirs_fall_back_to_cwd() {
        let paths = AppPaths::rooted(None, None);
        assert_eq!(paths.config_dir, Path::new(".").join(APP_DIR));
        assert_eq!(paths.output_dir, Path::new(".").join(APP_DIR).join(AUDIO_DIR));
    }

    #[test]
    fn audio_file_uses_format_extension() {
        let paths = AppPaths::rooted(Some("/cfg".into()), Some("/data".into()));
        assert_eq!(
            paths.audio_file("speech", OutputFormat::Mp3_22050_32),
            Path::new("/data/tts-client/audio/speech.mp3")
        );
    }
}

//! Command-line front-end for the TTS client.
//!
//! ```text
//! tts-client                       list models and voices
//! tts-client <voice-id> <text...>  stream a conversion to an mp3 file
//! ```
//!
//! # Startup sequence
//!
//! 1. Load [`AppConfig`] from disk (returns default on first run).
//! 2. Initialise logging from `[logging].level` (overridden by `RUST_LOG`).
//! 3. Build the [`TtsSession`] with a [`LogNotifier`].
//! 4. Fetch models and voices.
//! 5. If a voice and text were given, stream the conversion to
//!    `<output_dir>/speech.mp3`, chunk by chunk.

use std::sync::Arc;

use anyhow::Context;
use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tts_client::config::{AppConfig, AppPaths};
use tts_client::lifecycle::LogNotifier;
use tts_client::TtsSession;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. Configuration
    let config_result = AppConfig::load();
    let config = config_result.as_ref().cloned().unwrap_or_default();

    // 2. Logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();
    if let Err(e) = &config_result {
        log::warn!("Failed to load config ({e}); using defaults");
    }
    log::info!("TTS client starting up (API: {})", config.api.resolved_base_url());

    // 3. Session
    let session = TtsSession::from_config(&config, Arc::new(LogNotifier));
    let store = session.store();

    let mut errors = store.error.subscribe();
    tokio::spawn(async move {
        while let Some(error) = errors.recv().await {
            if let Some(message) = error {
                log::error!("{message}");
            }
        }
    });

    // 4. Catalogue
    let (models, voices) = tokio::join!(session.fetch_models(), session.fetch_voices());
    if models.is_ok() {
        for model in store.models.get() {
            println!(
                "model  {:<28} {}",
                model.model_id,
                model.name.as_deref().unwrap_or("")
            );
        }
    }
    if voices.is_ok() {
        for voice in store.voices.get() {
            println!("voice  {:<28} {}", voice.voice_id, voice.name);
        }
    }

    // 5. Conversion
    let mut args = std::env::args().skip(1);
    let Some(voice_id) = args.next() else {
        return Ok(());
    };
    let text = args.collect::<Vec<_>>().join(" ");
    anyhow::ensure!(!text.trim().is_empty(), "usage: tts-client <voice-id> <text...>");

    store.voice_id.set(Some(voice_id));
    store.text.set(Some(text));

    let format = store.output_format.get();
    let paths = AppPaths::new();
    tokio::fs::create_dir_all(&paths.output_dir)
        .await
        .with_context(|| format!("creating {}", paths.output_dir.display()))?;
    let path = paths.audio_file("speech", format);

    let stream = session.convert_as_stream().await?;
    let mut file = tokio::fs::File::create(&path)
        .await
        .with_context(|| format!("creating {}", path.display()))?;

    let mut written = 0usize;
    let mut chunks = Box::pin(stream.bytes_stream());
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        written += chunk.len();
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    log::info!("Wrote {written} bytes of {format} audio to {}", path.display());
    println!("{}", path.display());
    Ok(())
}

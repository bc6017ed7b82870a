//! Configuration module for the TTS client.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the API,
//! conversion defaults and logging, `AppPaths` for cross-platform
//! directories, and TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{ApiConfig, AppConfig, DefaultsConfig, LoggingConfig, API_URL_ENV};

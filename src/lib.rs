//! Client-side data layer for a text-to-speech front-end.
//!
//! * [`api`]: request dispatch, the unified [`api::ApiError`], and the
//!   streaming adapter.
//! * [`lifecycle`]: pending/success/failure notifications around each call.
//! * [`store`]: observable fields holding the client state.
//! * [`session`]: the six operations the presentation layer invokes.
//! * [`config`]: TOML settings and platform paths.
//! * [`types`]: wire records and enums.

pub mod api;
pub mod config;
pub mod lifecycle;
pub mod session;
pub mod store;
pub mod types;

pub use api::{ApiClient, ApiError, AudioStream};
pub use session::TtsSession;
pub use store::{Field, Store};

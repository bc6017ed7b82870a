//! Notification sinks for operation lifecycle events.
//!
//! The core only ever calls [`Notifier::notify`]; it never inspects what a
//! sink does with the event.

use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Operation / Phase / LifecycleEvent
// ---------------------------------------------------------------------------

/// The operations a session can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    FetchModels,
    FetchVoices,
    AddVoice,
    DeleteVoice,
    Convert,
    ConvertAsStream,
}

impl Operation {
    /// Stable identifier, e.g. for log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::FetchModels => "fetch_models",
            Operation::FetchVoices => "fetch_voices",
            Operation::AddVoice => "add_voice",
            Operation::DeleteVoice => "del_voice",
            Operation::Convert => "convert",
            Operation::ConvertAsStream => "convert_as_stream",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where an operation is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Pending,
    Success,
    Failure,
}

/// One phase transition of one operation, with the text to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub operation: Operation,
    pub phase: Phase,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Notifier trait
// ---------------------------------------------------------------------------

/// Receives lifecycle events.
///
/// Implementors must be `Send + Sync` so a session can share them
/// (`Arc<dyn Notifier>`).  Any `Fn(&LifecycleEvent)` closure is a notifier.
pub trait Notifier: Send + Sync {
    fn notify(&self, event: &LifecycleEvent);
}

impl<F> Notifier for F
where
    F: Fn(&LifecycleEvent) + Send + Sync,
{
    fn notify(&self, event: &LifecycleEvent) {
        self(event)
    }
}

// ---------------------------------------------------------------------------
// LogNotifier
// ---------------------------------------------------------------------------

/// Renders events through the `log` facade.
///
/// Pending and success go to `info`, failures to `warn`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: &LifecycleEvent) {
        match event.phase {
            Phase::Pending | Phase::Success => {
                log::info!("[{}] {}", event.operation, event.message)
            }
            Phase::Failure => log::warn!("[{}] {}", event.operation, event.message),
        }
    }
}

// ---------------------------------------------------------------------------
// ChannelNotifier
// ---------------------------------------------------------------------------

/// Forwards events over an unbounded channel, e.g. to a UI task that
/// renders toasts.
///
/// Events sent after the receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: mpsc::UnboundedSender<LifecycleEvent>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<LifecycleEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, event: &LifecycleEvent) {
        if self.tx.send(event.clone()).is_err() {
            log::debug!("lifecycle: event receiver dropped; discarding {:?}", event.phase);
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

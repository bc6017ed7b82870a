//! Operation lifecycle wrapper.
//!
//! [`run`] awaits one unit of work and reports its phases to a
//! [`Notifier`]:
//!
//! ```text
//! Pending(labels.pending) ──await work──▶ Ok  → Success(labels.success)
//!                                      └─▶ Err → Failure(labels.failure(&err))
//! ```
//!
//! The wrapper never swallows a failure: the error is returned to the
//! caller unchanged after the sink has been told.  Busy flags and error
//! fields are left to the caller, because operations clear them at
//! different points.
//!
//! Nothing here stops the same operation from running twice at once; two
//! overlapping runs emit interleaved events and race on whatever fields
//! their callers write.

pub mod notifier;

pub use notifier::{ChannelNotifier, LifecycleEvent, LogNotifier, Notifier, Operation, Phase};

use std::future::Future;

// ---------------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------------

/// What to show the user for each phase of one operation.
pub struct Labels<E> {
    pub pending: String,
    pub success: String,
    failure: Box<dyn Fn(&E) -> String + Send + Sync>,
}

impl<E> Labels<E> {
    pub fn new(
        pending: impl Into<String>,
        success: impl Into<String>,
        failure: impl Fn(&E) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            pending: pending.into(),
            success: success.into(),
            failure: Box::new(failure),
        }
    }

    /// Failure text for `err`.
    pub fn failure(&self, err: &E) -> String {
        (self.failure)(err)
    }
}

impl<E> std::fmt::Debug for Labels<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Labels")
            .field("pending", &self.pending)
            .field("success", &self.success)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Await `work`, notifying `notifier` before it starts and after it ends.
///
/// Returns the work's result untouched.  Use [`run_with_failure_text`]
/// when the caller also needs the failure text that was shown.
pub async fn run<T, E, F>(
    operation: Operation,
    labels: &Labels<E>,
    notifier: &dyn Notifier,
    work: F,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    run_with_failure_text(operation, labels, notifier, work)
        .await
        .map_err(|(err, _)| err)
}

/// Like [`run`], but a failure also yields the text that was sent to the
/// sink.
pub async fn run_with_failure_text<T, E, F>(
    operation: Operation,
    labels: &Labels<E>,
    notifier: &dyn Notifier,
    work: F,
) -> Result<T, (E, String)>
where
    F: Future<Output = Result<T, E>>,
{
    notifier.notify(&LifecycleEvent {
        operation,
        phase: Phase::Pending,
        message: labels.pending.clone(),
    });

    match work.await {
        Ok(value) => {
            notifier.notify(&LifecycleEvent {
                operation,
                phase: Phase::Success,
                message: labels.success.clone(),
            });
            Ok(value)
        }
        Err(err) => {
            let message = labels.failure(&err);
            notifier.notify(&LifecycleEvent {
                operation,
                phase: Phase::Failure,
                message: message.clone(),
            });
            Err((err, message))
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

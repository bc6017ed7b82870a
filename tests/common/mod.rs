//! Shared fixtures for integration tests: a mock speech API and a notifier
//! that records every lifecycle event.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use mockito::{Server, ServerGuard};
use tts_client::lifecycle::{LifecycleEvent, Notifier, Phase};
use tts_client::{ApiClient, Store, TtsSession};

/// Records every event it receives.
#[derive(Default, Clone)]
pub struct Recorder(Arc<Mutex<Vec<LifecycleEvent>>>);

impl Notifier for Recorder {
    fn notify(&self, event: &LifecycleEvent) {
        self.0.lock().unwrap().push(event.clone());
    }
}

impl Recorder {
    pub fn events(&self) -> Vec<LifecycleEvent> {
        self.0.lock().unwrap().clone()
    }

    pub fn phases(&self) -> Vec<Phase> {
        self.events().into_iter().map(|e| e.phase).collect()
    }

    /// Message of the last failure event, if any.
    pub fn last_failure(&self) -> Option<String> {
        self.events()
            .into_iter()
            .rev()
            .find(|e| e.phase == Phase::Failure)
            .map(|e| e.message)
    }
}

/// A mock server plus a session pointed at it.
pub struct Fixture {
    pub server: ServerGuard,
    pub session: TtsSession,
    pub recorder: Recorder,
}

impl Fixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let recorder = Recorder::default();
        let session = TtsSession::new(
            ApiClient::new(server.url()),
            Store::default(),
            Arc::new(recorder.clone()),
        );
        Self {
            server,
            session,
            recorder,
        }
    }
}

/// A base URL nothing is listening on.
pub fn closed_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

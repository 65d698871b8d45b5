//! Mock model for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use mockmate_core::traits::{CompletionRequest, CompletionResponse, TextModel};

/// What the mock does on one call.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Return this text.
    Content(String),
    /// Fail with this error message.
    Failure(String),
}

/// A mock text model for exercising the engine and server without real API
/// calls.
///
/// Replays a scripted queue of replies, then repeats the final one forever.
pub struct MockModel {
    script: Mutex<VecDeque<MockReply>>,
    last: Mutex<MockReply>,
    call_count: AtomicU32,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl MockModel {
    /// A mock that always returns the same reply.
    pub fn with_fixed_reply(reply: &str) -> Self {
        Self::with_script(vec![MockReply::Content(reply.to_string())])
    }

    /// A mock that always fails.
    pub fn always_failing(error: &str) -> Self {
        Self::with_script(vec![MockReply::Failure(error.to_string())])
    }

    /// A mock that replays `script` in order, repeating the last entry.
    pub fn with_script(script: Vec<MockReply>) -> Self {
        let last = script
            .last()
            .cloned()
            .unwrap_or(MockReply::Content(String::new()));
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(last),
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Number of calls made to this model.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The last request received, if any.
    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextModel for MockModel {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<CompletionResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap() = Some(request.clone());

        let reply = match self.script.lock().unwrap().pop_front() {
            Some(reply) => {
                *self.last.lock().unwrap() = reply.clone();
                reply
            }
            None => self.last.lock().unwrap().clone(),
        };

        match reply {
            MockReply::Content(content) => Ok(CompletionResponse {
                content,
                model: request.model.clone(),
                latency_ms: 1,
            }),
            MockReply::Failure(error) => Err(anyhow::anyhow!("{error}")),
        }
    }
}

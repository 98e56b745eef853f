use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::connector::adapter::{HttpRequest, HttpResponse, HttpTransport};
use crate::domain::TransportError;

/// Reply used when nothing has been scripted: a well-formed completion.
pub const MOCK_COMPLETION_TEXT: &str = "High fructose corn syrup: linked to weight gain and insulin resistance.\n\
Sodium nitrite: can form nitrosamines, which are associated with cancer risk.";

/// An in-process [`HttpTransport`] that never touches the network.
///
/// Replies are served from a script in order; once the script runs out the
/// default reply is repeated. Every request is recorded for inspection.
pub struct MockTransport {
    script: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    default_reply: Result<HttpResponse, TransportError>,
    delay: Duration,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::replying(Ok(HttpResponse::new(200, completion_body(MOCK_COMPLETION_TEXT))))
    }

    /// Always answers with `status` and `body`.
    pub fn with_response(status: u16, body: impl Into<String>) -> Self {
        Self::replying(Ok(HttpResponse::new(status, body)))
    }

    /// Always answers `200` with a completion whose first choice is `content`.
    pub fn with_completion(content: &str) -> Self {
        Self::with_response(200, completion_body(content))
    }

    /// Always fails below the HTTP layer.
    pub fn failing(error: TransportError) -> Self {
        Self::replying(Err(error))
    }

    fn replying(default_reply: Result<HttpResponse, TransportError>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            default_reply,
            delay: Duration::ZERO,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a one-off reply ahead of the default.
    pub fn push_reply(&self, reply: Result<HttpResponse, TransportError>) {
        lock(&self.script).push_back(reply);
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!("MockTransport: POST {}", request.url);
        lock(&self.requests).push(request);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let scripted = lock(&self.script).pop_front();
        scripted.unwrap_or_else(|| self.default_reply.clone())
    }
}

/// Minimal chat-completion success body with a single choice.
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
    .to_string()
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

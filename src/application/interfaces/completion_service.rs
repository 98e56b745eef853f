use async_trait::async_trait;

use crate::domain::{ApiKey, CompletionResult};

/// Sends one prompt to a chat-completion service and reports the reply.
///
/// Implementors make exactly one attempt per call and never panic on a bad
/// reply: every failure, whether HTTP, transport, or parse, comes back as
/// [`CompletionResult::Failure`].
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn fetch_completion(&self, prompt: &str, api_key: &ApiKey) -> CompletionResult;

    /// Model identifier sent with each request.
    fn model_name(&self) -> &str;
}

use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// System message framing the assistant for every label analysis.
pub const SYSTEM_INSTRUCTION: &str = "You are a meticulous nutrition expert. \
Your primary role is to identify harmful ingredients in nutrition labels with utmost accuracy. \
Understand and follow the provided instructions strictly, \
ensuring no harmful ingredient is overlooked.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    role: Role,
    content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// One outbound chat completion: the fixed system message followed by the
/// prompt as the only user message. Built fresh for every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, prompt: &str) -> Self {
        Self {
            model: model.into(),
            messages: vec![
                ChatMessage::new(Role::System, SYSTEM_INSTRUCTION),
                ChatMessage::new(Role::User, prompt),
            ],
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

/// Outcome of exactly one completion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionResult {
    Success(String),
    Failure(String),
}

impl CompletionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The text a plain display would show, whichever side this is.
    pub fn text(&self) -> &str {
        match self {
            Self::Success(text) | Self::Failure(text) => text,
        }
    }
}

impl From<Result<String, DomainError>> for CompletionResult {
    fn from(result: Result<String, DomainError>) -> Self {
        match result {
            Ok(text) => Self::Success(text),
            Err(e) => Self::Failure(e.to_string()),
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::domain::CompletionResult;

/// What the presentation layer sees for one analysis session.
///
/// Starts as `Pending`; the first transition is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "text", rename_all = "snake_case")]
pub enum AnalysisState {
    #[default]
    Pending,
    Succeeded(String),
    Failed(String),
}

impl AnalysisState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Pending => None,
            Self::Succeeded(text) | Self::Failed(text) => Some(text),
        }
    }
}

impl From<CompletionResult> for AnalysisState {
    fn from(result: CompletionResult) -> Self {
        match result {
            CompletionResult::Success(text) => Self::Succeeded(text),
            CompletionResult::Failure(message) => Self::Failed(message),
        }
    }
}

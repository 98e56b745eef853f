use anyhow::Result;

use crate::Commands;

use super::container::Container;
use super::controller::{AnalyzeController, PromptController};

pub struct Router<'a> {
    analyze_controller: AnalyzeController<'a>,
    prompt_controller: PromptController<'a>,
}

impl<'a> Router<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self {
            analyze_controller: AnalyzeController::new(container),
            prompt_controller: PromptController::new(container),
        }
    }

    pub async fn route(&self, command: Commands) -> Result<String> {
        match command {
            Commands::Analyze {
                input,
                profile,
                format,
            } => self.analyze_controller.analyze(input, profile, format).await,
            Commands::Prompt { input, profile } => self.prompt_controller.prompt(input, profile),
        }
    }
}

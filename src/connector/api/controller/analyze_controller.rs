use std::time::Duration;

use anyhow::{anyhow, bail, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{InputArgs, OutputFormat, ProfileArgs};
use crate::AnalysisState;

use super::super::Container;

pub struct AnalyzeController<'a> {
    container: &'a Container,
}

impl<'a> AnalyzeController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Mounts one analysis and renders its terminal state.
    ///
    /// In text format a failed analysis is returned as an error so the
    /// process exits non-zero; json always reports the state.
    pub async fn analyze(
        &self,
        input: InputArgs,
        profile: ProfileArgs,
        format: OutputFormat,
    ) -> Result<String> {
        let text = input.read_text()?;
        if text.trim().is_empty() {
            bail!("no label text given");
        }
        let profile = profile.to_profile()?;

        let use_case = self.container.analyze_use_case()?;
        let mut handle = use_case.mount(&text, &profile);

        let spinner = self.spinner();
        let state = handle.settled().await;
        spinner.finish_and_clear();

        let state = state.ok_or_else(|| anyhow!("analysis {} was cancelled", handle.id()))?;

        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&state)?),
            OutputFormat::Text => match state {
                AnalysisState::Succeeded(text) => Ok(text),
                AnalysisState::Failed(message) => Err(anyhow!(message)),
                AnalysisState::Pending => bail!("analysis {} did not settle", handle.id()),
            },
        }
    }

    fn spinner(&self) -> ProgressBar {
        if !self.container.show_progress() {
            return ProgressBar::hidden();
        }
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Analyzing label...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}

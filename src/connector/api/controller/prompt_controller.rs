use anyhow::Result;

use crate::cli::{InputArgs, ProfileArgs};

use super::super::Container;

pub struct PromptController<'a> {
    container: &'a Container,
}

impl<'a> PromptController<'a> {
    pub fn new(container: &'a Container) -> Self {
        Self { container }
    }

    pub fn prompt(&self, input: InputArgs, profile: ProfileArgs) -> Result<String> {
        let text = input.read_text()?;
        let profile = profile.to_profile()?;
        let prompt = self.container.prompt_builder().build_prompt(&text, &profile);
        Ok(prompt.into_string())
    }
}

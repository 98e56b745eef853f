use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::application::{AnalyzeLabelUseCase, CompletionService, CredentialProvider};
use crate::connector::adapter::{
    EnvCredentialProvider, HttpTransport, MockTransport, OpenAiCompletionClient, ReqwestTransport,
    StaticCredentialProvider,
};
use crate::domain::PromptBuilder;

const MOCK_API_KEY: &str = "mock-key";

pub struct ContainerConfig {
    /// Serve completions from an in-process mock instead of the network.
    pub mock: bool,
    /// Overrides `OPENAI_MODEL`.
    pub model: Option<String>,
    /// Overrides `OPENAI_BASE_URL`.
    pub base_url: Option<String>,
    /// Draw a spinner on stderr while a request is pending.
    pub show_progress: bool,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            mock: false,
            model: None,
            base_url: None,
            show_progress: true,
        }
    }
}

pub struct Container {
    completion_service: Arc<dyn CompletionService>,
    credential_provider: Arc<dyn CredentialProvider>,
    prompt_builder: PromptBuilder,
    config: ContainerConfig,
}

impl Container {
    pub fn new(config: ContainerConfig) -> Self {
        let (transport, credential_provider): (Arc<dyn HttpTransport>, Arc<dyn CredentialProvider>) =
            if config.mock {
                debug!("Using mock completion transport");
                (
                    Arc::new(MockTransport::new()),
                    Arc::new(StaticCredentialProvider::new(MOCK_API_KEY)),
                )
            } else {
                debug!("Using HTTP completion transport");
                (
                    Arc::new(ReqwestTransport::new()),
                    Arc::new(EnvCredentialProvider::new()),
                )
            };

        Self::with_adapters(config, transport, credential_provider)
    }

    /// Wire the container around caller-supplied adapters.
    pub fn with_adapters(
        config: ContainerConfig,
        transport: Arc<dyn HttpTransport>,
        credential_provider: Arc<dyn CredentialProvider>,
    ) -> Self {
        let mut client = OpenAiCompletionClient::from_env(transport);
        if let Some(model) = &config.model {
            client = client.with_model(model.as_str());
        }
        if let Some(base_url) = &config.base_url {
            client = client.with_base_url(base_url.as_str());
        }
        debug!("Completion endpoint: {} (model {})", client.url(), client.model_name());

        Self {
            completion_service: Arc::new(client),
            credential_provider,
            prompt_builder: PromptBuilder::new(),
            config,
        }
    }

    /// Resolves the API key; fails when none is configured.
    pub fn analyze_use_case(&self) -> Result<AnalyzeLabelUseCase> {
        let api_key = self.credential_provider.api_key()?;
        Ok(AnalyzeLabelUseCase::new(
            Arc::clone(&self.completion_service),
            api_key,
        ))
    }

    pub fn prompt_builder(&self) -> PromptBuilder {
        self.prompt_builder
    }

    pub fn show_progress(&self) -> bool {
        self.config.show_progress
    }
}

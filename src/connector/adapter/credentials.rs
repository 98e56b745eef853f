use crate::application::CredentialProvider;
use crate::domain::{ApiKey, DomainError};

/// Variables consulted, in order.
pub const API_KEY_VARS: [&str; 2] = ["OPENAI_API_KEY", "GPT_API"];

/// Reads the API key from the process environment.
///
/// `main` loads a `.env` file first, so keys kept there are picked up too.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    pub fn new() -> Self {
        Self
    }

    fn resolve_with<F>(lookup: F) -> Result<ApiKey, DomainError>
    where
        F: Fn(&str) -> Option<String>,
    {
        API_KEY_VARS
            .iter()
            .filter_map(|&name| lookup(name))
            .map(|value| value.trim().to_string())
            .find(|value| !value.is_empty())
            .map(ApiKey::new)
            .ok_or_else(|| {
                DomainError::not_configured(format!(
                    "no API key found; set {}",
                    API_KEY_VARS.join(" or ")
                ))
            })
    }
}

impl CredentialProvider for EnvCredentialProvider {
    fn api_key(&self) -> Result<ApiKey, DomainError> {
        Self::resolve_with(|name| std::env::var(name).ok())
    }
}

/// A fixed key, for tests and offline runs.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    key: ApiKey,
}

impl StaticCredentialProvider {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: ApiKey::new(key),
        }
    }
}

impl CredentialProvider for StaticCredentialProvider {
    fn api_key(&self) -> Result<ApiKey, DomainError> {
        Ok(self.key.clone())
    }
}

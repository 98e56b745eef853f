use crate::domain::{ApiKey, DomainError};

/// Supplies the API credential for the completion service.
pub trait CredentialProvider: Send + Sync {
    fn api_key(&self) -> Result<ApiKey, DomainError>;
}

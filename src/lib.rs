pub mod application;
pub mod cli;
pub mod connector;
pub mod domain;

pub use application::{AnalysisHandle, AnalyzeLabelUseCase, CompletionService, CredentialProvider};

pub use cli::{Commands, InputArgs, OutputFormat, ProfileArgs};

pub use connector::{
    completion_body, Container, ContainerConfig, EnvCredentialProvider, HttpRequest, HttpResponse,
    HttpTransport, MockTransport, OpenAiCompletionClient, ReqwestTransport, Router,
    StaticCredentialProvider,
};

pub use domain::{
    AnalysisState, ApiKey, ChatMessage, CompletionRequest, CompletionResult, DomainError, Prompt,
    PromptBuilder, Role, TransportError, UserProfile,
};

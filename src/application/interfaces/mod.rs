mod completion_service;
mod credential_provider;

pub use completion_service::*;
pub use credential_provider::*;

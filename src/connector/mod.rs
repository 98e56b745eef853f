//! # Connector Layer
//!
//! External integrations implementing application ports:
//! - Chat completion (OpenAI API over reqwest, or an in-process mock)
//! - Credentials (environment / `.env`)
//! - CLI api layer (container, router, controllers)

pub mod adapter;
pub mod api;

pub use adapter::*;
pub use api::*;

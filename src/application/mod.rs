//! # Application Layer
//!
//! Ports and use cases coordinating domain logic with connector adapters.

pub mod interfaces;
pub mod use_cases;

pub use interfaces::*;
pub use use_cases::*;

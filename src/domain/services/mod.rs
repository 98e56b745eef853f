//! Domain services containing pure business logic.

mod prompt_builder;

pub use prompt_builder::*;

pub mod analyze_controller;
pub mod prompt_controller;

pub use analyze_controller::AnalyzeController;
pub use prompt_controller::PromptController;

mod analysis_state;
mod api_key;
mod completion;
mod prompt;
mod user_profile;

pub use analysis_state::*;
pub use api_key::*;
pub use completion::*;
pub use prompt::*;
pub use user_profile::*;

mod credentials;
mod http_transport;
mod mock_transport;
mod openai_completion_client;
mod reqwest_transport;

pub use credentials::*;
pub use http_transport::*;
pub use mock_transport::*;
pub use openai_completion_client::*;
pub use reqwest_transport::*;

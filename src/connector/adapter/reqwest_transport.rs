use async_trait::async_trait;
use tracing::debug;

use crate::connector::adapter::{HttpRequest, HttpResponse, HttpTransport};
use crate::domain::TransportError;

/// [`HttpTransport`] over a shared `reqwest::Client`.
///
/// No timeout is configured; the client's defaults apply.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!("POST {} ({} byte body)", request.url, request.body.len());

        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder
            .body(request.body)
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        debug!("Received {} ({} byte body)", status, body.len());
        Ok(HttpResponse { status, body })
    }
}

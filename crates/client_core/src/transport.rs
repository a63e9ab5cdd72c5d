use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shared::protocol::{process_route, ProcessRequest};
use tracing::debug;
use url::Url;

use crate::error::TransportError;

#[async_trait]
pub trait ProcessTransport: Send + Sync {
    /// Sends one request and returns the parsed response body, whatever its
    /// HTTP status.
    async fn process(&self, request: &ProcessRequest) -> Result<Value, TransportError>;
}

pub struct HttpTransport {
    http: Client,
    endpoint: Url,
}

impl HttpTransport {
    pub fn new(server_url: &str) -> Result<Self, url::ParseError> {
        Self::with_client(Client::new(), server_url)
    }

    pub fn with_client(http: Client, server_url: &str) -> Result<Self, url::ParseError> {
        let endpoint = Url::parse(server_url)?.join(process_route())?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ProcessTransport for HttpTransport {
    async fn process(&self, request: &ProcessRequest) -> Result<Value, TransportError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(%status, bytes = body.len(), "process response received");
        Ok(serde_json::from_slice(&body)?)
    }
}

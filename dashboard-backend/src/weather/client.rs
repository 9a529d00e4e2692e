//! Outbound HTTP for the weather provider.

use async_trait::async_trait;
use std::time::Duration;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Raw provider reply, before any interpretation
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Single GET against the provider. Errors are transport-level failures only;
/// non-2xx replies come back as a `TransportResponse`.
#[async_trait]
pub trait WeatherTransport: Send + Sync {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<TransportResponse, String>;
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeatherTransport for ReqwestTransport {
    async fn get(&self, url: &str, query: &[(&str, &str)]) -> Result<TransportResponse, String> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| e.to_string())?;
        Ok(TransportResponse { status, body })
    }
}

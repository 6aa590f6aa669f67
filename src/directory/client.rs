use super::types::ClientRecord;
use anyhow::{Context, Result};
use reqwest::StatusCode;
use tracing::{debug, info};

/// Read access to the client directory
#[async_trait::async_trait]
pub trait ClientDirectory: Send + Sync {
    /// Look up a client by id; `None` when the directory has no such client
    async fn get_client(&self, id: &str) -> Result<Option<ClientRecord>>;
}

/// Client directory served by the CRM backend over HTTP
pub struct HttpClientDirectory {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpClientDirectory {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        info!("Initialized client directory with endpoint: {}", endpoint);

        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    fn client_url(&self, id: &str) -> String {
        format!("{}/{}", self.endpoint.trim_end_matches('/'), id)
    }
}

#[async_trait::async_trait]
impl ClientDirectory for HttpClientDirectory {
    async fn get_client(&self, id: &str) -> Result<Option<ClientRecord>> {
        let url = self.client_url(id);
        debug!("Fetching client {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach client directory")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let record = response
            .error_for_status()
            .context("Client directory request failed")?
            .json::<ClientRecord>()
            .await
            .context("Failed to parse client record")?;

        Ok(Some(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_url_joins_endpoint() {
        let dir = HttpClientDirectory::new("http://localhost:8001/api/clients/");
        assert_eq!(dir.client_url("abc"), "http://localhost:8001/api/clients/abc");

        let dir = HttpClientDirectory::new("http://localhost:8001/api/clients");
        assert_eq!(dir.client_url("abc"), "http://localhost:8001/api/clients/abc");
    }
}

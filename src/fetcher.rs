use crate::config::FetchConfig;
use crate::error::GatewayError;
use log::debug;
use reqwest::Client;

/// Downloads recipe pages.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| {
                GatewayError::configuration(format!("Failed to create HTTP client: {e}"))
            })?;

        Ok(Self { client })
    }

    /// Fetch a page body, following redirects.
    pub async fn fetch(&self, url: &str) -> Result<String, GatewayError> {
        let response = self.client.get(url).send().await.map_err(fetch_error)?;

        let status = response.status();
        debug!("Fetched {} with status {}", url, status);
        if !status.is_success() {
            return Err(GatewayError::upstream(
                400,
                format!("Failed to fetch URL: {}", status.as_u16()),
            ));
        }

        response.text().await.map_err(fetch_error)
    }
}

fn fetch_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout("Fetching the recipe page timed out".to_string())
    } else {
        GatewayError::upstream(400, format!("Failed to fetch URL: {e}"))
    }
}

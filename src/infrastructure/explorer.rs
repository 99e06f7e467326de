use crate::domain::errors::FetchError;
use crate::domain::ports::DocumentFetcher;
use crate::infrastructure::core::{HttpClientFactory, HttpSettings};
use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use tracing::{debug, info};
use url::Url;

/// Fetches miner pages from a block explorer (`<base>/<address>`).
pub struct ExplorerFetcher {
    client: ClientWithMiddleware,
    base_url: Url,
}

impl ExplorerFetcher {
    pub fn new(base_url: &str, settings: &HttpSettings) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid explorer base URL {}: {}", base_url, e))?;
        Ok(Self {
            client: HttpClientFactory::create_client(settings),
            base_url,
        })
    }

    /// Page URL for `address`.
    pub fn address_url(&self, address: &str) -> Result<Url, FetchError> {
        address_url(&self.base_url, address)
    }
}

fn address_url(base: &Url, address: &str) -> Result<Url, FetchError> {
    let invalid = |reason: &str| FetchError::InvalidUrl {
        address: address.to_string(),
        reason: reason.to_string(),
    };

    if address.trim().is_empty() {
        return Err(invalid("address is empty"));
    }

    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| invalid("base URL cannot carry a path"))?
        .pop_if_empty()
        .push(address);
    Ok(url)
}

#[async_trait]
impl DocumentFetcher for ExplorerFetcher {
    async fn fetch(&self, address: &str) -> Result<String, FetchError> {
        let url = self.address_url(address)?;
        info!("Fetching miner page: {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

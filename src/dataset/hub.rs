use async_trait::async_trait;
use reqwest::{header, Client};

use crate::config::Config;
use crate::dataset::paginator::Paginator;
use crate::dataset::provider::{DatasetProvider, DatasetRequest, DatasetTable};
use crate::dataset::rate_limiter::RateLimiter;
use crate::error::Result;

/// Loads subsets through the Hugging Face datasets-server row API.
pub struct HubProvider {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
    page_size: usize,
}

impl HubProvider {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = &config.hf_token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static(concat!("prexport/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.requests_per_minute),
            base_url: config.datasets_server_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }
}

#[async_trait]
impl DatasetProvider for HubProvider {
    async fn load(&self, request: &DatasetRequest) -> Result<DatasetTable> {
        let url = format!("{}/rows", self.base_url);
        tracing::info!(
            "Fetching {}/{} ({}) from {}",
            request.dataset,
            request.subset,
            request.split,
            self.base_url
        );

        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        paginator.fetch_rows(&url, request, self.page_size).await
    }

    fn name(&self) -> &str {
        "huggingface"
    }
}

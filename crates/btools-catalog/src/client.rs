use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::error::CatalogError;
use crate::retry::retry_with_backoff;
use crate::source::{parse_catalog_document, CatalogFormat};

/// HTTP client for the static catalog endpoint.
///
/// Maps 429, 404 and other non-2xx responses to typed errors and retries
/// transient failures with exponential back-off.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl CatalogClient {
    /// Creates a client with the given timeout, `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Builds a client from application config.
    ///
    /// # Errors
    ///
    /// See [`CatalogClient::new`].
    pub fn from_config(config: &btools_core::AppConfig) -> Result<Self, CatalogError> {
        Self::new(
            config.catalog_timeout_secs,
            &config.catalog_user_agent,
            config.catalog_max_retries,
            config.catalog_retry_backoff_ms,
        )
    }

    /// Fetches the raw catalog records from `url`.
    ///
    /// The body may be a bare array or an object with a `bloggers` array.
    /// URLs ending in `.yaml`/`.yml` are parsed as YAML.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::RateLimited`]: HTTP 429 after all retries.
    /// - [`CatalogError::NotFound`]: HTTP 404 (not retried).
    /// - [`CatalogError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`CatalogError::Http`]: network or TLS failure after all retries.
    /// - [`CatalogError::Deserialize`] / [`CatalogError::Yaml`]: body does
    ///   not parse (not retried).
    pub async fn fetch_catalog(&self, url: &str) -> Result<Vec<Value>, CatalogError> {
        let format = CatalogFormat::from_location(url);

        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self.client.get(url).send().await?;
            let status = response.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                let retry_after_secs = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(60);
                return Err(CatalogError::RateLimited {
                    url: url.to_owned(),
                    retry_after_secs,
                });
            }

            if status == reqwest::StatusCode::NOT_FOUND {
                return Err(CatalogError::NotFound {
                    url: url.to_owned(),
                });
            }

            if !status.is_success() {
                return Err(CatalogError::UnexpectedStatus {
                    status: status.as_u16(),
                    url: url.to_owned(),
                });
            }

            let body = response.text().await?;
            parse_catalog_document(&body, format, url)
        })
        .await
    }
}

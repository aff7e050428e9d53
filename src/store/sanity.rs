//! HTTP client for the hosted content store's query API

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{ContentStore, Query, StoreError};
use crate::config::StoreConfig;

/// Read-only client for `/data/query/<dataset>`
pub struct SanityClient {
    http: reqwest::Client,
    endpoint: String,
    token: Option<String>,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    result: Value,
}

impl SanityClient {
    /// Build a client for the configured project and dataset
    pub fn new(config: &StoreConfig) -> Result<Self> {
        if config.project_id.trim().is_empty() {
            anyhow::bail!(
                "No content store project configured. Set store.project_id in _config.yml \
                 or SANITY_PROJECT_ID, or point store.local_dataset at an export."
            );
        }
        let host = if config.use_cdn { "apicdn" } else { "api" };
        let api_base = format!("https://{}.{}.sanity.io", config.project_id, host);
        Self::with_base_url(&api_base, config, config.token.clone())
    }

    /// Build a client against an arbitrary API base URL
    pub fn with_base_url(
        api_base: &str,
        config: &StoreConfig,
        token: Option<String>,
    ) -> Result<Self> {
        let endpoint = format!(
            "{}/v{}/data/query/{}",
            api_base.trim_end_matches('/'),
            config.api_version.trim_start_matches('v'),
            config.dataset
        );
        let http = reqwest::Client::builder()
            .user_agent(concat!("kultur-rs/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint,
            token,
        })
    }

    /// Full query endpoint URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ContentStore for SanityClient {
    async fn query(&self, query: &Query) -> Result<Value, StoreError> {
        let mut params = vec![("query".to_string(), query.groq().to_string())];
        for (name, value) in query.params() {
            // parameters travel JSON-encoded
            params.push((format!("${}", name), value.to_string()));
        }

        let mut request = self.http.get(&self.endpoint).query(&params);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        tracing::debug!("GET {} ({})", self.endpoint, query.name());
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(StoreError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let envelope: QueryResponse = serde_json::from_slice(&bytes)?;
        Ok(envelope.result)
    }
}

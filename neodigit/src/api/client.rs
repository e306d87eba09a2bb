use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::error::ApiError;
use crate::config::ResolvedConfig;
use crate::sensitive::Sensitive;

/// Neodigit API client.
///
/// Building it does no network I/O and never fails. The endpoint and key are
/// kept as resolved; a malformed URL or header value surfaces as an
/// [`ApiError`] from the first request. Clones share one connection pool.
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Sensitive<String>,
}

/// Transport settings for the underlying HTTP client
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub user_agent: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_idle_connections: usize,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            user_agent: format!("terraform-provider-neodigit/{}", env!("CARGO_PKG_VERSION")),
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            idle_timeout: Duration::from_secs(90),
            max_idle_connections: 10,
        }
    }
}

impl ClientOptions {
    /// Defaults with the user agent carrying the provider version
    pub fn for_version(version: &str) -> Self {
        Self {
            user_agent: format!("terraform-provider-neodigit/{}", version),
            ..Default::default()
        }
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a new API client with default transport settings
    pub fn new(config: &ResolvedConfig) -> Self {
        Self::with_options(config, ClientOptions::default())
    }

    pub fn with_options(config: &ResolvedConfig, options: ClientOptions) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(options.user_agent)
            .timeout(options.request_timeout)
            .connect_timeout(options.connect_timeout)
            .pool_idle_timeout(options.idle_timeout)
            .pool_max_idle_per_host(options.max_idle_connections)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client settings: {}", e);
                reqwest::Client::new()
            });

        Self {
            inner: Arc::new(ClientInner {
                http_client,
                base_url: config.endpoint.trim_end_matches('/').to_string(),
                api_key: config.api_key.clone(),
            }),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Execute a GET request and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        let parsed = Url::parse(&url).map_err(|source| ApiError::InvalidEndpoint {
            endpoint: self.inner.base_url.clone(),
            source,
        })?;
        let auth = auth_header(&self.inner.api_key)?;
        tracing::debug!("GET request to: {}", url);

        let response = self
            .inner
            .http_client
            .get(parsed)
            .header(AUTHORIZATION, auth)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.inner.base_url,
            path.trim_start_matches('/')
        )
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::AuthError);
        }

        let text = response.text().await?;

        if !status.is_success() {
            tracing::error!("API error response: {}", text);
            return Err(ApiError::ApiError {
                status: status.as_u16(),
                message: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            tracing::error!("Failed to deserialize response: {}", e);
            ApiError::ParseError(e.to_string())
        })
    }
}

fn auth_header(api_key: &Sensitive<String>) -> Result<HeaderValue, ApiError> {
    let mut value =
        HeaderValue::from_str(&format!("Bearer {}", api_key.expose())).map_err(|_| {
            ApiError::InvalidApiKey("contains characters not allowed in a header".to_string())
        })?;
    value.set_sensitive(true);
    Ok(value)
}

//! HTTP client for the resource API.

use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::resource::Resource;
use crate::error::ApiError;
use crate::storage::ApiConfig;

/// Client for the resource API.
///
/// Holds the base URL and the bearer token explicitly; there is no global
/// token. Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: Client,
}

impl ApiClient {
    /// Create a client for `base_url` with reqwest defaults.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::build(base_url, Client::new())
    }

    /// Create a client from the `[api]` config section.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|source| ApiError::Transport {
                url: config.base_url.clone(),
                source,
            })?;
        Self::build(&config.base_url, http)
    }

    fn build(base_url: &str, http: Client) -> Result<Self, ApiError> {
        url::Url::parse(base_url).map_err(|_| ApiError::InvalidUrl(base_url.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            http,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<String, ApiError> {
        let full = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        url::Url::parse(&full).map_err(|_| ApiError::InvalidUrl(full.clone()))?;
        Ok(full)
    }

    fn item_path<T: Resource>(id: &str) -> String {
        format!("{}/{}", T::PATH, urlencoding::encode(id))
    }

    /// Send a request and return the decoded JSON body.
    ///
    /// An empty body decodes as `null`, so `serde_json::Value` always works
    /// for mutations that answer with no content.
    async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        authenticated: bool,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path)?;
        tracing::debug!(%method, %url, "api request");

        let mut request = self.http.request(method.clone(), &url);
        if authenticated {
            if let Some(token) = &self.token {
                request = request.bearer_auth(token);
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|source| {
            tracing::warn!(%method, %url, "api request failed: {source}");
            ApiError::Transport {
                url: url.clone(),
                source,
            }
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        if !status.is_success() {
            tracing::warn!(%method, %url, status = status.as_u16(), "api returned error status");
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
                body: text,
            });
        }

        let text = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(text).map_err(|e| ApiError::Decode {
            url,
            message: e.to_string(),
        })
    }

    /// GET `PATH` -- every item of the family.
    pub async fn list<T: Resource>(&self) -> Result<Vec<T>, ApiError> {
        self.request::<(), _>(Method::GET, T::PATH, None, true).await
    }

    /// GET `PATH/{id}`.
    pub async fn get<T: Resource>(&self, id: &str) -> Result<T, ApiError> {
        self.request::<(), _>(Method::GET, &Self::item_path::<T>(id), None, true)
            .await
    }

    /// POST `PATH` with the item as body.
    pub async fn create<T: Resource>(&self, item: &T) -> Result<serde_json::Value, ApiError> {
        self.request(Method::POST, T::PATH, Some(item), true).await
    }

    /// PUT `PATH/{id}` with the item as body.
    pub async fn update<T: Resource>(
        &self,
        id: &str,
        item: &T,
    ) -> Result<serde_json::Value, ApiError> {
        self.request(Method::PUT, &Self::item_path::<T>(id), Some(item), true)
            .await
    }

    /// DELETE `PATH/{id}`.
    pub async fn delete<T: Resource>(&self, id: &str) -> Result<serde_json::Value, ApiError> {
        self.request::<(), _>(Method::DELETE, &Self::item_path::<T>(id), None, true)
            .await
    }

    /// POST an arbitrary body without the bearer token (login, register).
    pub(crate) async fn post_public<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<serde_json::Value, ApiError> {
        self.request(Method::POST, path, Some(body), false).await
    }
}

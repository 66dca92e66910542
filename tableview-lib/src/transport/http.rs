//! HTTP transport

use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::FetchError;
use crate::view::FetchKey;

use super::Transport;

/// Fetches rows with `GET {base_url}/{resource}?page=..&sort=..&sortDirection=..`.
///
/// The response body must be `{ "data": [row, ...] }`. Cheap to clone.
///
/// # Example
///
/// ```ignore
/// use tableview_lib::mock::Vehicle;
/// use tableview_lib::transport::HttpTransport;
///
/// let transport = HttpTransport::<Vehicle>::builder()
///     .base_url("http://127.0.0.1:8080")
///     .resource("vehicles")
///     .timeout(Duration::from_secs(5))
///     .build()?;
/// ```
pub struct HttpTransport<R> {
    inner: Arc<HttpTransportInner>,
    _row: PhantomData<fn() -> R>,
}

struct HttpTransportInner {
    endpoint: Url,
    http_client: Client,
    timeout: Option<Duration>,
}

impl<R> Clone for HttpTransport<R> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _row: PhantomData,
        }
    }
}

impl<R> std::fmt::Debug for HttpTransport<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.inner.endpoint.as_str())
            .field("timeout", &self.inner.timeout)
            .finish()
    }
}

impl<R> HttpTransport<R> {
    /// Creates a new builder.
    pub fn builder() -> HttpTransportBuilder<R, Missing> {
        HttpTransportBuilder::new()
    }

    /// Returns the resource URL requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Returns the full request URL for `key`.
    pub fn request_url(&self, key: &FetchKey) -> Url {
        let mut url = self.inner.endpoint.clone();
        url.query_pairs_mut().extend_pairs(key.query_pairs());
        url
    }
}

#[derive(Deserialize)]
struct RowsEnvelope<R> {
    data: Vec<R>,
}

#[async_trait]
impl<R> Transport for HttpTransport<R>
where
    R: DeserializeOwned + Send + Sync + 'static,
{
    type Row = R;

    async fn fetch(&self, key: &FetchKey) -> Result<Vec<R>, FetchError> {
        let url = self.request_url(key);
        debug!("GET {}", url);

        let mut request = self.inner.http_client.get(url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(|e| match self.inner.timeout {
            Some(timeout) if e.is_timeout() => FetchError::Timeout(timeout),
            _ => FetchError::Network(e),
        })?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(FetchError::http(status.as_u16(), body));
        }

        let envelope: RowsEnvelope<R> = serde_json::from_str(&body)
            .map_err(|e| FetchError::parse_with_body(e.to_string(), body))?;
        Ok(envelope.data)
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for a missing required builder field.
pub struct Missing;

/// Marker type for a set builder field.
pub struct Set<T>(T);

/// Builder for [`HttpTransport`].
///
/// `base_url` is required; `build` only exists once it has been set.
pub struct HttpTransportBuilder<R, U> {
    base_url: U,
    resource: String,
    timeout: Option<Duration>,
    http_client: Option<Client>,
    _row: PhantomData<fn() -> R>,
}

impl<R> HttpTransportBuilder<R, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: Missing,
            resource: "vehicles".to_string(),
            timeout: None,
            http_client: None,
            _row: PhantomData,
        }
    }

    /// Sets the backend base URL, e.g. `http://127.0.0.1:8080`.
    pub fn base_url(self, url: impl Into<String>) -> HttpTransportBuilder<R, Set<String>> {
        HttpTransportBuilder {
            base_url: Set(url.into()),
            resource: self.resource,
            timeout: self.timeout,
            http_client: self.http_client,
            _row: PhantomData,
        }
    }
}

impl<R> Default for HttpTransportBuilder<R, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R, U> HttpTransportBuilder<R, U> {
    /// Sets the resource path below the base URL.
    ///
    /// Defaults to `vehicles`.
    pub fn resource(mut self, resource: impl Into<String>) -> Self {
        self.resource = resource.into();
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl<R> HttpTransportBuilder<R, Set<String>> {
    /// Builds the transport.
    ///
    /// Fails with [`FetchError::InvalidUrl`] if the base URL and resource do
    /// not form a valid URL.
    pub fn build(self) -> Result<HttpTransport<R>, FetchError> {
        let base = self.base_url.0;
        let endpoint = format!(
            "{}/{}",
            base.trim_end_matches('/'),
            self.resource.trim_start_matches('/')
        );
        let endpoint = Url::parse(&endpoint)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", endpoint, e)))?;

        Ok(HttpTransport {
            inner: Arc::new(HttpTransportInner {
                endpoint,
                http_client: self.http_client.unwrap_or_default(),
                timeout: self.timeout,
            }),
            _row: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::Vehicle;
    use crate::view::Direction;

    fn transport() -> HttpTransport<Vehicle> {
        HttpTransport::<Vehicle>::builder()
            .base_url("http://localhost:8080/")
            .build()
            .unwrap()
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(transport().endpoint().as_str(), "http://localhost:8080/vehicles");
    }

    #[test]
    fn test_request_url_without_sort() {
        let url = transport().request_url(&FetchKey::page(2));
        assert_eq!(url.as_str(), "http://localhost:8080/vehicles?page=2");
    }

    #[test]
    fn test_request_url_with_sort() {
        let url = transport().request_url(&FetchKey::sorted(0, "name", Direction::Desc));
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/vehicles?page=0&sort=name&sortDirection=desc"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpTransport::<Vehicle>::builder().base_url("not a url").build();
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }
}

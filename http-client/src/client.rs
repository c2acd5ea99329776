use std::time::Duration;

use reqwest::{Client, IntoUrl, Method};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use snafu::ResultExt;

use crate::{RequestBuilder, Result, error::error::BuildSnafu};

/// Outbound HTTP client with request tracing and optional retries of transient failures.
#[derive(Debug, Clone)]
pub struct HttpClient(ClientWithMiddleware);

#[derive(Default, Debug)]
pub struct HttpClientBuilder {
    client: reqwest::ClientBuilder,
    max_retries: u32,
}

impl HttpClient {
    pub fn new() -> Self {
        Self::new_with(Client::new(), 3)
    }

    fn new_with(inner: Client, max_retries: u32) -> Self {
        let mut builder = ClientBuilder::new(inner).with(TracingMiddleware::default());

        if max_retries > 0 {
            builder = builder.with(RetryTransientMiddleware::new_with_policy(
                ExponentialBackoff::builder().build_with_max_retries(max_retries),
            ));
        }

        Self(builder.build())
    }

    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    pub fn request(&self, method: Method, url: impl IntoUrl) -> RequestBuilder {
        RequestBuilder(self.0.request(method, url))
    }

    pub fn get(&self, url: impl IntoUrl) -> RequestBuilder {
        RequestBuilder(self.0.get(url))
    }

    pub fn post(&self, url: impl IntoUrl) -> RequestBuilder {
        RequestBuilder(self.0.post(url))
    }

    pub fn delete(&self, url: impl IntoUrl) -> RequestBuilder {
        RequestBuilder(self.0.delete(url))
    }
}

impl HttpClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.timeout(timeout);
        self
    }

    /// Retries are only safe for idempotent traffic; a forwarding proxy should keep this at 0.
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let inner = self.client.build().context(BuildSnafu)?;
        Ok(HttpClient::new_with(inner, self.max_retries))
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

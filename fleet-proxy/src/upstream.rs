use std::time::Duration;

use actix_web::{HttpRequest, HttpResponse, http::header::AUTHORIZATION};
use http_client::{HttpClient, Method, RequestBuilder};
use tracing::error;

use crate::error::{ProxyError, Route};

/// The fleet backend behind the proxy.
#[derive(Debug, Clone)]
pub struct Upstream {
    http: HttpClient,
    base_url: String,
}

impl Upstream {
    pub fn new(base_url: &str, timeout: Duration) -> http_client::Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .max_retries(0)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.base_url, path.trim_start_matches('/')))
    }

    /// Like [`Upstream::request`], carrying over the caller's `Authorization` header.
    pub fn authorized(&self, method: Method, path: &str, incoming: &HttpRequest) -> RequestBuilder {
        let request = self.request(method, path);
        match incoming.headers().get(AUTHORIZATION) {
            Some(value) => request.header("Authorization", value.as_bytes()),
            None => request,
        }
    }

    /// Sends `request` and answers 200 with the upstream JSON body.
    pub async fn relay(
        &self,
        route: Route,
        request: RequestBuilder,
    ) -> Result<HttpResponse, ProxyError> {
        let result = match request.send().await {
            Ok(response) => response.json_value().await,
            Err(e) => Err(e),
        };

        match result {
            Ok(body) => Ok(HttpResponse::Ok().json(body)),
            Err(e) => {
                error!(
                    route = %route,
                    upstream_body = e.body().unwrap_or_default(),
                    "proxied call failed: {e:?}"
                );
                Err(ProxyError::new(route, e))
            }
        }
    }
}

use reqwest::{StatusCode, header::HeaderMap};
use serde::de::DeserializeOwned;

use crate::Result;

#[derive(Debug)]
pub struct Response(pub(crate) reqwest::Response);

impl Response {
    pub fn status(&self) -> StatusCode {
        self.0.status()
    }

    pub fn headers(&self) -> &HeaderMap {
        self.0.headers()
    }

    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        self.0.json().await.map_err(From::from)
    }

    /// Decodes the body as JSON, treating an empty body as `null`.
    pub async fn json_value(self) -> Result<serde_json::Value> {
        let bytes = self.0.bytes().await?;
        if bytes.is_empty() {
            return Ok(serde_json::Value::Null);
        }
        Ok(serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            serde_json::Value::String(String::from_utf8_lossy(&bytes).into_owned())
        }))
    }

    pub async fn text(self) -> Result<String> {
        self.0.text().await.map_err(From::from)
    }
}

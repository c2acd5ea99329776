use std::time::Duration;

use async_trait::async_trait;
use fleet_core::{
    Ack, Boat, Credentials, FleetRegistry, FleetSource, Frame, LoginResponse, NewBoat, NewFrame,
    PositionReport, Result, Session,
    error::error::{MalformedResponseSnafu, RejectedSnafu, StatusSnafu, TransportSnafu},
};
use http_client::HttpClient;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{instrument, warn};

/// Typed client of the fleet proxy.
#[derive(Debug, Clone)]
pub struct FleetApiClient {
    http: HttpClient,
    base_url: String,
    token: Option<String>,
}

/// Converts a transport/status failure into the dashboard's error taxonomy.
fn api_error(e: http_client::Error) -> fleet_core::Error {
    match e.status() {
        Some(status) => StatusSnafu {
            status: status.as_u16(),
            message: e.message(),
        }
        .build(),
        None => TransportSnafu {
            message: e.to_string(),
        }
        .build(),
    }
}

/// Reads `{ success: true, <field>: [...] }`, decoding entries one by one so a single
/// non-object entry does not discard the whole snapshot.
fn decode_listing<T: DeserializeOwned>(endpoint: &str, field: &str, body: Value) -> Result<Vec<T>> {
    let Value::Object(mut body) = body else {
        return MalformedResponseSnafu {
            endpoint,
            reason: "response is not a json object",
        }
        .fail();
    };

    if body.get("success") != Some(&Value::Bool(true)) {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("response did not report success");
        return RejectedSnafu { message }.fail();
    }

    let Some(Value::Array(entries)) = body.remove(field) else {
        return MalformedResponseSnafu {
            endpoint,
            reason: format!("missing '{field}' array"),
        }
        .fail();
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(endpoint, "dropping undecodable entry: {e}");
                None
            }
        })
        .collect())
}

fn check_ack(ack: Ack) -> Result<()> {
    if ack.success {
        Ok(())
    } else {
        RejectedSnafu {
            message: ack
                .message
                .unwrap_or_else(|| "request was not accepted".to_string()),
        }
        .fail()
    }
}

impl FleetApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> http_client::Result<Self> {
        let http = HttpClient::builder()
            .timeout(timeout)
            .max_retries(0)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get_value(&self, path: &str) -> Result<Value> {
        self.http
            .get(self.url(path))
            .bearer(self.token.as_deref())
            .send()
            .await
            .map_err(api_error)?
            .json_value()
            .await
            .map_err(api_error)
    }

    async fn post_ack(&self, path: &str, body: &impl serde::Serialize) -> Result<()> {
        let body = self
            .http
            .post(self.url(path))
            .bearer(self.token.as_deref())
            .json(body)
            .send()
            .await
            .map_err(api_error)?
            .json_value()
            .await
            .map_err(api_error)?;

        check_ack(serde_json::from_value(body).unwrap_or_default())
    }

    async fn delete(&self, path: &str) -> Result<()> {
        self.http
            .delete(self.url(path))
            .bearer(self.token.as_deref())
            .send()
            .await
            .map_err(api_error)?;
        Ok(())
    }

    /// Logs in and keeps the returned token for subsequent calls.
    #[instrument(skip_all, fields(username = credentials.username))]
    pub async fn login(&mut self, credentials: &Credentials) -> Result<Session> {
        let body = self
            .http
            .post(self.url("login"))
            .json(credentials)
            .send()
            .await
            .map_err(api_error)?
            .json_value()
            .await
            .map_err(api_error)?;

        let response: LoginResponse =
            serde_json::from_value(body).map_err(|e| {
                MalformedResponseSnafu {
                    endpoint: "/login",
                    reason: e.to_string(),
                }
                .build()
            })?;

        if !response.success {
            return RejectedSnafu {
                message: response
                    .message
                    .clone()
                    .unwrap_or_else(|| "login refused".to_string()),
            }
            .fail();
        }

        let Some(token) = response.token.clone().filter(|t| !t.is_empty()) else {
            return RejectedSnafu {
                message: "login succeeded but no token was returned",
            }
            .fail();
        };

        self.token = Some(token.clone());

        Ok(Session {
            token,
            username: credentials.username.clone(),
            role: response.role.clone(),
            user_id: response.user_id_text(),
        })
    }

    #[instrument(skip_all, fields(username = credentials.username))]
    pub async fn register(&self, credentials: &Credentials) -> Result<()> {
        self.post_ack("register", credentials).await
    }
}

#[async_trait]
impl FleetSource for FleetApiClient {
    #[instrument(skip(self))]
    async fn latest_boats(&self) -> Result<Vec<PositionReport>> {
        let body = self.get_value("boats/latest").await?;
        decode_listing("/boats/latest", "boats", body)
    }

    #[instrument(skip(self))]
    async fn frames(&self, limit: u32) -> Result<Vec<Frame>> {
        let body = self.get_value(&format!("frames?limit={limit}")).await?;
        decode_listing("/frames", "frames", body)
    }

    #[instrument(skip(self))]
    async fn boats(&self) -> Result<Vec<Boat>> {
        match self.get_value("boats").await? {
            Value::Array(entries) => Ok(entries
                .into_iter()
                .filter_map(|entry| match serde_json::from_value(entry) {
                    Ok(boat) => Some(boat),
                    Err(e) => {
                        warn!("dropping undecodable boat: {e}");
                        None
                    }
                })
                .collect()),
            _ => MalformedResponseSnafu {
                endpoint: "/boats",
                reason: "expected a json array",
            }
            .fail(),
        }
    }
}

#[async_trait]
impl FleetRegistry for FleetApiClient {
    #[instrument(skip(self))]
    async fn add_frame(&self, frame: &NewFrame) -> Result<()> {
        self.post_ack("gps", frame).await
    }

    #[instrument(skip(self))]
    async fn delete_frame(&self, id: i64) -> Result<()> {
        self.delete(&format!("gps/{id}")).await
    }

    #[instrument(skip(self))]
    async fn add_boat(&self, boat: &NewBoat) -> Result<()> {
        self.post_ack("boats", boat).await
    }

    #[instrument(skip(self))]
    async fn delete_boat(&self, id: &str) -> Result<()> {
        self.delete(&format!("boats/{id}")).await
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Authenticated dashboard session obtained from `/login`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub role: Option<String>,
    pub user_id: Option<String>,
}

/// Body of a successful `/login` response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub success: bool,
    pub token: Option<String>,
    pub role: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<Value>,
    pub message: Option<String>,
}

/// Generic `{ success, message }` acknowledgement returned by write endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
}

/// Vessel registry entry as listed by `/boats`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Boat {
    pub id: Value,
    pub name: String,
    #[serde(rename = "type", default)]
    pub boat_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFrame {
    pub boat_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub raw_frame: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBoat {
    pub name: String,
    #[serde(rename = "type")]
    pub boat_type: String,
}

impl Boat {
    pub fn id_text(&self) -> String {
        match &self.id {
            Value::String(s) => s.clone(),
            v => v.to_string(),
        }
    }
}

impl LoginResponse {
    pub fn user_id_text(&self) -> Option<String> {
        self.user_id.as_ref().map(|v| match v {
            Value::String(s) => s.clone(),
            v => v.to_string(),
        })
    }
}

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use fleet_client::FleetApiClient;
use fleet_core::{
    Boat, Credentials, Environment, FleetRegistry, FleetSource, Frame, LogLevel, NewBoat,
    NewFrame, PositionReport,
};
use tokio::{sync::mpsc, time::Instant};
use fleet_dashboard::{
    dashboard::{Dashboard, DashboardSettings},
    memory_map::InMemoryMap,
    reconciler::{ReconcilerSettings, TrailMode},
    settings::Settings,
};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

pub static TEST_TOKEN: &str = "test-token";

pub struct TestHelper {
    pub proxy: MockServer,
}

impl TestHelper {
    pub async fn new() -> Self {
        TestHelper {
            proxy: MockServer::start().await,
        }
    }

    pub fn client(&self) -> FleetApiClient {
        FleetApiClient::new(self.proxy.uri(), Duration::from_secs(5))
            .unwrap()
            .with_token(TEST_TOKEN)
    }

    pub fn dashboard(&self) -> Dashboard<InMemoryMap> {
        self.dashboard_with_mode(TrailMode::TrackedVessel)
    }

    pub fn dashboard_with_mode(&self, trail_mode: TrailMode) -> Dashboard<InMemoryMap> {
        Dashboard::new(
            Arc::new(self.client()),
            InMemoryMap::new(),
            DashboardSettings {
                poll_interval: Duration::from_secs(3600),
                frames_limit: 200,
                focus_settle_delay: Duration::from_millis(1),
                reconciler: ReconcilerSettings {
                    trail_mode,
                    ..Default::default()
                },
            },
        )
    }

    pub fn settings(&self) -> Settings {
        Settings {
            environment: Environment::Test,
            log_level: LogLevel::Debug,
            api_url: self.proxy.uri(),
            credentials: Some(Credentials {
                username: "skipper".into(),
                password: "secret".into(),
            }),
            token: None,
            poll_interval: Duration::from_secs(3600),
            frames_limit: 50,
            tracked_vessel: "Endurance".into(),
            trail_mode: TrailMode::TrackedVessel,
            focus_settle_delay: Duration::from_millis(1),
            fit_padding: 30,
            request_timeout: Duration::from_secs(5),
        }
    }

    pub async fn mock_latest(&self, boats: Value) {
        Mock::given(method("GET"))
            .and(path("/boats/latest"))
            .and(header("Authorization", format!("Bearer {TEST_TOKEN}").as_str()))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "success": true, "boats": boats })),
            )
            .mount(&self.proxy)
            .await;
    }

    pub async fn mock_frames(&self, frames: Value) {
        Mock::given(method("GET"))
            .and(path("/frames"))
            .and(query_param("limit", "200"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "success": true, "frames": frames })),
            )
            .mount(&self.proxy)
            .await;
    }

    pub async fn mock_boats(&self, boats: Value) {
        Mock::given(method("GET"))
            .and(path("/boats"))
            .respond_with(ResponseTemplate::new(200).set_body_json(boats))
            .mount(&self.proxy)
            .await;
    }
}

/// In-process backend answering `/boats/latest` from a script, one entry per fetch.
/// Once the script runs out the last good snapshot is repeated.
pub struct ScriptedFleet {
    latest: Mutex<VecDeque<fleet_core::Result<Vec<PositionReport>>>>,
    last: Mutex<Vec<PositionReport>>,
    fetched: mpsc::UnboundedSender<Instant>,
}

impl ScriptedFleet {
    pub fn new(
        script: Vec<fleet_core::Result<Vec<PositionReport>>>,
    ) -> (Self, mpsc::UnboundedReceiver<Instant>) {
        let (fetched, receiver) = mpsc::unbounded_channel();
        let fleet = ScriptedFleet {
            latest: Mutex::new(script.into()),
            last: Mutex::new(Vec::new()),
            fetched,
        };
        (fleet, receiver)
    }

    pub fn dashboard(self, poll_interval: Duration) -> Dashboard<InMemoryMap> {
        Dashboard::new(
            Arc::new(self),
            InMemoryMap::new(),
            DashboardSettings {
                poll_interval,
                frames_limit: 200,
                focus_settle_delay: Duration::from_millis(1),
                reconciler: ReconcilerSettings::default(),
            },
        )
    }
}

#[async_trait]
impl FleetSource for ScriptedFleet {
    async fn latest_boats(&self) -> fleet_core::Result<Vec<PositionReport>> {
        let _ = self.fetched.send(Instant::now());
        let next = self.latest.lock().unwrap().pop_front();
        match next {
            Some(Ok(reports)) => {
                *self.last.lock().unwrap() = reports.clone();
                Ok(reports)
            }
            Some(Err(e)) => Err(e),
            None => Ok(self.last.lock().unwrap().clone()),
        }
    }

    async fn frames(&self, _limit: u32) -> fleet_core::Result<Vec<Frame>> {
        Ok(Vec::new())
    }

    async fn boats(&self) -> fleet_core::Result<Vec<Boat>> {
        Ok(Vec::new())
    }
}

#[async_trait]
impl FleetRegistry for ScriptedFleet {
    async fn add_frame(&self, _frame: &NewFrame) -> fleet_core::Result<()> {
        Ok(())
    }

    async fn delete_frame(&self, _id: i64) -> fleet_core::Result<()> {
        Ok(())
    }

    async fn add_boat(&self, _boat: &NewBoat) -> fleet_core::Result<()> {
        Ok(())
    }

    async fn delete_boat(&self, _id: &str) -> fleet_core::Result<()> {
        Ok(())
    }
}

pub fn report(name: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "boat_name": name,
        "latitude": latitude,
        "longitude": longitude,
        "date": "2026-03-01T10:00:00Z",
    })
}

pub fn frame(id: i64, name: &str, latitude: f64, longitude: f64) -> Value {
    json!({
        "id": id,
        "boat_name": name,
        "latitude": latitude,
        "longitude": longitude,
        "raw_frame": format!("BOAT={name};LAT={latitude};LON={longitude}"),
        "created_at": "2026-03-01T10:00:00Z",
    })
}

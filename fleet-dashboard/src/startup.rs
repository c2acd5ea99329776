use std::{future::Future, sync::Arc, time::Duration};

use fleet_client::FleetApiClient;
use fleet_core::Session;
use snafu::ResultExt;
use tracing::{error, info, instrument};

use crate::{
    commands::read_commands,
    dashboard::{Dashboard, DashboardSettings, trigger_channel},
    error::{
        Result,
        error::{ApiSnafu, HttpClientSnafu, MissingCredentialsSnafu, RuntimeSnafu},
    },
    memory_map::InMemoryMap,
    settings::Settings,
};

const TRIGGER_BUFFER: usize = 32;
/// A pending stdin read never completes on its own, so shutdown stops waiting after this.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Drives `future` to completion on a fresh multi-threaded runtime, then shuts the runtime
/// down without waiting on blocking work for longer than [`SHUTDOWN_GRACE`].
pub fn run_to_completion<F: Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context(RuntimeSnafu)?;

    let output = runtime.block_on(future);
    runtime.shutdown_timeout(SHUTDOWN_GRACE);

    Ok(output)
}

pub struct App {
    dashboard: Dashboard<InMemoryMap>,
    session: Option<Session>,
}

impl App {
    #[instrument(skip_all)]
    pub async fn build(settings: &Settings) -> Result<App> {
        let mut client = FleetApiClient::new(&settings.api_url, settings.request_timeout)
            .context(HttpClientSnafu)?;

        let session = match (&settings.token, &settings.credentials) {
            (Some(token), _) => {
                client = client.with_token(token);
                None
            }
            (None, Some(credentials)) => {
                Some(client.login(credentials).await.context(ApiSnafu)?)
            }
            (None, None) => return MissingCredentialsSnafu.fail(),
        };

        if let Some(session) = &session {
            info!(
                username = %session.username,
                role = ?session.role,
                "logged in to fleet api"
            );
        }

        let dashboard = Dashboard::new(
            Arc::new(client),
            InMemoryMap::new(),
            DashboardSettings {
                poll_interval: settings.poll_interval,
                frames_limit: settings.frames_limit,
                focus_settle_delay: settings.focus_settle_delay,
                reconciler: settings.reconciler(),
            },
        );

        Ok(App { dashboard, session })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Polls until ctrl-c, taking operator commands from stdin meanwhile.
    pub async fn run(self) -> Result<()> {
        let (sender, receiver) = trigger_channel(TRIGGER_BUFFER);

        let dashboard = tokio::spawn(self.dashboard.run(receiver));
        let commands = tokio::spawn(read_commands(tokio::io::stdin(), sender.clone()));

        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for ctrl-c: {e:?}");
        }
        info!("shutting down dashboard");

        commands.abort();
        drop(sender);

        if let Err(e) = dashboard.await {
            error!("dashboard task failed: {e:?}");
        }

        Ok(())
    }
}

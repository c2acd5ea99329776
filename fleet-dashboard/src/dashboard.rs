use std::{sync::Arc, time::Duration};

use fleet_core::{FleetRegistry, FleetSource, MapSurface};
use snafu::OptionExt;
use tokio::{
    sync::mpsc,
    time::{MissedTickBehavior, interval},
};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    error::{Result, error::DashboardClosedSnafu},
    reconciler::{FocusOutcome, MapReconciler, ReconcilerSettings},
    tables::{
        BoatRow, FocusRequest, FormMessage, FrameRow, TableState, validate_new_boat,
        validate_new_frame,
    },
};

/// Backend seen by the dashboard: both the polled read side and the form write side.
pub trait FleetApi: FleetSource + FleetRegistry {}

impl<T> FleetApi for T where T: FleetSource + FleetRegistry {}

/// Unvalidated input of the "add frame" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameForm {
    pub boat_name: String,
    pub latitude: String,
    pub longitude: String,
    pub raw_frame: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoatForm {
    pub name: String,
    pub boat_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    Tick,
    RefreshFrames,
    RefreshBoats,
    AddFrame(FrameForm),
    DeleteFrame(i64),
    AddBoat(BoatForm),
    DeleteBoat(String),
    Focus(FocusRequest),
}

#[derive(Debug, Clone)]
pub struct DashboardSettings {
    pub poll_interval: Duration,
    pub frames_limit: u32,
    pub focus_settle_delay: Duration,
    pub reconciler: ReconcilerSettings,
}

/// Handle used to feed triggers into a running dashboard.
#[derive(Debug, Clone)]
pub struct TriggerSender(mpsc::Sender<Trigger>);

impl TriggerSender {
    pub async fn send(&self, trigger: Trigger) -> Result<()> {
        self.0.send(trigger).await.ok().context(DashboardClosedSnafu)
    }
}

pub fn trigger_channel(capacity: usize) -> (TriggerSender, mpsc::Receiver<Trigger>) {
    let (tx, rx) = mpsc::channel(capacity);
    (TriggerSender(tx), rx)
}

/// Owns the map reconciler together with the tables and form state around it.
///
/// Every trigger is handled to completion before the next one is taken, so the map state
/// never sees two passes interleave.
pub struct Dashboard<M> {
    api: Arc<dyn FleetApi>,
    reconciler: MapReconciler<M>,
    frames: TableState<FrameRow>,
    boats: TableState<BoatRow>,
    frame_message: Option<FormMessage>,
    boat_message: Option<FormMessage>,
    frames_limit: u32,
    poll_interval: Duration,
    focus_settle_delay: Duration,
}

impl<M: MapSurface> Dashboard<M> {
    pub fn new(api: Arc<dyn FleetApi>, map: M, settings: DashboardSettings) -> Self {
        Self {
            api,
            reconciler: MapReconciler::new(map, settings.reconciler),
            frames: TableState::Loading,
            boats: TableState::Loading,
            frame_message: None,
            boat_message: None,
            frames_limit: settings.frames_limit,
            poll_interval: settings.poll_interval,
            focus_settle_delay: settings.focus_settle_delay,
        }
    }

    pub fn reconciler(&self) -> &MapReconciler<M> {
        &self.reconciler
    }

    pub fn frames(&self) -> &TableState<FrameRow> {
        &self.frames
    }

    pub fn boats(&self) -> &TableState<BoatRow> {
        &self.boats
    }

    pub fn frame_message(&self) -> Option<&FormMessage> {
        self.frame_message.as_ref()
    }

    pub fn boat_message(&self) -> Option<&FormMessage> {
        self.boat_message.as_ref()
    }

    /// Runs one initial pass, then handles triggers and the poll timer until every
    /// [`TriggerSender`] is dropped.
    pub async fn run(mut self, mut triggers: mpsc::Receiver<Trigger>) -> Self {
        self.refresh().await;
        self.load_boats().await;

        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately and the initial pass already ran.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => self.handle(Trigger::Tick).await,
                trigger = triggers.recv() => match trigger {
                    Some(trigger) => self.handle(trigger).await,
                    None => {
                        info!("all trigger senders closed, stopping dashboard");
                        break;
                    }
                },
            }
        }

        self
    }

    pub async fn handle(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Tick | Trigger::RefreshFrames => self.refresh().await,
            Trigger::RefreshBoats => self.load_boats().await,
            Trigger::AddFrame(form) => self.add_frame(form).await,
            Trigger::DeleteFrame(id) => self.delete_frame(id).await,
            Trigger::AddBoat(form) => self.add_boat(form).await,
            Trigger::DeleteBoat(id) => self.delete_boat(id).await,
            Trigger::Focus(request) => {
                self.focus(request).await;
            }
        }
    }

    /// Frames first, then latest positions.
    pub async fn refresh(&mut self) {
        self.load_frames().await;
        self.load_latest().await;
    }

    #[instrument(skip(self))]
    async fn load_frames(&mut self) {
        match self.api.frames(self.frames_limit).await {
            Ok(frames) => {
                let pass = self.reconciler.reconcile_trail(&frames);
                debug!(?pass, "trail reconciled");
                self.frames = TableState::from_rows(frames.iter().map(FrameRow::from).collect());
            }
            Err(e) => {
                error!("failed to load frames: {e:?}");
                self.frames = TableState::Failed(e.user_message());
            }
        }
    }

    #[instrument(skip(self))]
    async fn load_latest(&mut self) {
        match self.api.latest_boats().await {
            Ok(reports) => {
                let pass = self.reconciler.reconcile_latest(&reports);
                debug!(?pass, "markers reconciled");
            }
            Err(e) => error!("failed to load latest positions: {e:?}"),
        }
    }

    #[instrument(skip(self))]
    async fn load_boats(&mut self) {
        self.boats = match self.api.boats().await {
            Ok(boats) => TableState::from_rows(boats.iter().map(BoatRow::from).collect()),
            Err(e) => {
                error!("failed to load boats: {e:?}");
                TableState::Failed(e.user_message())
            }
        };
    }

    #[instrument(skip(self))]
    async fn add_frame(&mut self, form: FrameForm) {
        let frame = match validate_new_frame(
            &form.boat_name,
            &form.latitude,
            &form.longitude,
            &form.raw_frame,
        ) {
            Ok(frame) => frame,
            Err(e) => {
                self.frame_message = Some(FormMessage::Error(e.user_message()));
                return;
            }
        };

        match self.api.add_frame(&frame).await {
            Ok(()) => {
                self.frame_message = Some(FormMessage::Success("Frame added".into()));
                self.refresh().await;
            }
            Err(e) => {
                warn!("failed to add frame: {e:?}");
                self.frame_message = Some(FormMessage::Error(e.user_message()));
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete_frame(&mut self, id: i64) {
        match self.api.delete_frame(id).await {
            Ok(()) => {
                self.frame_message = Some(FormMessage::Success(format!("Frame {id} deleted")));
                self.refresh().await;
            }
            Err(e) => {
                warn!("failed to delete frame: {e:?}");
                self.frame_message = Some(FormMessage::Error(e.user_message()));
            }
        }
    }

    #[instrument(skip(self))]
    async fn add_boat(&mut self, form: BoatForm) {
        let boat = match validate_new_boat(&form.name, &form.boat_type) {
            Ok(boat) => boat,
            Err(e) => {
                self.boat_message = Some(FormMessage::Error(e.user_message()));
                return;
            }
        };

        match self.api.add_boat(&boat).await {
            Ok(()) => {
                self.boat_message = Some(FormMessage::Success("Boat added".into()));
                self.load_boats().await;
            }
            Err(e) => {
                warn!("failed to add boat: {e:?}");
                self.boat_message = Some(FormMessage::Error(e.user_message()));
            }
        }
    }

    #[instrument(skip(self))]
    async fn delete_boat(&mut self, id: String) {
        match self.api.delete_boat(&id).await {
            Ok(()) => {
                self.boat_message = Some(FormMessage::Success(format!("Boat {id} deleted")));
                self.load_boats().await;
            }
            Err(e) => {
                warn!("failed to delete boat: {e:?}");
                self.boat_message = Some(FormMessage::Error(e.user_message()));
            }
        }
    }

    /// Refreshes the latest positions, lets the map settle and centers it on the vessel.
    #[instrument(skip(self))]
    pub async fn focus(&mut self, request: FocusRequest) -> FocusOutcome {
        self.load_latest().await;
        tokio::time::sleep(self.focus_settle_delay).await;
        self.reconciler
            .focus(&request.vessel, request.latitude, request.longitude)
    }
}

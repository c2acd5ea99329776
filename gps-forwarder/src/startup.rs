use std::time::Duration;

use fleet_client::FleetApiClient;
use snafu::ResultExt;
use tokio_serial::{SerialPortBuilderExt, SerialStream};
use tracing::{error, info, warn};

use crate::{
    error::{
        Result,
        error::{ApiSnafu, HttpClientSnafu, OpenSerialSnafu},
    },
    forwarder::Forwarder,
    settings::Settings,
};

pub struct App {
    forwarder: Forwarder,
    serial_port: String,
    baud_rate: u32,
    reconnect_delay: Duration,
}

impl App {
    pub async fn build(settings: Settings) -> Result<App> {
        let client = FleetApiClient::new(&settings.api_url, settings.request_timeout)
            .context(HttpClientSnafu)?;

        let mut forwarder = Forwarder::new(client, settings.credentials, settings.default_boat);
        forwarder.login().await.context(ApiSnafu)?;

        Ok(App {
            forwarder,
            serial_port: settings.serial_port,
            baud_rate: settings.baud_rate,
            reconnect_delay: settings.reconnect_delay,
        })
    }

    fn open_port(&self) -> Result<SerialStream> {
        tokio_serial::new(&self.serial_port, self.baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .context(OpenSerialSnafu {
                port: &self.serial_port,
            })
    }

    /// Reads the serial port forever, reopening it after `reconnect_delay` whenever it fails.
    pub async fn run(mut self) {
        loop {
            match self.open_port() {
                Ok(port) => {
                    info!(port = %self.serial_port, baud = self.baud_rate, "serial port open");
                    match self.forwarder.forward_lines(port).await {
                        Ok(()) => warn!("serial port closed"),
                        Err(e) => warn!("serial connection lost: {e:?}"),
                    }
                }
                Err(e) => error!("{e:?}"),
            }

            info!("reconnecting in {:?}", self.reconnect_delay);
            tokio::time::sleep(self.reconnect_delay).await;
        }
    }
}

#![deny(warnings)]
#![deny(rust_2018_idioms)]

use gps_forwarder::{settings::Settings, startup::App};

#[tokio::main]
async fn main() {
    let settings = Settings::new().unwrap();
    fleet_core::init_tracer(&settings.log_level, "gps-forwarder");

    let app = App::build(settings).await.unwrap();

    app.run().await;
}

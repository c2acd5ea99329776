#![deny(warnings)]
#![deny(rust_2018_idioms)]

use fleet_dashboard::{
    settings::Settings,
    startup::{App, run_to_completion},
};

fn main() {
    let settings = Settings::new().unwrap();
    fleet_core::init_tracer(&settings.log_level, "fleet-dashboard");

    run_to_completion(async {
        let app = App::build(&settings).await.unwrap();
        app.run().await.unwrap();
    })
    .unwrap();
}

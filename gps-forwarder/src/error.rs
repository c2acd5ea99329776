use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to open serial port '{port}'"))]
    OpenSerial {
        #[snafu(implicit)]
        location: Location,
        port: String,
        source: tokio_serial::Error,
    },
    #[snafu(display("Failed to build the api client"))]
    HttpClient {
        #[snafu(implicit)]
        location: Location,
        source: http_client::Error,
    },
    #[snafu(display("Fleet api call failed"))]
    Api {
        #[snafu(implicit)]
        location: Location,
        source: fleet_core::Error,
    },
}

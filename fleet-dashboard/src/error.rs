use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
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
    #[snafu(display("Failed to start the async runtime"))]
    Runtime {
        #[snafu(implicit)]
        location: Location,
        source: std::io::Error,
    },
    #[snafu(display("Neither a token nor credentials were configured"))]
    MissingCredentials {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("The dashboard loop is no longer running"))]
    DashboardClosed {
        #[snafu(implicit)]
        location: Location,
    },
}

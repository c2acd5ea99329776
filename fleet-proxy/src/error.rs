use std::fmt;

use actix_web::{HttpResponse, ResponseError, body::BoxBody, http::StatusCode};
use serde::Serialize;
use snafu::{Location, Snafu};
use strum::{AsRefStr, Display};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to bind the proxy listener"))]
    Bind {
        #[snafu(implicit)]
        location: Location,
        source: std::io::Error,
    },
    #[snafu(display("Failed to build the upstream client"))]
    HttpClient {
        #[snafu(implicit)]
        location: Location,
        source: http_client::Error,
    },
}

/// Proxied routes, named the way they appear in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum Route {
    #[strum(serialize = "register")]
    Register,
    #[strum(serialize = "login")]
    Login,
    #[strum(serialize = "gps")]
    Gps,
    #[strum(serialize = "frames")]
    Frames,
    #[strum(serialize = "boats/latest")]
    LatestBoats,
    #[strum(serialize = "boats")]
    Boats,
    #[strum(serialize = "add boat")]
    AddBoat,
    #[strum(serialize = "delete boat")]
    DeleteBoat,
    #[strum(serialize = "delete gps")]
    DeleteGps,
}

/// An upstream call made on behalf of `route` failed.
#[derive(Debug)]
pub struct ProxyError {
    route: Route,
    source: http_client::Error,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    success: bool,
    message: String,
}

impl Route {
    /// Whether a failing upstream status is passed on to the caller instead of a plain 500.
    fn relays_status(&self) -> bool {
        match self {
            Route::Register | Route::Login => false,
            Route::Gps
            | Route::Frames
            | Route::LatestBoats
            | Route::Boats
            | Route::AddBoat
            | Route::DeleteBoat
            | Route::DeleteGps => true,
        }
    }

    fn relays_message(&self) -> bool {
        matches!(self, Route::DeleteGps)
    }
}

impl ProxyError {
    pub fn new(route: Route, source: http_client::Error) -> Self {
        Self { route, source }
    }

    fn message(&self) -> String {
        self.route
            .relays_message()
            .then(|| self.source.message())
            .flatten()
            .unwrap_or_else(|| self.to_string())
    }
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Proxy API error ({})", self.route)
    }
}

impl std::error::Error for ProxyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl ResponseError for ProxyError {
    fn status_code(&self) -> StatusCode {
        if !self.route.relays_status() {
            return StatusCode::INTERNAL_SERVER_ERROR;
        }

        self.source
            .status()
            .and_then(|s| StatusCode::from_u16(s.as_u16()).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            success: false,
            message: self.message(),
        })
    }
}

use reqwest::StatusCode;
use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to build the http client"))]
    Build {
        #[snafu(implicit)]
        location: Location,
        source: reqwest::Error,
    },
    #[snafu(display("HTTP transport error"))]
    Transport {
        #[snafu(implicit)]
        location: Location,
        source: reqwest_middleware::Error,
    },
    #[snafu(display("Failed to read or decode the response body"))]
    Body {
        #[snafu(implicit)]
        location: Location,
        source: reqwest::Error,
    },
    #[snafu(display("HTTP request failed, status: '{status}', url: '{url}', body: '{body}'"))]
    FailedRequest {
        #[snafu(implicit)]
        location: Location,
        url: String,
        status: StatusCode,
        body: String,
    },
}

impl From<reqwest_middleware::Error> for Error {
    #[track_caller]
    fn from(source: reqwest_middleware::Error) -> Self {
        Error::Transport {
            location: Location::default(),
            source,
        }
    }
}

impl From<reqwest::Error> for Error {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        Error::Body {
            location: Location::default(),
            source,
        }
    }
}

impl Error {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Build { .. } | Error::Transport { .. } | Error::Body { .. } => None,
            Error::FailedRequest { status, .. } => Some(*status),
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Build { .. } | Error::Transport { .. } | Error::Body { .. } => None,
            Error::FailedRequest { body, .. } => Some(body),
        }
    }

    /// The `message` field of a JSON error body, if the upstream sent one.
    pub fn message(&self) -> Option<String> {
        #[derive(serde::Deserialize)]
        struct ErrorBody {
            message: Option<String>,
        }

        serde_json::from_str::<ErrorBody>(self.body()?)
            .ok()
            .and_then(|b| b.message)
    }
}

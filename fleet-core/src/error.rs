use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Fleet api could not be reached: '{message}'"))]
    Transport {
        #[snafu(implicit)]
        location: Location,
        message: String,
    },
    #[snafu(display("Fleet api responded with HTTP {status}"))]
    Status {
        #[snafu(implicit)]
        location: Location,
        status: u16,
        message: Option<String>,
    },
    #[snafu(display("Malformed response from '{endpoint}': {reason}"))]
    MalformedResponse {
        #[snafu(implicit)]
        location: Location,
        endpoint: String,
        reason: String,
    },
    #[snafu(display("Request was rejected by the fleet api: '{message}'"))]
    Rejected {
        #[snafu(implicit)]
        location: Location,
        message: String,
    },
    #[snafu(display("Invalid input: {message}"))]
    Validation {
        #[snafu(implicit)]
        location: Location,
        message: String,
    },
}

impl Error {
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            Error::Transport { .. }
            | Error::MalformedResponse { .. }
            | Error::Rejected { .. }
            | Error::Validation { .. } => None,
        }
    }

    /// Whether the backend refused our credentials and a fresh login might help.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }

    /// The text shown inline in the dashboard: the backend's own message when it sent one,
    /// otherwise the bare HTTP status.
    pub fn user_message(&self) -> String {
        match self {
            Error::Status {
                message: Some(message),
                ..
            } => message.clone(),
            Error::Status {
                status,
                message: None,
                ..
            } => format!("HTTP {status}"),
            Error::Rejected { message, .. } | Error::Validation { message, .. } => message.clone(),
            Error::Transport { .. } | Error::MalformedResponse { .. } => self.to_string(),
        }
    }
}

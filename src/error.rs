use crate::maud_conveniences::error_box;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use snafu::Snafu;

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Student backend returned {}: {}", status, body))]
    RequestFailed { status: u16, body: String },
    #[snafu(display("Unable to reach the student backend"))]
    Network { source: reqwest::Error },
    #[snafu(display("Unsupported byYear element shape: {}", value))]
    MalformedResponse { value: String },
    #[snafu(display("Missing required field `{}`", name))]
    MissingField { name: &'static str },
    #[snafu(display("Unable to parse date {:?}", original))]
    ParseDate {
        source: jiff::Error,
        original: String,
    },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
}

impl RosterError {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::RequestFailed { .. } | Self::Network { .. } | Self::MalformedResponse { .. } => {
                StatusCode::BAD_GATEWAY
            }
            Self::MissingField { .. } | Self::ParseDate { .. } => StatusCode::BAD_REQUEST,
            Self::BadEnvVar { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        error!(?self, "Error!");
        (self.status_code(), Html(error_box(self.to_string()))).into_response()
    }
}

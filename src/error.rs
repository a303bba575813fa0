use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;

pub type RosterResult<T> = Result<T, RosterError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to listen on {}", address))]
    BindListener {
        source: std::io::Error,
        address: String,
    },
    #[snafu(display("Error serving app"))]
    Serve { source: std::io::Error },
    #[snafu(display("Error sending {} request to {}", method, url))]
    SendRequest {
        source: reqwest::Error,
        method: &'static str,
        url: String,
    },
    #[snafu(display("Error decoding response body from {}", url))]
    DecodeBody { source: reqwest::Error, url: String },
    #[snafu(display("Error serialising {} for the page", what))]
    SerialiseVals {
        source: serde_json::Error,
        what: &'static str,
    },
    #[snafu(display("Students API rejected the request with {}", status))]
    RejectedRequest {
        status: StatusCode,
        message: Option<String>,
    },
}

impl RosterError {
    /// Whether the request never got a response, as opposed to getting a bad one.
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::SendRequest { .. })
    }
}

impl IntoResponse for RosterError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const BG: StatusCode = StatusCode::BAD_GATEWAY; //upstream misbehaved

        let basic_error = |desc| {
            html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Roster Error"}
                    span {(desc)}
                }
            }
        };

        let status_code = match &self {
            Self::BadEnvVar { .. } => ISE,
            Self::BindListener { .. } | Self::Serve { .. } => ISE,
            Self::SerialiseVals { .. } => ISE,
            Self::SendRequest { .. } | Self::DecodeBody { .. } => BG,
            Self::RejectedRequest { .. } => BG,
        };

        error!(?self, "Error!");
        (status_code, Html(basic_error(self.to_string()).into_string())).into_response()
    }
}

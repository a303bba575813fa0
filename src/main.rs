#![warn(clippy::pedantic, clippy::all, clippy::nursery)]
#![allow(clippy::single_match_else)]

use crate::{
    config::RuntimeConfiguration,
    error::{BindListenerSnafu, RosterResult, ServeSnafu},
    routes::{
        index::get_index_route,
        students::{
            delete_student, internal_get_confirm_delete, internal_get_dismiss,
            internal_get_edit_form, internal_get_students, post_student,
        },
    },
    state::RosterState,
};
use axum::{
    Router,
    routing::{get, post},
};
use snafu::ResultExt;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[macro_use]
extern crate tracing;

mod api;
mod client;
mod config;
mod data;
mod error;
mod filter;
mod maud_conveniences;
mod notify;
mod routes;
mod state;

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    warn!("signal received, starting graceful shutdown");
}

pub fn app(state: RosterState) -> Router {
    Router::new()
        .route("/", get(get_index_route))
        .route("/students", post(post_student).delete(delete_student))
        .route("/internal/students", get(internal_get_students))
        .route("/internal/students/edit", get(internal_get_edit_form))
        .route(
            "/internal/students/confirm_delete",
            get(internal_get_confirm_delete),
        )
        .route("/internal/dismiss", get(internal_get_dismiss))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> RosterResult<()> {
    let dotenv_result = dotenvy::dotenv();

    tracing::subscriber::set_global_default(
        FmtSubscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .finish(),
    )
    .expect("unable to set tracing subscriber");

    info!("`tracing` online");
    if let Err(e) = dotenv_result {
        if e.not_found() {
            debug!("no .env file, using the environment as-is");
        } else {
            warn!(?e, "unable to load .env file");
        }
    }

    let config = RuntimeConfiguration::new()?;
    let state = RosterState::new(config);
    info!(api = ?state.config().api_config(), "Using students API");

    let server_ip = state.config().server_ip().to_string();
    let listener = TcpListener::bind(&server_ip)
        .await
        .context(BindListenerSnafu {
            address: &server_ip,
        })?;

    info!(?server_ip, "Listening");
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context(ServeSnafu)
}

#![cfg(feature = "std")]
//! HTTP surface: routes, CORS and error-to-status mapping.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{error, info};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use crate::common::ShotError;
use crate::config::ServerConfig;
use crate::engine_api::{GameApi, SharedSession};
use crate::protocol::{ErrorResponse, ShotRequest, ShotResponse, StateResponse};

pub const BANNER: &str = "Battleship reveal board backend running";

/// Shot failure as seen by an HTTP client.
#[derive(Debug)]
pub struct ApiError(pub ShotError);

impl From<ShotError> for ApiError {
    fn from(err: ShotError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            error!("internal fault while processing shot");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(ErrorResponse::from(&self.0))).into_response()
    }
}

/// Build the router over any [`GameApi`] implementation.
pub fn router<A>(api: A) -> Router
where
    A: GameApi + Clone + 'static,
{
    Router::new()
        .route("/", get(banner))
        .route("/state", get(get_state::<A>))
        .route("/reset", post(reset_board::<A>))
        .route("/click", post(apply_shot::<A>))
        .layer(CorsLayer::permissive())
        .with_state(api)
}

async fn banner() -> &'static str {
    BANNER
}

async fn get_state<A: GameApi>(State(api): State<A>) -> Json<StateResponse> {
    Json(StateResponse::new(api.get_state().await))
}

async fn reset_board<A: GameApi>(State(api): State<A>) -> Json<StateResponse> {
    Json(StateResponse::new(api.reset_board().await))
}

async fn apply_shot<A: GameApi>(
    State(api): State<A>,
    body: Bytes,
) -> Result<Json<ShotResponse>, ApiError> {
    let shot = ShotRequest::decode(&body).into_shot().inspect_err(|e| {
        log::warn!("rejected shot request: {}", e);
    })?;
    let report = api.apply_shot(shot).await?;
    Ok(Json(ShotResponse::new(report.outcome, report.board)))
}

/// Bind, build the session and serve until Ctrl-C.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let session = config.session()?;
    let api = SharedSession::new(session);
    let listener = TcpListener::bind(config.addr()).await?;
    info!(
        "battleship backend listening on {} ({} mode)",
        listener.local_addr()?,
        api.mode()
    );
    axum::serve(listener, router(api))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

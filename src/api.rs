//! HTTP surface
//!
//! Two routes: the gateway webhook that feeds inbound chat events to the
//! engine, and a health probe. The webhook acks immediately; handling and
//! delivery happen on the sender's worker.

use crate::engine::Engine;
use crate::transport::InboundEvent;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/events", post(receive_event))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn receive_event(
    State(state): State<AppState>,
    Json(event): Json<InboundEvent>,
) -> StatusCode {
    tracing::debug!(sender = %event.sender, "inbound event");
    state.engine.dispatch(event).await;
    StatusCode::ACCEPTED
}

async fn health() -> &'static str {
    "ok"
}

//! HTTP API for the Gasofilaço Engine.
//!
//! This module exposes a minimal REST API around the tally, the
//! validator and the report aggregator using the
//! [`axum`](https://crates.io/crates/axum) framework.  Requests and
//! responses are JSON; amounts travel as decimal strings.

use crate::denominations::DenominationSet;
use crate::error::{ServiceError, ValidationError};
use crate::models::{DenominationCount, NewGasofilacoRecord};
use crate::service::GasofilacoService;
use crate::tally::total;
use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

/// Application state shared across requests.
pub struct AppState {
    pub service: GasofilacoService,
    pub denominations: DenominationSet,
}

#[derive(Debug, Deserialize)]
pub struct TallyRequest {
    #[serde(default)]
    pub bills: Vec<DenominationCount>,
    #[serde(default)]
    pub coins: Vec<DenominationCount>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TallyResponse {
    pub total: Decimal,
}

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Build the API router around `state`.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/denominations", get(denominations_handler))
        .route("/api/tally", post(tally_handler))
        .route("/api/gasofilaco", post(create_handler))
        .route("/api/gasofilaco/report", get(report_handler))
        .with_state(state)
}

/// Handler for GET /api/denominations
async fn denominations_handler(State(app_state): State<Arc<AppState>>) -> Json<DenominationSet> {
    Json(app_state.denominations.clone())
}

/// Handler for POST /api/tally
///
/// Only positive bills and coins of the active denomination set are
/// accepted.
async fn tally_handler(
    State(app_state): State<Arc<AppState>>,
    Json(input): Json<TallyRequest>,
) -> Response {
    let checked = app_state
        .denominations
        .check_counts(&input.bills, &input.coins)
        .and_then(|()| total(&input.bills, &input.coins));
    match checked {
        Ok(total) => (StatusCode::OK, Json(TallyResponse { total })).into_response(),
        Err(err) => validation_response(&err),
    }
}

/// Handler for POST /api/gasofilaco
async fn create_handler(
    State(app_state): State<Arc<AppState>>,
    Json(input): Json<NewGasofilacoRecord>,
) -> Response {
    match app_state.service.register(input).await {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(err) => error_response(err),
    }
}

/// Handler for GET /api/gasofilaco/report
async fn report_handler(
    State(app_state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Response {
    match app_state.service.report(query.start, query.end).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ServiceError) -> Response {
    match err {
        ServiceError::Validation(err) => validation_response(&err),
        ServiceError::Repository(err) => internal_response(err.to_string()),
        ServiceError::Task(err) => internal_response(err.to_string()),
    }
}

fn internal_response(message: String) -> Response {
    error!(error = %message, "request failed");
    let body = Json(json!({"error": "internal", "message": message}));
    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}

fn validation_response(err: &ValidationError) -> Response {
    let body = Json(json!({"error": err.kind(), "message": err.to_string()}));
    (StatusCode::BAD_REQUEST, body).into_response()
}

/// Launch the API server.  Binds to `addr` and blocks until the
/// server terminates (e.g. when interrupted).
pub async fn serve(addr: &str, state: Arc<AppState>) -> Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "server listening");
    axum::serve(listener, router).await?;
    Ok(())
}

//! HTTP request handlers for the dashboard API.

use axum::{
    Json, Router,
    body::Bytes,
    extract::{
        DefaultBodyLimit, Query, State,
        rejection::{BytesRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chrono::Local;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{DashboardQuery, options_from_csv, process_csv};

use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
///
/// Uploads are capped at the configured `server.max_body_bytes`.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config().server.max_body_bytes;
    Router::new()
        .route("/dashboard", post(dashboard_handler))
        .route("/filters", post(filters_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

fn read_body(
    body: Result<Bytes, BytesRejection>,
    correlation_id: Uuid,
) -> Result<Bytes, Response> {
    body.map_err(|rejection| {
        warn!(correlation_id = %correlation_id, error = %rejection.body_text(), "Upload rejected");
        ApiErrorResponse::from(rejection).into_response()
    })
}

/// Handler for `POST /dashboard`.
///
/// The body is the CSV export; `start`, `end`, `directorate`, `work_type`
/// and `position_grade` are read from the query string.
async fn dashboard_handler(
    State(state): State<AppState>,
    query: Result<Query<DashboardQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let body = match read_body(body, correlation_id) {
        Ok(body) => body,
        Err(response) => return response,
    };
    info!(
        correlation_id = %correlation_id,
        bytes = body.len(),
        "Processing dashboard request"
    );

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            let details = rejection.body_text();
            warn!(correlation_id = %correlation_id, error = %details, "Invalid query string");
            return (StatusCode::BAD_REQUEST, Json(ApiError::invalid_query(details)))
                .into_response();
        }
    };

    let today = Local::now().date_naive();
    match process_csv(body.as_ref(), &query, state.config(), today) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                report_id = %report.report_id,
                selected = report.summary.record_count,
                warnings = report.warnings.len(),
                duration_us = report.duration_us,
                "Dashboard request completed"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Dashboard request failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `POST /filters`.
///
/// Lists the selectable directorates, work types and position grades of the
/// posted CSV export.
async fn filters_handler(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let body = match read_body(body, correlation_id) {
        Ok(body) => body,
        Err(response) => return response,
    };
    info!(correlation_id = %correlation_id, bytes = body.len(), "Processing filters request");

    match options_from_csv(body.as_ref(), state.config()) {
        Ok(options) => (StatusCode::OK, Json(options)).into_response(),
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Filters request failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

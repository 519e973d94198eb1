//! HTTP request handlers for the Coverage Engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{build_report, compute_contribution};
use crate::error::EngineError;
use crate::models::{Roster, RosterSnapshot};

use super::request::AddEntryRequest;
use super::response::{
    ApiError, ApiErrorResponse, EntryAdded, ModelsResponse, RosterChanged, SessionCreated,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/models", get(models_handler))
        .route("/sessions", post(create_session_handler))
        .route("/sessions/:session_id", delete(delete_session_handler))
        .route(
            "/sessions/:session_id/entries",
            post(add_entry_handler).delete(clear_entries_handler),
        )
        .route(
            "/sessions/:session_id/entries/last",
            delete(remove_last_handler),
        )
        .route("/sessions/:session_id/report", get(report_handler))
        .route("/sessions/:session_id/export", get(export_handler))
        .route("/sessions/:session_id/import", put(import_handler))
        .with_state(state)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
}

fn error_response(api_error: ApiErrorResponse) -> Response {
    json_response(api_error.status, api_error.error)
}

fn engine_error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %err, "Request rejected");
    error_response(err.into())
}

/// Maps a JSON body rejection to a 400 response.
fn json_rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            let is_validation = [
                "missing field",
                "invalid type",
                "unknown variant",
                "unknown field",
            ]
            .iter()
            .any(|marker| body_text.contains(marker));
            if is_validation {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    error_response(ApiErrorResponse::bad_request(error))
}

/// Extracts the session id or builds the 400 response for a bad one.
fn session_id(
    correlation_id: Uuid,
    path: Result<Path<Uuid>, PathRejection>,
) -> Result<Uuid, Response> {
    path.map(|Path(id)| id).map_err(|rejection| {
        warn!(
            correlation_id = %correlation_id,
            error = %rejection.body_text(),
            "Invalid session id"
        );
        error_response(ApiErrorResponse::bad_request(ApiError::invalid_session_id(
            rejection.body_text(),
        )))
    })
}

/// Handler for GET /models.
///
/// Returns the active calculator settings and staffing models.
async fn models_handler(State(state): State<AppState>) -> Response {
    let config = state.config();
    json_response(
        StatusCode::OK,
        ModelsResponse {
            settings: config.settings().clone(),
            models: config.models().to_vec(),
        },
    )
}

/// Handler for POST /sessions.
async fn create_session_handler(State(state): State<AppState>) -> Response {
    let session_id = state.sessions().create();
    info!(session_id = %session_id, "Session created");
    json_response(StatusCode::CREATED, SessionCreated { session_id })
}

/// Handler for DELETE /sessions/:session_id.
async fn delete_session_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let session_id = match session_id(correlation_id, path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.sessions().remove(session_id) {
        Ok(()) => {
            info!(correlation_id = %correlation_id, session_id = %session_id, "Session discarded");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for POST /sessions/:session_id/entries.
///
/// Validates the clinician parameters, computes the group's contribution and
/// appends it to the session's roster. A rejected request leaves the roster
/// unchanged.
async fn add_entry_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<AddEntryRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let session_id = match session_id(correlation_id, path) {
        Ok(id) => id,
        Err(response) => return response,
    };
    info!(correlation_id = %correlation_id, session_id = %session_id, "Processing add entry request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let contribution = match compute_contribution(
        request.clinician_type,
        &request.params,
        state.config().settings(),
    ) {
        Ok(contribution) => contribution,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let is_app = contribution.is_app;
    let reasoning = contribution.reasoning.clone();
    let entry = contribution.into_entry();

    let result = state.sessions().with_roster(session_id, |roster| {
        roster.add(entry.clone());
        Ok(roster.len())
    });

    match result {
        Ok(roster_size) => {
            info!(
                correlation_id = %correlation_id,
                session_id = %session_id,
                clinician_type = %entry.clinician_type,
                day_shifts = entry.day_shifts,
                night_shifts = entry.night_shifts,
                roster_size,
                "Entry added"
            );
            let message = format!(
                "Added {} with {} day shifts and {} night shifts.",
                entry.clinician_type, entry.day_shifts, entry.night_shifts
            );
            json_response(
                StatusCode::CREATED,
                EntryAdded {
                    entry,
                    is_app,
                    reasoning,
                    message,
                    roster_size,
                },
            )
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for DELETE /sessions/:session_id/entries/last.
///
/// An empty roster is reported as an informational no-op, not a failure.
async fn remove_last_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let session_id = match session_id(correlation_id, path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let result = state.sessions().with_roster(session_id, |roster| {
        let removed = match roster.remove_last() {
            Ok(entry) => Some(entry),
            Err(EngineError::EmptyRoster) => None,
            Err(err) => return Err(err),
        };
        Ok((removed, roster.len()))
    });

    match result {
        Ok((Some(entry), roster_size)) => {
            info!(
                correlation_id = %correlation_id,
                session_id = %session_id,
                clinician_type = %entry.clinician_type,
                roster_size,
                "Removed last entry"
            );
            let message = format!("Removed last entry: {}", entry.clinician_type);
            json_response(
                StatusCode::OK,
                RosterChanged {
                    removed: Some(entry),
                    message,
                    roster_size,
                },
            )
        }
        Ok((None, roster_size)) => {
            info!(correlation_id = %correlation_id, session_id = %session_id, "No entries to remove");
            json_response(
                StatusCode::OK,
                RosterChanged {
                    removed: None,
                    message: "No entries to remove.".to_string(),
                    roster_size,
                },
            )
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for DELETE /sessions/:session_id/entries.
async fn clear_entries_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let session_id = match session_id(correlation_id, path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let result = state.sessions().with_roster(session_id, |roster| {
        let cleared = roster.len();
        roster.clear();
        Ok(cleared)
    });

    match result {
        Ok(cleared) => {
            info!(correlation_id = %correlation_id, session_id = %session_id, cleared, "Roster cleared");
            json_response(
                StatusCode::OK,
                RosterChanged {
                    removed: None,
                    message: format!("Cleared {} entries.", cleared),
                    roster_size: 0,
                },
            )
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /sessions/:session_id/report.
///
/// Recomputes raw and buffered totals, model coverage and the entry table.
async fn report_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let session_id = match session_id(correlation_id, path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let config = state.config();
    let result = state
        .sessions()
        .with_roster(session_id, |roster| build_report(roster, config));

    match result {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                session_id = %session_id,
                entries = report.entries.len(),
                raw_day = report.raw_totals.day,
                raw_night = report.raw_totals.night,
                adjusted_day = report.adjusted_totals.day,
                adjusted_night = report.adjusted_totals.night,
                buffer_applied = report.buffer_applied,
                duration_us = start_time.elapsed().as_micros(),
                "Report computed"
            );
            json_response(StatusCode::OK, report)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for GET /sessions/:session_id/export.
async fn export_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let session_id = match session_id(correlation_id, path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state
        .sessions()
        .with_roster(session_id, |roster| Ok(roster.to_snapshot()))
    {
        Ok(snapshot) => {
            debug!(
                correlation_id = %correlation_id,
                session_id = %session_id,
                entries = snapshot.entries.len(),
                "Roster exported"
            );
            json_response(StatusCode::OK, snapshot)
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

/// Handler for PUT /sessions/:session_id/import.
///
/// Replaces the session's roster with the snapshot's entries.
async fn import_handler(
    State(state): State<AppState>,
    path: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<RosterSnapshot>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let session_id = match session_id(correlation_id, path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let snapshot = match payload {
        Ok(Json(snapshot)) => snapshot,
        Err(rejection) => return json_rejection_response(correlation_id, rejection),
    };

    let imported = match Roster::from_snapshot(snapshot) {
        Ok(roster) => roster,
        Err(err) => return engine_error_response(correlation_id, err),
    };

    let result = state.sessions().with_roster(session_id, |roster| {
        *roster = imported;
        Ok(roster.len())
    });

    match result {
        Ok(roster_size) => {
            info!(correlation_id = %correlation_id, session_id = %session_id, roster_size, "Roster imported");
            json_response(
                StatusCode::OK,
                RosterChanged {
                    removed: None,
                    message: format!("Imported {} entries.", roster_size),
                    roster_size,
                },
            )
        }
        Err(err) => engine_error_response(correlation_id, err),
    }
}

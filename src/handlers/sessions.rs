//! What-if session handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::logic::whatif::SessionSnapshot;
use crate::models::{RecalculateResponse, SetFieldRequest};
use crate::{AppError, AppResult, AppState};

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session not found: {}", id))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionSnapshot>> {
    let snapshot = state.sessions.snapshot(id).ok_or_else(|| not_found(id))?;
    Ok(Json(snapshot))
}

/// Edit one attribute of the working input
pub async fn set_field(
    State(state): State<AppState>,
    Path((id, name)): Path<(Uuid, String)>,
    Json(req): Json<SetFieldRequest>,
) -> AppResult<Json<SessionSnapshot>> {
    let snapshot = state
        .sessions
        .with_session(id, |s| s.set_field(&name, req.value).map(|_| s.snapshot()))
        .ok_or_else(|| not_found(id))??;

    tracing::debug!("Session {} field {} updated", id, name);
    Ok(Json(snapshot))
}

/// Re-run the prediction on the working input without persisting it
pub async fn recalculate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<RecalculateResponse>> {
    let outcome = state.sessions.recalculate(id, state.predictor.as_ref()).await?;
    let session = state.sessions.snapshot(id).ok_or_else(|| not_found(id))?;

    Ok(Json(RecalculateResponse { outcome, session }))
}

pub async fn reset(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<SessionSnapshot>> {
    let snapshot = state
        .sessions
        .with_session(id, |s| {
            s.reset();
            s.snapshot()
        })
        .ok_or_else(|| not_found(id))?;

    Ok(Json(snapshot))
}

pub async fn close(State(state): State<AppState>, Path(id): Path<Uuid>) -> AppResult<StatusCode> {
    if !state.sessions.remove(id) {
        return Err(not_found(id));
    }
    tracing::info!("Session {} closed", id);
    Ok(StatusCode::NO_CONTENT)
}

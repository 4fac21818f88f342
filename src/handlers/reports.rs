//! Report handler

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::logic::drivers::{self, REPORT_DRIVER_LIMIT};
use crate::logic::recommend;
use crate::logic::report::{compose, report_filename};
use crate::{AppError, AppResult, AppState};

/// Compose the report for a session's working input and current prediction
pub async fn session_report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Response> {
    let generated_at = Utc::now();

    let document = state
        .sessions
        .with_session(id, |s| {
            let drivers = drivers::rank(&s.model().feature_importance, REPORT_DRIVER_LIMIT);
            let recommendations = recommend::evaluate(s.working_input());
            compose(
                s.working_input(),
                &s.current_prediction(),
                &drivers,
                &recommendations,
                generated_at,
            )
        })
        .ok_or_else(|| AppError::NotFound(format!("Session not found: {}", id)))?;

    let filename = report_filename(generated_at.date_naive());
    tracing::info!("Report {} composed for session {} ({} page(s))", filename, id, document.page_count);

    Ok((
        [(header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename))],
        Json(document),
    )
        .into_response())
}

//! Feedback handler

use axum::{extract::State, Json};
use validator::Validate;

use crate::logic::feedback::FeedbackPayload;
use crate::models::{FeedbackRequest, FeedbackResponse};
use crate::{AppResult, AppState};

pub async fn submit(
    State(state): State<AppState>,
    Json(req): Json<FeedbackRequest>,
) -> AppResult<Json<FeedbackResponse>> {
    req.validate()?;

    let feedback = FeedbackPayload::build(req.timestamp, req.model_id, req.prediction, req.verdict);
    state.predictor.submit_feedback(&feedback).await?;

    Ok(Json(FeedbackResponse {
        msg: "Feedback received",
        feedback,
    }))
}

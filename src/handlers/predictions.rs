//! Prediction handler
//!
//! Runs the persisted prediction, interprets it and opens a what-if session
//! seeded with the same input.

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::logic::drivers::{self, RANK_LIMIT};
use crate::logic::recommend;
use crate::logic::whatif::WhatIfSession;
use crate::models::{PredictionRequest, PredictionResponse};
use crate::{AppError, AppResult, AppState};

pub async fn create(
    State(state): State<AppState>,
    Json(req): Json<PredictionRequest>,
) -> AppResult<(StatusCode, Json<PredictionResponse>)> {
    req.validate()?;
    if req.input_data.is_empty() {
        return Err(AppError::ValidationError("Model ID and input data required".to_string()));
    }

    // Resolve the model first so an unknown id never reaches history
    let model = state.predictor.get_model(&req.model_id).await?;
    let prediction = state
        .predictor
        .predict(&req.model_id, &req.input_data, true)
        .await?;

    let drivers = drivers::rank(&model.feature_importance, RANK_LIMIT);
    let recommendations = recommend::evaluate(&req.input_data);
    let algorithm = model.algorithm.clone();

    let session = WhatIfSession::initialize(req.model_id.clone(), model, req.input_data, prediction);
    let adjustable_fields = session.adjustable_fields();
    let session_id = state.sessions.insert(session);

    tracing::info!(
        "Prediction {} ({:.3}) with model {}, session {}",
        prediction.prediction,
        prediction.probability,
        req.model_id,
        session_id
    );

    Ok((
        StatusCode::CREATED,
        Json(PredictionResponse {
            session_id,
            model_id: req.model_id,
            algorithm,
            prediction,
            verdict: prediction.verdict_label(),
            confidence_percent: prediction.confidence_percent(),
            drivers,
            recommendations,
            adjustable_fields,
        }),
    ))
}

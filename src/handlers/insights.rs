//! Driver ranking and recommendation handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use validator::Validate;

use crate::logic::drivers::{self, RANK_LIMIT};
use crate::logic::recommend;
use crate::models::{
    DriverQuery, DriversResponse, RankDriversRequest, RecommendationsRequest, RecommendationsResponse,
};
use crate::{AppResult, AppState};

/// Rank a caller-supplied importance map
pub async fn rank(Json(req): Json<RankDriversRequest>) -> AppResult<Json<DriversResponse>> {
    req.validate()?;

    let drivers = drivers::rank(&req.feature_importance, req.limit.unwrap_or(RANK_LIMIT));

    Ok(Json(DriversResponse {
        algorithm: None,
        has_importance: !req.feature_importance.is_empty(),
        drivers,
    }))
}

/// Rank the importance vector of a registered model
pub async fn model_drivers(
    State(state): State<AppState>,
    Path(model_id): Path<String>,
    Query(query): Query<DriverQuery>,
) -> AppResult<Json<DriversResponse>> {
    query.validate()?;

    let model = state.predictor.get_model(&model_id).await?;
    let drivers = drivers::rank(&model.feature_importance, query.limit.unwrap_or(RANK_LIMIT));

    tracing::debug!("Ranked {} drivers for model {}", drivers.len(), model_id);

    Ok(Json(DriversResponse {
        algorithm: Some(model.algorithm),
        has_importance: !model.feature_importance.is_empty(),
        drivers,
    }))
}

pub async fn recommendations(Json(req): Json<RecommendationsRequest>) -> Json<RecommendationsResponse> {
    Json(RecommendationsResponse {
        recommendations: recommend::evaluate(&req.input),
    })
}

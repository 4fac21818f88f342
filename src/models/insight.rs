//! Driver and recommendation models

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::logic::types::{DriverEntry, FeatureImportance, StudentRecord};

#[derive(Debug, Deserialize, Validate)]
pub struct RankDriversRequest {
    #[serde(default)]
    pub feature_importance: FeatureImportance,
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct DriverQuery {
    #[validate(range(min = 1, max = 50))]
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct DriversResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<String>,
    pub drivers: Vec<DriverEntry>,
    /// False when the model carries no importance data
    pub has_importance: bool,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsRequest {
    pub input: StudentRecord,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsResponse {
    pub recommendations: Vec<String>,
}

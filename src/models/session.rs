//! Prediction and what-if session models

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::logic::types::{AttrValue, DriverEntry, PredictionResult, StudentRecord};
use crate::logic::whatif::{FieldRange, RecalcOutcome, SessionSnapshot};

#[derive(Debug, Deserialize, Validate)]
pub struct PredictionRequest {
    #[validate(length(min = 1, message = "model_id is required"))]
    pub model_id: String,
    pub input_data: StudentRecord,
}

/// Original prediction with its interpretation and the opened session
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub session_id: Uuid,
    pub model_id: String,
    pub algorithm: String,
    pub prediction: PredictionResult,
    pub verdict: &'static str,
    pub confidence_percent: String,
    pub drivers: Vec<DriverEntry>,
    pub recommendations: Vec<String>,
    pub adjustable_fields: Vec<FieldRange>,
}

#[derive(Debug, Deserialize)]
pub struct SetFieldRequest {
    pub value: AttrValue,
}

#[derive(Debug, Serialize)]
pub struct RecalculateResponse {
    pub outcome: RecalcOutcome,
    pub session: SessionSnapshot,
}

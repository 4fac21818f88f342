//! Classification Service Seam
//!
//! The engine needs three calls from the remote classifier: `predict`,
//! `get_model` and `submit_feedback`. Everything else about that service
//! (training, storage, auth) stays on its side.

pub mod client;
#[cfg(test)]
pub mod mock;

pub use client::{HttpPredictor, PredictorConfig};

use crate::logic::feedback::FeedbackPayload;
use crate::logic::types::{ModelMetadata, PredictionResult, StudentRecord};

/// Classification service errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum PredictorError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Classification service returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),
}

/// Remote classifier contract
#[axum::async_trait]
pub trait Predictor: Send + Sync {
    /// Classify `input` with `model_id`. `persist = false` keeps the call
    /// out of the service's prediction history.
    async fn predict(
        &self,
        model_id: &str,
        input: &StudentRecord,
        persist: bool,
    ) -> Result<PredictionResult, PredictorError>;

    /// Registry entry for `model_id`
    async fn get_model(&self, model_id: &str) -> Result<ModelMetadata, PredictorError>;

    /// Record the user's verdict on a stored prediction
    async fn submit_feedback(&self, feedback: &FeedbackPayload) -> Result<(), PredictorError>;
}

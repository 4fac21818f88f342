//! Feedback models

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::logic::feedback::{FeedbackPayload, FeedbackVerdict};

#[derive(Debug, Deserialize, Validate)]
pub struct FeedbackRequest {
    /// History timestamp of the stored prediction
    #[validate(length(min = 1, message = "timestamp is required"))]
    pub timestamp: String,
    #[validate(length(min = 1, message = "model_id is required"))]
    pub model_id: String,
    /// Label that was predicted
    #[validate(range(max = 1))]
    pub prediction: u8,
    pub verdict: FeedbackVerdict,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub msg: &'static str,
    pub feedback: FeedbackPayload,
}

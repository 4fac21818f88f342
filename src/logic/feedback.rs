//! Prediction feedback
//!
//! The user marks a stored prediction as correct or incorrect; the service
//! receives the label the user believes was the real outcome. "Correct"
//! echoes the predicted label back unchanged.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackVerdict {
    Correct,
    Incorrect,
}

/// Payload forwarded to the classification service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackPayload {
    /// Identifies the stored prediction
    pub timestamp: String,
    pub model_id: String,
    pub actual_result: u8,
}

/// Label the user asserts as the real outcome
pub fn actual_result(predicted: u8, verdict: FeedbackVerdict) -> u8 {
    match verdict {
        FeedbackVerdict::Correct => predicted,
        FeedbackVerdict::Incorrect => {
            if predicted == 1 {
                0
            } else {
                1
            }
        }
    }
}

impl FeedbackPayload {
    pub fn build(
        timestamp: impl Into<String>,
        model_id: impl Into<String>,
        predicted: u8,
        verdict: FeedbackVerdict,
    ) -> Self {
        Self {
            timestamp: timestamp.into(),
            model_id: model_id.into(),
            actual_result: actual_result(predicted, verdict),
        }
    }
}

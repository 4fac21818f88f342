//! In-process predictors for tests

use std::collections::VecDeque;

use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot};

use super::{Predictor, PredictorError};
use crate::logic::feedback::FeedbackPayload;
use crate::logic::types::{ModelMetadata, PredictionResult, StudentRecord};

/// One recorded `predict` call
#[derive(Debug, Clone)]
pub struct PredictCall {
    pub model_id: String,
    pub input: StudentRecord,
    pub persist: bool,
}

/// Replays queued results in order and records every call
#[derive(Default)]
pub struct ScriptedPredictor {
    pub model: Option<ModelMetadata>,
    results: Mutex<VecDeque<Result<PredictionResult, PredictorError>>>,
    calls: Mutex<Vec<PredictCall>>,
    feedback: Mutex<Vec<FeedbackPayload>>,
}

impl ScriptedPredictor {
    pub fn new(model: ModelMetadata) -> Self {
        Self {
            model: Some(model),
            ..Default::default()
        }
    }

    pub fn push(&self, result: Result<PredictionResult, PredictorError>) {
        self.results.lock().push_back(result);
    }

    pub fn calls(&self) -> Vec<PredictCall> {
        self.calls.lock().clone()
    }

    pub fn feedback(&self) -> Vec<FeedbackPayload> {
        self.feedback.lock().clone()
    }
}

#[axum::async_trait]
impl Predictor for ScriptedPredictor {
    async fn predict(
        &self,
        model_id: &str,
        input: &StudentRecord,
        persist: bool,
    ) -> Result<PredictionResult, PredictorError> {
        self.calls.lock().push(PredictCall {
            model_id: model_id.to_string(),
            input: input.clone(),
            persist,
        });
        self.results
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(PredictorError::Network("no scripted result".to_string())))
    }

    async fn get_model(&self, model_id: &str) -> Result<ModelMetadata, PredictorError> {
        self.model
            .clone()
            .ok_or_else(|| PredictorError::ModelNotFound(model_id.to_string()))
    }

    async fn submit_feedback(&self, feedback: &FeedbackPayload) -> Result<(), PredictorError> {
        self.feedback.lock().push(feedback.clone());
        Ok(())
    }
}

/// A `predict` call held open until the test answers it
pub struct PendingCall {
    pub input: StudentRecord,
    pub reply: oneshot::Sender<Result<PredictionResult, PredictorError>>,
}

/// Hands every call to the test, which decides when (and how) it completes
pub struct GatedPredictor {
    calls: mpsc::UnboundedSender<PendingCall>,
}

impl GatedPredictor {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PendingCall>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { calls: tx }, rx)
    }
}

#[axum::async_trait]
impl Predictor for GatedPredictor {
    async fn predict(
        &self,
        _model_id: &str,
        input: &StudentRecord,
        _persist: bool,
    ) -> Result<PredictionResult, PredictorError> {
        let (reply, answer) = oneshot::channel();
        self.calls
            .send(PendingCall { input: input.clone(), reply })
            .map_err(|_| PredictorError::Network("test harness gone".to_string()))?;
        answer
            .await
            .unwrap_or_else(|_| Err(PredictorError::Network("call dropped".to_string())))
    }

    async fn get_model(&self, model_id: &str) -> Result<ModelMetadata, PredictorError> {
        Err(PredictorError::ModelNotFound(model_id.to_string()))
    }

    async fn submit_feedback(&self, _feedback: &FeedbackPayload) -> Result<(), PredictorError> {
        Ok(())
    }
}

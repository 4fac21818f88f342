//! Classification Service HTTP Client
//!
//! Talks to the prediction backend's REST API:
//! - `POST {base}/predict/` with `{model_id, input_data, save}`
//! - `GET  {base}/models/list` returning the model registry
//! - `POST {base}/predict/feedback` with `{timestamp, model_id, actual_result}`

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{Predictor, PredictorError};
use crate::logic::feedback::FeedbackPayload;
use crate::logic::types::{FeatureImportance, ModelMetadata, PredictionResult, StudentRecord};

/// Client configuration
#[derive(Debug, Clone)]
pub struct PredictorConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_seconds: u64,
}

/// HTTP-backed predictor
pub struct HttpPredictor {
    config: PredictorConfig,
    http_client: reqwest::Client,
}

// Request/Response types

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    model_id: &'a str,
    input_data: &'a StudentRecord,
    save: bool,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    prediction: u8,
    probability: f64,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    model_id: String,
    algorithm: String,
    #[serde(default)]
    feature_importance: Option<ImportanceWire>,
}

/// The registry stores importance as a JSON string; the list endpoint
/// usually decodes it, but not for every row.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImportanceWire {
    Map(FeatureImportance),
    Encoded(String),
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    msg: String,
}

impl ImportanceWire {
    fn decode(self) -> Result<FeatureImportance, PredictorError> {
        match self {
            ImportanceWire::Map(map) => Ok(map),
            ImportanceWire::Encoded(s) if s.trim().is_empty() => Ok(FeatureImportance::new()),
            ImportanceWire::Encoded(s) => serde_json::from_str(&s)
                .map_err(|e| PredictorError::Parse(format!("feature_importance: {}", e))),
        }
    }
}

impl ModelEntry {
    fn into_metadata(self) -> Result<ModelMetadata, PredictorError> {
        let feature_importance = match self.feature_importance {
            Some(wire) => wire.decode()?,
            None => FeatureImportance::new(),
        };
        Ok(ModelMetadata {
            algorithm: self.algorithm,
            feature_importance,
        })
    }
}

impl HttpPredictor {
    /// Create new client
    pub fn new(config: PredictorConfig) -> Result<Self, PredictorError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PredictorError::Network(e.to_string()))?;

        Ok(Self { config, http_client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn upstream_error(response: reqwest::Response) -> PredictorError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.msg)
            .unwrap_or(body);
        PredictorError::Upstream { status, message }
    }
}

#[axum::async_trait]
impl Predictor for HttpPredictor {
    async fn predict(
        &self,
        model_id: &str,
        input: &StudentRecord,
        persist: bool,
    ) -> Result<PredictionResult, PredictorError> {
        let request = PredictRequest {
            model_id,
            input_data: input,
            save: persist,
        };

        tracing::debug!("predict model={} fields={} save={}", model_id, input.len(), persist);

        let response = self
            .authorize(self.http_client.post(self.url("predict/")))
            .json(&request)
            .send()
            .await
            .map_err(|e| PredictorError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let err = Self::upstream_error(response).await;
            tracing::warn!("Prediction failed for model {}: {}", model_id, err);
            return Err(err);
        }

        let body: PredictResponse = response
            .json()
            .await
            .map_err(|e| PredictorError::Parse(e.to_string()))?;

        let result = PredictionResult {
            prediction: body.prediction,
            probability: body.probability,
        };
        if !result.is_well_formed() {
            return Err(PredictorError::Parse(format!(
                "prediction out of range: {} / {}",
                body.prediction, body.probability
            )));
        }

        Ok(result)
    }

    async fn get_model(&self, model_id: &str) -> Result<ModelMetadata, PredictorError> {
        let response = self
            .authorize(self.http_client.get(self.url("models/list")))
            .send()
            .await
            .map_err(|e| PredictorError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::upstream_error(response).await);
        }

        let models: Vec<ModelEntry> = response
            .json()
            .await
            .map_err(|e| PredictorError::Parse(e.to_string()))?;

        models
            .into_iter()
            .find(|m| m.model_id == model_id)
            .ok_or_else(|| PredictorError::ModelNotFound(model_id.to_string()))?
            .into_metadata()
    }

    async fn submit_feedback(&self, feedback: &FeedbackPayload) -> Result<(), PredictorError> {
        let response = self
            .authorize(self.http_client.post(self.url("predict/feedback")))
            .json(feedback)
            .send()
            .await
            .map_err(|e| PredictorError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let err = Self::upstream_error(response).await;
            tracing::warn!("Feedback for {} rejected: {}", feedback.model_id, err);
            return Err(err);
        }

        tracing::info!(
            "Feedback recorded model={} actual_result={}",
            feedback.model_id,
            feedback.actual_result
        );
        Ok(())
    }
}

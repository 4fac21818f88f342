//! What-If Session
//!
//! Editable copy of a prediction's input. Recalculation is split into
//! `begin_recalculation` / `complete_recalculation` so the collaborator call
//! can run without holding the session. Only the latest issued request may
//! apply, and only while the input it was computed from is still current.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::fields::{self, FieldRange};
use crate::logic::types::{AttrValue, ModelMetadata, PredictionResult, StudentRecord};
use crate::predictor::{Predictor, PredictorError};

/// Simulated scenarios never reach prediction history
pub const SIMULATION_PERSIST: bool = false;

/// Rejected edits
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} must be numeric")]
    NotNumeric { field: String },
}

/// Issued by `begin_recalculation`, redeemed by `complete_recalculation`
#[derive(Debug, Clone)]
pub struct RecalcTicket {
    pub seq: u64,
    revision: u64,
    pub model_id: String,
    pub input: StudentRecord,
}

/// Result of redeeming a ticket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "prediction", rename_all = "snake_case")]
pub enum RecalcOutcome {
    /// Became the current prediction
    Applied(PredictionResult),
    /// A newer request or a newer input exists; result discarded
    Superseded,
}

/// Serializable view of a session
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub model_id: String,
    pub algorithm: String,
    pub baseline_input: StudentRecord,
    pub working_input: StudentRecord,
    pub baseline_prediction: PredictionResult,
    pub current_prediction: PredictionResult,
    /// Working input edited since the current prediction was computed
    pub stale: bool,
    pub adjustable_fields: Vec<FieldRange>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct WhatIfSession {
    id: Uuid,
    model_id: String,
    model: ModelMetadata,
    baseline_input: StudentRecord,
    working_input: StudentRecord,
    baseline_prediction: PredictionResult,
    current_prediction: PredictionResult,
    /// Bumped on every edit or reset
    input_revision: u64,
    /// Revision the current prediction belongs to
    prediction_revision: u64,
    /// Last issued request
    issued_seq: u64,
    created_at: DateTime<Utc>,
}

impl WhatIfSession {
    /// Start from a persisted prediction. The session owns copies of both.
    pub fn initialize(
        model_id: impl Into<String>,
        model: ModelMetadata,
        input: StudentRecord,
        prediction: PredictionResult,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            model_id: model_id.into(),
            model,
            working_input: input.clone(),
            baseline_input: input,
            baseline_prediction: prediction,
            current_prediction: prediction,
            input_revision: 0,
            prediction_revision: 0,
            issued_seq: 0,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn model(&self) -> &ModelMetadata {
        &self.model
    }

    pub fn baseline_input(&self) -> &StudentRecord {
        &self.baseline_input
    }

    pub fn working_input(&self) -> &StudentRecord {
        &self.working_input
    }

    pub fn baseline_prediction(&self) -> PredictionResult {
        self.baseline_prediction
    }

    pub fn current_prediction(&self) -> PredictionResult {
        self.current_prediction
    }

    pub fn is_stale(&self) -> bool {
        self.prediction_revision != self.input_revision
    }

    /// Sliders available for this session's input
    pub fn adjustable_fields(&self) -> Vec<FieldRange> {
        fields::adjustable_fields(&self.baseline_input)
    }

    /// Edit the working input. Slider fields must stay within range and are
    /// stored as numbers; the current prediction is left as is (now stale).
    pub fn set_field(&mut self, name: &str, value: AttrValue) -> Result<(), SessionError> {
        let value = match fields::lookup(name) {
            Some(range) => AttrValue::Number(slider_value(range, name, &value)?),
            None => value,
        };

        self.working_input.insert(name, value);
        self.input_revision += 1;
        Ok(())
    }

    /// Back to the persisted input and prediction. In-flight requests are
    /// invalidated.
    pub fn reset(&mut self) {
        self.working_input = self.baseline_input.clone();
        self.current_prediction = self.baseline_prediction;
        self.input_revision += 1;
        self.prediction_revision = self.input_revision;
    }

    /// Snapshot the working input for a collaborator call
    pub fn begin_recalculation(&mut self) -> RecalcTicket {
        self.issued_seq += 1;
        tracing::debug!(
            "session {} issued recalculation #{} (revision {})",
            self.id,
            self.issued_seq,
            self.input_revision
        );
        RecalcTicket {
            seq: self.issued_seq,
            revision: self.input_revision,
            model_id: self.model_id.clone(),
            input: self.working_input.clone(),
        }
    }

    /// Apply a finished call unless it has been superseded
    pub fn complete_recalculation(&mut self, ticket: &RecalcTicket, result: PredictionResult) -> RecalcOutcome {
        if ticket.seq != self.issued_seq || ticket.revision != self.input_revision {
            tracing::debug!(
                "session {} discarded recalculation #{} (latest #{}, revision {} vs {})",
                self.id,
                ticket.seq,
                self.issued_seq,
                ticket.revision,
                self.input_revision
            );
            return RecalcOutcome::Superseded;
        }

        self.current_prediction = result;
        self.prediction_revision = ticket.revision;
        RecalcOutcome::Applied(result)
    }

    /// Single-owner recalculation: one attempt, never persisted. On failure
    /// the current prediction is kept and the error returned.
    pub async fn recalculate(&mut self, predictor: &dyn Predictor) -> Result<RecalcOutcome, PredictorError> {
        let ticket = self.begin_recalculation();
        let result = predictor
            .predict(&ticket.model_id, &ticket.input, SIMULATION_PERSIST)
            .await?;
        Ok(self.complete_recalculation(&ticket, result))
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.id,
            model_id: self.model_id.clone(),
            algorithm: self.model.algorithm.clone(),
            baseline_input: self.baseline_input.clone(),
            working_input: self.working_input.clone(),
            baseline_prediction: self.baseline_prediction,
            current_prediction: self.current_prediction,
            stale: self.is_stale(),
            adjustable_fields: self.adjustable_fields(),
            created_at: self.created_at,
        }
    }
}

/// Numeric value of a slider edit, range-checked
fn slider_value(range: &FieldRange, name: &str, value: &AttrValue) -> Result<f64, SessionError> {
    let n = value.as_number().ok_or_else(|| SessionError::NotNumeric {
        field: name.to_string(),
    })?;
    if !range.contains(n) {
        return Err(SessionError::OutOfRange {
            field: name.to_string(),
            value: n,
            min: range.min,
            max: range.max,
        });
    }
    Ok(n)
}

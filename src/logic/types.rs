//! Core Types
//!
//! Records, model metadata and prediction results shared by the ranker,
//! the recommendation rules, the what-if session and the report composer.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::ordered::OrderedMap;

// ============================================================================
// STUDENT RECORD
// ============================================================================

/// Single attribute value: numeric or categorical.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Number(f64),
    Text(String),
}

impl AttrValue {
    /// Numeric view. Numeric strings (form selects send `"3"`) count as numbers.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            AttrValue::Number(n) => *n,
            AttrValue::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        n.is_finite().then_some(n)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s.trim()),
            AttrValue::Number(_) => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Number(n) => write!(f, "{}", n),
            AttrValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Number(n)
    }
}

impl From<i32> for AttrValue {
    fn from(n: i32) -> Self {
        AttrValue::Number(f64::from(n))
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

/// Attribute name -> value, in submission order.
pub type StudentRecord = OrderedMap<AttrValue>;

/// Feature name -> signed weight, in registry order.
pub type FeatureImportance = OrderedMap<f64>;

// ============================================================================
// MODEL & PREDICTION
// ============================================================================

/// Registry entry of a trained model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub algorithm: String,
    #[serde(default)]
    pub feature_importance: FeatureImportance,
}

/// Outcome of one classification call
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// 1 = pass, 0 = fail
    pub prediction: u8,
    /// Probability of the predicted class (0.0 - 1.0)
    pub probability: f64,
}

impl PredictionResult {
    pub fn is_pass(&self) -> bool {
        self.prediction == 1
    }

    pub fn verdict_label(&self) -> &'static str {
        if self.is_pass() {
            "LIKELY TO PASS"
        } else {
            "AT RISK OF FAILURE"
        }
    }

    /// Probability as a percentage with one decimal, e.g. `"73.4"`
    pub fn confidence_percent(&self) -> String {
        format!("{:.1}", self.probability * 100.0)
    }

    pub fn is_well_formed(&self) -> bool {
        self.prediction <= 1 && (0.0..=1.0).contains(&self.probability)
    }
}

/// One ranked feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverEntry {
    pub name: String,
    /// |signed_weight|, never negative
    pub magnitude: f64,
    /// Positive pushes toward pass, negative toward fail
    pub signed_weight: f64,
}

//! Recommendation Engine
//!
//! Evaluates the rule table against a student record.
//! Input: StudentRecord
//! Output: ordered advisories, never empty

use super::rules::{Condition, Rule, FALLBACK_ADVISORY, RULES};
use crate::logic::types::{AttrValue, StudentRecord};

impl Condition {
    /// Three-valued evaluation: `None` means an attribute was missing or not
    /// comparable. `Any` is true if a known operand is true, `All` is false if
    /// a known operand is false.
    pub fn evaluate(&self, record: &StudentRecord) -> Option<bool> {
        match *self {
            Condition::Above { attribute, threshold } => {
                number(record, attribute).map(|v| v > threshold)
            }
            Condition::Below { attribute, threshold } => {
                number(record, attribute).map(|v| v < threshold)
            }
            Condition::Equals { attribute, value } => record
                .get(attribute)
                .and_then(AttrValue::as_text)
                .map(|v| v == value),
            Condition::Any { of } => {
                let mut unknown = false;
                for c in of {
                    match c.evaluate(record) {
                        Some(true) => return Some(true),
                        Some(false) => {}
                        None => unknown = true,
                    }
                }
                if unknown { None } else { Some(false) }
            }
            Condition::All { of } => {
                let mut unknown = false;
                for c in of {
                    match c.evaluate(record) {
                        Some(false) => return Some(false),
                        Some(true) => {}
                        None => unknown = true,
                    }
                }
                if unknown { None } else { Some(true) }
            }
        }
    }
}

fn number(record: &StudentRecord, attribute: &str) -> Option<f64> {
    record.get(attribute).and_then(AttrValue::as_number)
}

/// Rules whose condition definitely holds, in table order
pub fn fired_rules(record: &StudentRecord) -> Vec<&'static Rule> {
    RULES
        .iter()
        .filter(|rule| rule.condition.evaluate(record) == Some(true))
        .collect()
}

/// Ordered advisories for a record. Falls back to a single
/// positive-reinforcement message when nothing fires.
pub fn evaluate(record: &StudentRecord) -> Vec<String> {
    let mut advisories: Vec<String> = fired_rules(record)
        .into_iter()
        .map(|rule| rule.advisory.to_string())
        .collect();

    if advisories.is_empty() {
        advisories.push(FALLBACK_ADVISORY.to_string());
    }

    advisories
}

// ============================================================================
// TESTS
// ============================================================================

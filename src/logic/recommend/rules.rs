//! Recommendation Rule Table
//!
//! Data only: the ordered rule table and its advisories.
//! Evaluation lives in `engine.rs`.

// ============================================================================
// CONDITIONS
// ============================================================================

/// Predicate over a student record
#[derive(Debug, Clone, Copy)]
pub enum Condition {
    /// attribute > threshold
    Above { attribute: &'static str, threshold: f64 },
    /// attribute < threshold
    Below { attribute: &'static str, threshold: f64 },
    /// attribute == value (categorical)
    Equals { attribute: &'static str, value: &'static str },
    Any { of: &'static [Condition] },
    All { of: &'static [Condition] },
}

/// One row of the table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub condition: Condition,
    pub advisory: &'static str,
}

// ============================================================================
// TABLE (evaluation order = output order)
// ============================================================================

pub static RULES: &[Rule] = &[
    Rule {
        id: "past_failures",
        condition: Condition::Above { attribute: "failures", threshold: 0.0 },
        advisory: "High number of past failures detected. Consider remedial classes.",
    },
    Rule {
        id: "attendance",
        condition: Condition::Above { attribute: "absences", threshold: 10.0 },
        advisory: "Attendance is low. Regular attendance is strongly correlated with success.",
    },
    Rule {
        id: "study_time",
        condition: Condition::Below { attribute: "studytime", threshold: 3.0 },
        advisory: "Study time is low. Increasing weekly study time to >5 hours is recommended.",
    },
    Rule {
        id: "social_balance",
        condition: Condition::Above { attribute: "goout", threshold: 3.0 },
        advisory: "High frequency of going out may impact study time. Balance social life with academics.",
    },
    Rule {
        id: "alcohol",
        condition: Condition::Any {
            of: &[
                Condition::Above { attribute: "Dalc", threshold: 2.0 },
                Condition::Above { attribute: "Walc", threshold: 3.0 },
            ],
        },
        advisory: "Alcohol consumption levels may be affecting performance.",
    },
    Rule {
        id: "health",
        condition: Condition::Below { attribute: "health", threshold: 3.0 },
        advisory: "Health status reported as low. Ensure physical well-being is prioritized.",
    },
    Rule {
        id: "school_support",
        condition: Condition::All {
            of: &[
                Condition::Equals { attribute: "schoolsup", value: "no" },
                Condition::Any {
                    of: &[
                        Condition::Below { attribute: "G1", threshold: 10.0 },
                        Condition::Below { attribute: "G2", threshold: 10.0 },
                    ],
                },
            ],
        },
        advisory: "Consider seeking extra educational support from the school.",
    },
];

/// Emitted alone when no rule fires
pub const FALLBACK_ADVISORY: &str = "Keep up the good work! Maintain your current study habits.";

//! Adjustable what-if fields and their slider ranges

use serde::Serialize;

use crate::logic::types::StudentRecord;

/// Inclusive range of a numeric slider
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldRange {
    pub name: &'static str,
    pub min: f64,
    pub max: f64,
}

const fn range(name: &'static str, min: f64, max: f64) -> FieldRange {
    FieldRange { name, min, max }
}

/// Slider order as presented to the user. Ranges follow the input form.
pub static ADJUSTABLE_FIELDS: [FieldRange; 11] = [
    range("age", 15.0, 22.0),
    range("failures", 0.0, 4.0),
    range("absences", 0.0, 93.0),
    range("G1", 0.0, 20.0),
    range("G2", 0.0, 20.0),
    range("studytime", 1.0, 4.0),
    range("freetime", 1.0, 5.0),
    range("goout", 1.0, 5.0),
    range("Dalc", 1.0, 5.0),
    range("Walc", 1.0, 5.0),
    range("health", 1.0, 5.0),
];

pub fn lookup(name: &str) -> Option<&'static FieldRange> {
    ADJUSTABLE_FIELDS.iter().find(|f| f.name == name)
}

/// Sliders for the fields present in `record`
pub fn adjustable_fields(record: &StudentRecord) -> Vec<FieldRange> {
    ADJUSTABLE_FIELDS
        .iter()
        .filter(|f| record.contains_key(f.name))
        .copied()
        .collect()
}

impl FieldRange {
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

//! Student profile fields printed in the report
//!
//! Fixed field list and order; categorical codes are expanded to labels.
//! Fields whose attribute is missing are skipped.

use crate::logic::types::{AttrValue, StudentRecord};

struct ProfileField {
    label: &'static str,
    attribute: &'static str,
    render: fn(&AttrValue) -> String,
}

const PROFILE_FIELDS: [ProfileField; 10] = [
    ProfileField { label: "School", attribute: "school", render: school },
    ProfileField { label: "Age", attribute: "age", render: plain },
    ProfileField { label: "Sex", attribute: "sex", render: sex },
    ProfileField { label: "Address", attribute: "address", render: address },
    ProfileField { label: "Study Time", attribute: "studytime", render: study_time },
    ProfileField { label: "Failures", attribute: "failures", render: plain },
    ProfileField { label: "Absences", attribute: "absences", render: plain },
    ProfileField { label: "Health", attribute: "health", render: out_of_five },
    ProfileField { label: "Go Out", attribute: "goout", render: out_of_five },
    ProfileField { label: "Alcohol (Workday)", attribute: "Dalc", render: out_of_five },
];

/// `(label, rendered value)` pairs in print order
pub fn profile_rows(record: &StudentRecord) -> Vec<(&'static str, String)> {
    PROFILE_FIELDS
        .iter()
        .filter_map(|f| record.get(f.attribute).map(|v| (f.label, (f.render)(v))))
        .collect()
}

fn plain(v: &AttrValue) -> String {
    v.to_string()
}

fn expand(v: &AttrValue, codes: &[(&str, &str)]) -> String {
    v.as_text()
        .and_then(|code| codes.iter().find(|(c, _)| *c == code))
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| v.to_string())
}

fn school(v: &AttrValue) -> String {
    expand(v, &[("GP", "Gabriel Pereira"), ("MS", "Mousinho da Silveira")])
}

fn sex(v: &AttrValue) -> String {
    expand(v, &[("F", "Female"), ("M", "Male")])
}

fn address(v: &AttrValue) -> String {
    expand(v, &[("U", "Urban"), ("R", "Rural")])
}

/// studytime is a 1-4 band; each step is roughly 2.5 weekly hours
fn study_time(v: &AttrValue) -> String {
    match v.as_number() {
        Some(n) => format!("{} (< {} hrs)", v, n.trunc() * 2.5),
        None => v.to_string(),
    }
}

fn out_of_five(v: &AttrValue) -> String {
    format!("{}/5", v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_expand_to_labels() {
        let record: StudentRecord = [
            ("school", AttrValue::from("GP")),
            ("sex", "F".into()),
            ("address", "U".into()),
            ("studytime", "2".into()),
            ("health", 4.into()),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            profile_rows(&record),
            vec![
                ("School", "Gabriel Pereira".to_string()),
                ("Sex", "Female".to_string()),
                ("Address", "Urban".to_string()),
                ("Study Time", "2 (< 5 hrs)".to_string()),
                ("Health", "4/5".to_string()),
            ]
        );
    }

    #[test]
    fn test_field_order_is_fixed() {
        // Submission order does not matter
        let record: StudentRecord = [("Dalc", AttrValue::from(2)), ("age", 18.into()), ("school", "MS".into())]
            .into_iter()
            .collect();
        let labels: Vec<&str> = profile_rows(&record).into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["School", "Age", "Alcohol (Workday)"]);
    }

    #[test]
    fn test_unknown_code_prints_raw() {
        let record: StudentRecord = [("address", AttrValue::from("X"))].into_iter().collect();
        assert_eq!(profile_rows(&record), vec![("Address", "X".to_string())]);
    }
}

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatusCategory {
    Pending,
    Resolved,
    Cancelled,
    Other,
}

/// Evaluated top to bottom; the first rule with a matching keyword wins.
pub const STATUS_RULES: &[(StatusCategory, &[&str])] = &[
    (StatusCategory::Pending, &["activ", "pend"]),
    (StatusCategory::Resolved, &["termin", "cerr"]),
    (StatusCategory::Cancelled, &["cancel", "arch"]),
];

pub fn classify(status: &str) -> StatusCategory {
    classify_with(STATUS_RULES, status)
}

pub fn classify_with(rules: &[(StatusCategory, &[&str])], status: &str) -> StatusCategory {
    let status = status.to_lowercase();
    rules
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| status.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(StatusCategory::Other)
}

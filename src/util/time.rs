use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y"];

/// Parse the date formats the judicial APIs are known to emit. Offsets are
/// folded into UTC.
pub fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Short display form such as "15 Mar 2024", or "No date".
pub fn format_date(date: Option<&NaiveDateTime>) -> String {
    match date {
        Some(d) => d.format("%-d %b %Y").to_string(),
        None => "No date".to_string(),
    }
}

pub fn relative_time(dt: &DateTime<Utc>) -> String {
    relative_time_from(dt, Utc::now())
}

/// How long before `now` the timestamp was, in the coarsest useful unit.
pub fn relative_time_from(dt: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(dt);
    let seconds = elapsed.num_seconds();

    if seconds < 60 {
        return "just now".to_string();
    }

    let units = [
        (elapsed.num_days() / 365, "y"),
        (elapsed.num_days() / 30, "mo"),
        (elapsed.num_days(), "d"),
        (elapsed.num_hours(), "h"),
        (elapsed.num_minutes(), "m"),
    ];

    units
        .iter()
        .find(|(n, _)| *n > 0)
        .map(|(n, unit)| format!("{n}{unit} ago"))
        .unwrap_or_else(|| "just now".to_string())
}

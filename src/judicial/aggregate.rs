use std::cmp::Reverse;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::warn;

use super::models::{CaseRecord, Decision, Hearing, RawEnvelope, SectionPage, SectionResult};
use super::normalize::{SectionRecord, normalize};
use super::paginate::Pagination;

static YEAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

/// Descending sort key for a record within its section.
pub trait Ranked {
    fn rank(&self) -> i64;
}

impl Ranked for Decision {
    fn rank(&self) -> i64 {
        self.date.map_or(0, |d| d.and_utc().timestamp_millis())
    }
}

impl Ranked for CaseRecord {
    fn rank(&self) -> i64 {
        extract_year(&self.nuc).into()
    }
}

impl Ranked for Hearing {
    fn rank(&self) -> i64 {
        self.date.map_or(0, |d| d.and_utc().timestamp_millis())
    }
}

/// First run of four digits in an identifier, or 0.
pub fn extract_year(identifier: &str) -> u32 {
    YEAR_RE
        .find(identifier)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub decisions: SectionResult<Decision>,
    pub cases: SectionResult<CaseRecord>,
    pub hearings: SectionResult<Hearing>,
    pub has_any_data: bool,
}

pub fn aggregate(envelope: &RawEnvelope) -> Aggregate {
    let decisions = build_section::<Decision>(envelope.decisiones.as_ref());
    let cases = build_section::<CaseRecord>(envelope.casos.as_ref());
    let hearings = build_section::<Hearing>(envelope.audiencias.as_ref());
    let has_any_data = any_data(&decisions, &cases, &hearings);

    Aggregate {
        decisions,
        cases,
        hearings,
        has_any_data,
    }
}

pub fn any_data(
    decisions: &SectionResult<Decision>,
    cases: &SectionResult<CaseRecord>,
    hearings: &SectionResult<Hearing>,
) -> bool {
    decisions.effective_count() + cases.effective_count() + hearings.effective_count() > 0
}

/// Normalizes, sorts and paginates one section in isolation.
pub fn build_section<R: SectionRecord + Ranked>(raw: Option<&Value>) -> SectionResult<R> {
    let mut records = match normalize::<R>(raw) {
        Ok(records) => records,
        Err(failure) => {
            warn!(section = R::KIND.label(), error = %failure, "Section failed");
            return SectionResult::Failed {
                message: failure.message,
            };
        }
    };

    if records.is_empty() {
        return SectionResult::Empty;
    }

    records.sort_by_key(|r| Reverse(r.rank()));

    // normalize() only succeeds on a present payload
    let pagination = raw.map_or_else(
        || Pagination::new(1, 1, records.len() as u64),
        |payload| Pagination::from_payload(payload, records.len() as u64),
    );

    SectionResult::Ok(SectionPage {
        records,
        pagination,
    })
}

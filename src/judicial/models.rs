use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::paginate::Pagination;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SectionKind {
    Decisions,
    Cases,
    Hearings,
}

impl SectionKind {
    pub const ALL: [SectionKind; 3] = [
        SectionKind::Decisions,
        SectionKind::Cases,
        SectionKind::Hearings,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SectionKind::Decisions => "Decisions",
            SectionKind::Cases => "Cases",
            SectionKind::Hearings => "Hearings",
        }
    }

    /// Key of this section in the response envelope.
    pub fn wire_key(&self) -> &'static str {
        match self {
            SectionKind::Decisions => "decisiones",
            SectionKind::Cases => "casos",
            SectionKind::Hearings => "audiencias",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SectionKind::Decisions => SectionKind::Cases,
            SectionKind::Cases => SectionKind::Hearings,
            SectionKind::Hearings => SectionKind::Decisions,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            SectionKind::Decisions => SectionKind::Hearings,
            SectionKind::Cases => SectionKind::Decisions,
            SectionKind::Hearings => SectionKind::Cases,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Decision {
    pub number: String,
    pub date: Option<NaiveDateTime>,
    pub subject: Option<String>,
    pub court: String,
    pub matter: Option<String>,
    pub document_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseRecord {
    pub nuc: String,
    pub case_type: String,
    pub matter: Option<String>,
    pub court: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hearing {
    pub date: Option<NaiveDateTime>,
    pub date_label: Option<String>,
    pub time: Option<String>,
    pub hearing_type: String,
    pub court: String,
    pub chamber: Option<String>,
    pub room: Option<String>,
    pub modality: Option<String>,
    pub status: String,
    pub subject: Option<String>,
    pub hearing_url: Option<String>,
    pub session_url: Option<String>,
}

impl Hearing {
    /// Link to follow for this hearing, preferring the hearing page over
    /// the live session.
    pub fn link(&self) -> Option<&str> {
        self.hearing_url
            .as_deref()
            .or(self.session_url.as_deref())
    }
}

/// One page of a section that returned records.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionPage<T> {
    pub records: Vec<T>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionResult<T> {
    Ok(SectionPage<T>),
    Empty,
    Failed { message: String },
}

impl<T> SectionResult<T> {
    /// Count shown for the section: the resolved total for a populated
    /// section, zero otherwise.
    pub fn effective_count(&self) -> u64 {
        match self {
            SectionResult::Ok(page) => page.pagination.total_count,
            SectionResult::Empty | SectionResult::Failed { .. } => 0,
        }
    }

    pub fn records(&self) -> &[T] {
        match self {
            SectionResult::Ok(page) => &page.records,
            SectionResult::Empty | SectionResult::Failed { .. } => &[],
        }
    }

    pub fn pagination(&self) -> Option<&Pagination> {
        match self {
            SectionResult::Ok(page) => Some(&page.pagination),
            SectionResult::Empty | SectionResult::Failed { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SectionResult::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, SectionResult::Empty)
    }
}

/// The single JSON document returned per search. Sections stay opaque
/// until the aggregator normalizes them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEnvelope {
    #[serde(default, alias = "Success", skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, alias = "Nuc", skip_serializing_if = "Option::is_none")]
    pub nuc: Option<String>,
    #[serde(default, alias = "Decisiones")]
    pub decisiones: Option<Value>,
    #[serde(default, alias = "Casos")]
    pub casos: Option<Value>,
    #[serde(default, alias = "Audiencias")]
    pub audiencias: Option<Value>,
    #[serde(default, alias = "Debug", skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
    #[serde(default, alias = "Error", skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl RawEnvelope {
    pub fn section(&self, kind: SectionKind) -> Option<&Value> {
        match kind {
            SectionKind::Decisions => self.decisiones.as_ref(),
            SectionKind::Cases => self.casos.as_ref(),
            SectionKind::Hearings => self.audiencias.as_ref(),
        }
    }
}

/// Upstream HTTP status per section, as reported by the envelope's debug
/// block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DebugTrace {
    pub decisions: Option<i64>,
    pub cases: Option<i64>,
    pub hearings: Option<i64>,
}

impl DebugTrace {
    pub fn status(&self, kind: SectionKind) -> Option<i64> {
        match kind {
            SectionKind::Decisions => self.decisions,
            SectionKind::Cases => self.cases,
            SectionKind::Hearings => self.hearings,
        }
    }

    pub fn summary(&self) -> String {
        SectionKind::ALL
            .iter()
            .map(|kind| {
                let status = self
                    .status(*kind)
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "?".to_string());
                format!("{}:{}", kind.wire_key(), status)
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

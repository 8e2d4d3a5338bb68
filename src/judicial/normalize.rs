//! Turns loosely-shaped upstream payloads into canonical records.
//!
//! Every canonical field is backed by an ordered alias table. The first
//! alias present with a non-null value wins; otherwise the field takes its
//! documented default. Nothing downstream of this module looks at raw
//! field names.

use chrono::NaiveDateTime;
use serde_json::{Map, Value};
use tracing::debug;

use super::error::SectionFailure;
use super::models::{CaseRecord, DebugTrace, Decision, Hearing, SectionKind};
use crate::util::time::parse_date;

pub const INVALID_RESPONSE: &str = "The API did not return a valid response.";
pub const NOT_AVAILABLE: &str = "N/A";

const ERROR_KEYS: &[&str] = &["error", "Error"];

/// A canonical record type that can be built from one raw JSON object.
pub trait SectionRecord: Sized {
    const KIND: SectionKind;
    /// Keys that may hold the record collection, tried in order.
    const CONTAINER_KEYS: &'static [&'static str];

    fn from_fields(fields: &Fields<'_>) -> Self;
}

/// Alias-aware read access to one raw JSON object.
#[derive(Debug, Clone, Copy)]
pub struct Fields<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    pub fn resolve(&self, aliases: &[&str]) -> Option<&'a Value> {
        aliases
            .iter()
            .filter_map(|key| self.map.get(*key))
            .find(|value| !value.is_null())
    }

    pub fn text(&self, aliases: &[&str]) -> Option<String> {
        self.resolve(aliases).map(value_to_text)
    }

    pub fn text_or(&self, aliases: &[&str], default: &str) -> String {
        self.text(aliases).unwrap_or_else(|| default.to_string())
    }

    pub fn date(&self, aliases: &[&str]) -> Option<NaiveDateTime> {
        self.resolve(aliases)
            .and_then(|v| v.as_str())
            .and_then(parse_date)
    }

    pub fn count(&self, aliases: &[&str]) -> Option<u64> {
        self.resolve(aliases).and_then(value_to_u64)
    }

    pub fn integer(&self, aliases: &[&str]) -> Option<i64> {
        self.resolve(aliases).and_then(|v| match v {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        })
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn value_to_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Explicit error carried by a payload, if any. Falsy markers such as
/// `false`, `""` or `0` do not count as errors.
pub fn error_message(payload: &Value) -> Option<String> {
    let map = payload.as_object()?;
    Fields::new(map).resolve(ERROR_KEYS).and_then(error_text)
}

/// Message for a bare error value, `None` when the value is falsy.
pub fn error_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(false) => None,
        Value::Bool(true) => Some(INVALID_RESPONSE.to_string()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// The record collection of a payload: the payload itself when it is an
/// array, else the first container key holding an array, else nothing.
pub fn locate_records<'a>(payload: &'a Value, container_keys: &[&str]) -> &'a [Value] {
    match payload {
        Value::Array(items) => items,
        Value::Object(map) => container_keys
            .iter()
            .filter_map(|key| map.get(*key))
            .find_map(|value| value.as_array())
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

pub fn normalize<R: SectionRecord>(raw: Option<&Value>) -> Result<Vec<R>, SectionFailure> {
    let payload = match raw {
        None | Some(Value::Null) => return Err(SectionFailure::new(INVALID_RESPONSE)),
        Some(payload) => payload,
    };

    if let Some(message) = error_message(payload) {
        return Err(SectionFailure::new(message));
    }

    if !payload.is_array() && !payload.is_object() {
        return Err(SectionFailure::new(INVALID_RESPONSE));
    }

    let records: Vec<R> = locate_records(payload, R::CONTAINER_KEYS)
        .iter()
        .filter_map(Value::as_object)
        .map(|map| R::from_fields(&Fields::new(map)))
        .collect();

    debug!(
        section = R::KIND.label(),
        count = records.len(),
        "Normalized section payload"
    );
    Ok(records)
}

mod decision {
    pub const NUMBER: &[&str] = &["numeroDecision", "NumeroDecision"];
    pub const DATE: &[&str] = &["fechaDecision", "FechaDecision"];
    pub const SUBJECT: &[&str] = &["asunto", "Asunto"];
    pub const COURT: &[&str] = &["tribunal", "Tribunal"];
    pub const MATTER: &[&str] = &["materia", "Materia"];
    pub const DOCUMENT_URL: &[&str] = &["urlDocumentoFirmado", "UrlDocumentoFirmado"];
}

impl SectionRecord for Decision {
    const KIND: SectionKind = SectionKind::Decisions;
    const CONTAINER_KEYS: &'static [&'static str] = &["datos", "Datos", "data", "Data"];

    fn from_fields(f: &Fields<'_>) -> Self {
        Decision {
            number: f.text_or(decision::NUMBER, NOT_AVAILABLE),
            date: f.date(decision::DATE),
            subject: f.text(decision::SUBJECT),
            court: f.text_or(decision::COURT, NOT_AVAILABLE),
            matter: f.text(decision::MATTER),
            document_url: f.text(decision::DOCUMENT_URL),
        }
    }
}

mod case {
    pub const NUC: &[&str] = &["nuc", "Nuc", "numeroExpediente", "NumeroExpediente"];
    pub const TYPE: &[&str] = &["tipo", "Tipo", "tipoCaso", "TipoCaso"];
    pub const MATTER: &[&str] = &["materia", "Materia"];
    pub const COURT: &[&str] = &["tribunal", "Tribunal", "juzgado", "Juzgado"];
    pub const STATUS: &[&str] = &["estado", "Estado", "estatus", "Estatus"];
}

impl SectionRecord for CaseRecord {
    const KIND: SectionKind = SectionKind::Cases;
    const CONTAINER_KEYS: &'static [&'static str] = &["datos", "Datos", "data", "Data"];

    fn from_fields(f: &Fields<'_>) -> Self {
        CaseRecord {
            nuc: f.text_or(case::NUC, NOT_AVAILABLE),
            case_type: f.text_or(case::TYPE, NOT_AVAILABLE),
            matter: f.text(case::MATTER),
            court: f.text_or(case::COURT, NOT_AVAILABLE),
            status: f.text_or(case::STATUS, NOT_AVAILABLE),
        }
    }
}

mod hearing {
    pub const DATE: &[&str] = &["fechaAudiencia", "FechaAudiencia"];
    pub const DATE_LABEL: &[&str] = &["fechaAudienciaLetra", "FechaAudienciaLetra"];
    pub const TIME: &[&str] = &["horaAudiencia", "HoraAudiencia"];
    pub const TYPE: &[&str] = &["tipoAudiencia", "TipoAudiencia"];
    pub const COURT: &[&str] = &["tribunal", "Tribunal"];
    pub const CHAMBER: &[&str] = &["sala", "Sala"];
    pub const ROOM: &[&str] = &["salon", "Salon"];
    pub const MODALITY: &[&str] = &["modalidad", "Modalidad"];
    pub const STATUS: &[&str] = &["estado", "Estado", "tipoResultado", "TipoResultado"];
    pub const SUBJECT: &[&str] = &["asunto", "Asunto"];
    pub const HEARING_URL: &[&str] = &["urlAudiencia", "UrlAudiencia"];
    pub const SESSION_URL: &[&str] = &["urlCelebracion", "UrlCelebracion"];
}

impl SectionRecord for Hearing {
    const KIND: SectionKind = SectionKind::Hearings;
    const CONTAINER_KEYS: &'static [&'static str] = &["data", "Data", "datos", "Datos"];

    fn from_fields(f: &Fields<'_>) -> Self {
        Hearing {
            date: f.date(hearing::DATE),
            date_label: f.text(hearing::DATE_LABEL),
            time: f.text(hearing::TIME),
            hearing_type: f.text_or(hearing::TYPE, NOT_AVAILABLE),
            court: f.text_or(hearing::COURT, NOT_AVAILABLE),
            chamber: f.text(hearing::CHAMBER),
            room: f.text(hearing::ROOM),
            modality: f.text(hearing::MODALITY),
            status: f.text_or(hearing::STATUS, NOT_AVAILABLE),
            subject: f.text(hearing::SUBJECT),
            hearing_url: f.text(hearing::HEARING_URL),
            session_url: f.text(hearing::SESSION_URL),
        }
    }
}

mod debug_block {
    pub const DECISIONS: &[&str] = &["decisiones_status", "DecisionesStatus", "decisionesStatus"];
    pub const CASES: &[&str] = &["casos_status", "CasosStatus", "casosStatus"];
    pub const HEARINGS: &[&str] = &["audiencias_status", "AudienciasStatus", "audienciasStatus"];
}

pub fn debug_trace(debug: Option<&Value>) -> DebugTrace {
    let Some(map) = debug.and_then(Value::as_object) else {
        return DebugTrace::default();
    };
    let f = Fields::new(map);
    DebugTrace {
        decisions: f.integer(debug_block::DECISIONS),
        cases: f.integer(debug_block::CASES),
        hearings: f.integer(debug_block::HEARINGS),
    }
}

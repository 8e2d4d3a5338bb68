use chrono::NaiveDate;
use serde_json::json;

use lexdash::judicial::normalize::{INVALID_RESPONSE, debug_trace, error_message, normalize};
use lexdash::judicial::{CaseRecord, Decision, Hearing};

#[test]
fn test_decision_lower_camel_fields() {
    let raw = json!({
        "datos": [{
            "numeroDecision": "SCJ-2024-0012",
            "fechaDecision": "2024-03-15T00:00:00",
            "asunto": "Recurso de casación",
            "tribunal": "Suprema Corte de Justicia",
            "materia": "Civil",
            "urlDocumentoFirmado": "https://example.test/doc.pdf"
        }]
    });

    let decisions = normalize::<Decision>(Some(&raw)).unwrap();
    assert_eq!(decisions.len(), 1);
    let d = &decisions[0];
    assert_eq!(d.number, "SCJ-2024-0012");
    assert_eq!(
        d.date,
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap().and_hms_opt(0, 0, 0)
    );
    assert_eq!(d.subject.as_deref(), Some("Recurso de casación"));
    assert_eq!(d.court, "Suprema Corte de Justicia");
    assert_eq!(d.matter.as_deref(), Some("Civil"));
    assert_eq!(d.document_url.as_deref(), Some("https://example.test/doc.pdf"));
}

#[test]
fn test_decision_upper_camel_fields() {
    let raw = json!({
        "Datos": [{
            "NumeroDecision": "001-2023",
            "FechaDecision": "2023-01-02",
            "Tribunal": "Corte de Apelación"
        }]
    });

    let decisions = normalize::<Decision>(Some(&raw)).unwrap();
    assert_eq!(decisions[0].number, "001-2023");
    assert_eq!(decisions[0].court, "Corte de Apelación");
    assert!(decisions[0].date.is_some());
}

#[test]
fn test_missing_fields_take_defaults() {
    let raw = json!([{}]);

    let decisions = normalize::<Decision>(Some(&raw)).unwrap();
    let d = &decisions[0];
    assert_eq!(d.number, "N/A");
    assert_eq!(d.court, "N/A");
    assert!(d.date.is_none());
    assert!(d.subject.is_none());
    assert!(d.document_url.is_none());
}

#[test]
fn test_null_alias_falls_through_to_next() {
    let raw = json!([{ "nuc": null, "Nuc": "2024-0001234" }]);

    let cases = normalize::<CaseRecord>(Some(&raw)).unwrap();
    assert_eq!(cases[0].nuc, "2024-0001234");
}

#[test]
fn test_case_secondary_aliases() {
    let raw = json!({
        "data": [{
            "NumeroExpediente": "EXP-2019-55",
            "TipoCaso": "Penal",
            "Juzgado": "Primer Juzgado",
            "Estatus": "Archivado"
        }]
    });

    let cases = normalize::<CaseRecord>(Some(&raw)).unwrap();
    let c = &cases[0];
    assert_eq!(c.nuc, "EXP-2019-55");
    assert_eq!(c.case_type, "Penal");
    assert_eq!(c.court, "Primer Juzgado");
    assert_eq!(c.status, "Archivado");
    assert!(c.matter.is_none());
}

#[test]
fn test_numeric_identifier_rendered_as_text() {
    let raw = json!([{ "nuc": 20240001234u64 }]);

    let cases = normalize::<CaseRecord>(Some(&raw)).unwrap();
    assert_eq!(cases[0].nuc, "20240001234");
}

#[test]
fn test_hearing_prefers_data_container() {
    let raw = json!({
        "data": [{ "tipoAudiencia": "Preliminar" }],
        "datos": [{ "tipoAudiencia": "Fondo" }, { "tipoAudiencia": "Fondo" }]
    });

    let hearings = normalize::<Hearing>(Some(&raw)).unwrap();
    assert_eq!(hearings.len(), 1);
    assert_eq!(hearings[0].hearing_type, "Preliminar");
}

#[test]
fn test_hearing_fields_and_status_fallback() {
    let raw = json!([{
        "fechaAudiencia": "2024-06-01T09:30:00Z",
        "fechaAudienciaLetra": "sábado, 1 de junio de 2024",
        "horaAudiencia": "09:30 AM",
        "tipoAudiencia": "Conocimiento",
        "tribunal": "Tribunal Colegiado",
        "sala": "Sala 2",
        "salon": "Salón B",
        "modalidad": "Virtual",
        "tipoResultado": "Aplazada",
        "urlCelebracion": "https://example.test/live"
    }]);

    let hearings = normalize::<Hearing>(Some(&raw)).unwrap();
    let h = &hearings[0];
    assert_eq!(h.status, "Aplazada");
    assert_eq!(h.chamber.as_deref(), Some("Sala 2"));
    assert_eq!(h.room.as_deref(), Some("Salón B"));
    assert_eq!(h.modality.as_deref(), Some("Virtual"));
    assert_eq!(h.time.as_deref(), Some("09:30 AM"));
    assert!(h.hearing_url.is_none());
    assert_eq!(h.link(), Some("https://example.test/live"));
    assert!(h.date.is_some());
}

#[test]
fn test_absent_collection_is_empty_not_error() {
    let raw = json!({ "totalRegistros": 0 });

    let decisions = normalize::<Decision>(Some(&raw)).unwrap();
    assert!(decisions.is_empty());
}

#[test]
fn test_non_array_container_is_skipped() {
    let raw = json!({ "datos": "nothing here", "data": [{ "nuc": "X-2020" }] });

    let cases = normalize::<CaseRecord>(Some(&raw)).unwrap();
    assert_eq!(cases.len(), 1);
}

#[test]
fn test_non_object_entries_are_skipped() {
    let raw = json!([1, "two", { "nuc": "2021-1" }, null]);

    let cases = normalize::<CaseRecord>(Some(&raw)).unwrap();
    assert_eq!(cases.len(), 1);
    assert_eq!(cases[0].nuc, "2021-1");
}

#[test]
fn test_explicit_error_short_circuits() {
    let raw = json!({ "error": "Status 500", "datos": [{ "nuc": "2020-1" }] });

    let err = normalize::<CaseRecord>(Some(&raw)).unwrap_err();
    assert_eq!(err.message, "Status 500");
}

#[test]
fn test_upper_camel_error_field() {
    let raw = json!({ "Error": "Servicio no disponible" });

    let err = normalize::<Hearing>(Some(&raw)).unwrap_err();
    assert_eq!(err.message, "Servicio no disponible");
}

#[test]
fn test_falsy_error_field_is_ignored() {
    let raw = json!({ "error": null, "datos": [] });
    assert!(normalize::<Decision>(Some(&raw)).unwrap().is_empty());

    let raw = json!({ "error": "", "datos": [] });
    assert!(normalize::<Decision>(Some(&raw)).unwrap().is_empty());

    let raw = json!({ "error": false, "datos": [] });
    assert!(normalize::<Decision>(Some(&raw)).unwrap().is_empty());
}

#[test]
fn test_missing_or_null_payload_is_invalid_response() {
    let err = normalize::<Decision>(None).unwrap_err();
    assert_eq!(err.message, INVALID_RESPONSE);

    let err = normalize::<Decision>(Some(&serde_json::Value::Null)).unwrap_err();
    assert_eq!(err.message, INVALID_RESPONSE);
}

#[test]
fn test_scalar_payload_is_invalid_response() {
    let raw = json!("<html>maintenance</html>");

    let err = normalize::<Hearing>(Some(&raw)).unwrap_err();
    assert_eq!(err.message, INVALID_RESPONSE);
}

#[test]
fn test_error_message_on_non_object() {
    assert_eq!(error_message(&json!([])), None);
    assert_eq!(
        error_message(&json!({ "error": { "code": 7 } })),
        Some(r#"{"code":7}"#.to_string())
    );
}

#[test]
fn test_debug_trace_aliases() {
    let trace = debug_trace(Some(&json!({
        "decisiones_status": 200,
        "CasosStatus": "404",
        "audiencias_status": null
    })));
    assert_eq!(trace.decisions, Some(200));
    assert_eq!(trace.cases, Some(404));
    assert_eq!(trace.hearings, None);
}

#[test]
fn test_debug_trace_absent() {
    let trace = debug_trace(None);
    assert_eq!(trace.summary(), "decisiones:? | casos:? | audiencias:?");
}

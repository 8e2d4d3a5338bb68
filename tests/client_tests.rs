use serde_json::json;

use lexdash::judicial::aggregate;
use lexdash::judicial::client::{
    UpstreamResponse, compose_envelope, read_envelope, upstream_response,
};
use lexdash::judicial::normalize::debug_trace;
use lexdash::judicial::{JudicialClient, SearchError, SectionResult};
use lexdash::util::config::{ApiConfig, ApiMode};

fn ok(data: serde_json::Value) -> UpstreamResponse {
    UpstreamResponse {
        status: 200,
        data: Some(data),
        error: None,
    }
}

#[test]
fn test_compose_envelope_all_ok() {
    let env = compose_envelope(
        "2024-0001234",
        ok(json!({ "datos": [{ "numeroDecision": "1" }] })),
        ok(json!({ "datos": [] })),
        ok(json!({ "data": [{ "tipoAudiencia": "Fondo" }] })),
    );

    assert_eq!(env.success, Some(true));
    assert_eq!(env.nuc.as_deref(), Some("2024-0001234"));
    let trace = debug_trace(env.debug.as_ref());
    assert_eq!(trace.summary(), "decisiones:200 | casos:200 | audiencias:200");

    let agg = aggregate(&env);
    assert_eq!(agg.decisions.records().len(), 1);
    assert!(agg.cases.is_empty());
    assert_eq!(agg.hearings.records().len(), 1);
}

#[test]
fn test_compose_envelope_failed_upstream_becomes_section_error() {
    let env = compose_envelope(
        "2024-1",
        ok(json!({ "datos": [] })),
        UpstreamResponse {
            status: 404,
            data: Some(json!({ "message": "not found" })),
            error: None,
        },
        UpstreamResponse {
            status: 500,
            data: None,
            error: Some("connection refused".to_string()),
        },
    );

    assert_eq!(env.casos, Some(json!({ "error": "Status 404", "datos": [] })));
    assert_eq!(
        env.audiencias,
        Some(json!({ "error": "connection refused", "datos": [] }))
    );

    let agg = aggregate(&env);
    assert_eq!(agg.cases.error(), Some("Status 404"));
    assert_eq!(agg.hearings.error(), Some("connection refused"));
    assert!(agg.decisions.is_empty());
    assert_eq!(debug_trace(env.debug.as_ref()).cases, Some(404));
}

#[test]
fn test_compose_envelope_ok_without_body_is_invalid() {
    let env = compose_envelope(
        "2024-1",
        UpstreamResponse {
            status: 200,
            data: None,
            error: None,
        },
        ok(json!([])),
        ok(json!([])),
    );

    assert!(matches!(agg_decisions(&env), SectionResult::Failed { .. }));
}

fn agg_decisions(
    env: &lexdash::judicial::RawEnvelope,
) -> SectionResult<lexdash::judicial::Decision> {
    aggregate(env).decisions
}

#[test]
fn test_client_from_config_selects_mode() {
    let api = ApiConfig::default();
    assert!(matches!(
        JudicialClient::from_config(&api, false).unwrap(),
        JudicialClient::Backend(_)
    ));
    assert!(matches!(
        JudicialClient::from_config(&api, true).unwrap(),
        JudicialClient::Direct(_)
    ));

    let direct = ApiConfig {
        mode: ApiMode::Direct,
        ..ApiConfig::default()
    };
    assert!(matches!(
        JudicialClient::from_config(&direct, false).unwrap(),
        JudicialClient::Direct(_)
    ));
}

#[test]
fn test_client_rejects_non_http_urls() {
    let api = ApiConfig {
        search_url: "ftp://example.test/buscar".to_string(),
        ..ApiConfig::default()
    };
    assert!(JudicialClient::from_config(&api, false).is_err());

    let api = ApiConfig {
        cases_url: "file:///etc/passwd".to_string(),
        ..ApiConfig::default()
    };
    assert!(JudicialClient::from_config(&api, true).is_err());
}

#[test]
fn test_backend_error_status_uses_body_error() {
    let err = read_envelope(500, r#"{"success": false, "error": "Error al consultar las APIs"}"#)
        .unwrap_err();
    assert_eq!(
        err,
        SearchError::Server {
            status: 500,
            message: "Error al consultar las APIs".to_string(),
        }
    );
}

#[test]
fn test_backend_error_status_without_json_body() {
    let err = read_envelope(502, "<html>Bad Gateway</html>").unwrap_err();
    assert_eq!(
        err,
        SearchError::Server {
            status: 502,
            message: "Server error".to_string(),
        }
    );
}

#[test]
fn test_backend_success_body() {
    let env = read_envelope(200, r#"{"success": true, "casos": {"datos": []}}"#).unwrap();
    assert_eq!(env.success, Some(true));
    assert_eq!(env.casos, Some(json!({ "datos": [] })));

    let err = read_envelope(200, "not json").unwrap_err();
    assert!(matches!(err, SearchError::Transport(_)));
}

#[test]
fn test_upstream_unparseable_body() {
    let upstream = upstream_response(200, Ok("<html>maintenance</html>".to_string()));
    assert_eq!(
        upstream.data,
        Some(json!({
            "error": "Could not parse the response as JSON",
            "content": "<html>maintenance</html>"
        }))
    );
}

#[test]
fn test_upstream_unreadable_body_becomes_section_error() {
    let upstream = upstream_response(200, Err("connection reset".to_string()));
    assert_eq!(
        upstream.error.as_deref(),
        Some("Could not read the response: connection reset")
    );

    let env = compose_envelope("2024-1", upstream, ok(json!([])), ok(json!([])));
    let agg = aggregate(&env);
    assert_eq!(
        agg.decisions.error(),
        Some("Could not read the response: connection reset")
    );
    assert_eq!(debug_trace(env.debug.as_ref()).decisions, Some(200));
}

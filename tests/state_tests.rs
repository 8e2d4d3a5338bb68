use serde_json::{Value, json};

use lexdash::app::actions::{Action, SideEffect};
use lexdash::app::state::{AppState, ViewMode};
use lexdash::app::update::update;
use lexdash::judicial::{RawEnvelope, SearchError, SearchTicket, SectionKind};

fn make_state() -> AppState {
    AppState::new(15, false)
}

fn envelope(v: Value) -> RawEnvelope {
    serde_json::from_value(v).unwrap()
}

fn populated() -> RawEnvelope {
    envelope(json!({
        "decisiones": {
            "datos": [
                { "numeroDecision": "D-2", "fechaDecision": "2024-02-01", "urlDocumentoFirmado": "https://example.test/d2.pdf" },
                { "numeroDecision": "D-1", "fechaDecision": "2023-02-01" }
            ],
            "paginaActual": 1, "totalPaginas": 3, "totalRegistros": 40
        },
        "casos": { "datos": [{ "nuc": "2024-0001234", "estado": "Activo" }] },
        "audiencias": { "data": [{ "tipoAudiencia": "Fondo", "urlCelebracion": "https://example.test/live" }] },
        "debug": { "decisiones_status": 200, "casos_status": 200, "audiencias_status": 200 }
    }))
}

fn type_query(state: &mut AppState, query: &str) {
    for ch in query.chars() {
        update(state, Action::QueryInput(ch));
    }
}

fn take_ticket(effects: Vec<SideEffect>) -> SearchTicket {
    match effects.into_iter().next() {
        Some(SideEffect::RunSearch(ticket)) => ticket,
        other => panic!("expected RunSearch, got {:?}", other),
    }
}

fn search(state: &mut AppState, query: &str, outcome: Result<RawEnvelope, SearchError>) {
    state.query_input.clear();
    state.editing = true;
    type_query(state, query);
    let ticket = take_ticket(update(state, Action::Submit));
    update(state, Action::SearchCompleted { ticket, outcome });
}

#[test]
fn test_initial_state() {
    let state = make_state();
    assert!(state.editing);
    assert!(!state.loading);
    assert_eq!(state.active_tab, SectionKind::Decisions);
    assert_eq!(state.view_mode(), ViewMode::Idle);
}

#[test]
fn test_typing_and_backspace() {
    let mut state = make_state();
    type_query(&mut state, "2024-1x");
    update(&mut state, Action::QueryBackspace);
    assert_eq!(state.query_input, "2024-1");

    update(&mut state, Action::CancelEdit);
    update(&mut state, Action::QueryInput('z'));
    assert_eq!(state.query_input, "2024-1");
}

#[test]
fn test_submit_blank_shows_error_without_request() {
    let mut state = make_state();
    type_query(&mut state, "   ");

    let effects = update(&mut state, Action::Submit);

    assert!(effects.is_empty());
    assert!(!state.loading);
    assert_eq!(
        state.view_mode(),
        ViewMode::Error("Please enter a NUC to search.".to_string())
    );
}

#[test]
fn test_submit_starts_loading() {
    let mut state = make_state();
    type_query(&mut state, "2024-0001234");

    let ticket = take_ticket(update(&mut state, Action::Submit));

    assert!(state.loading);
    assert!(!state.editing);
    assert_eq!(ticket.request().nuc, "2024-0001234");
    assert_eq!(ticket.request().pagina, 1);
    assert_eq!(state.view_mode(), ViewMode::Loading);
}

#[test]
fn test_completed_search_shows_results() {
    let mut state = make_state();
    search(&mut state, "2024-0001234", Ok(populated()));

    assert!(!state.loading);
    assert_eq!(state.view_mode(), ViewMode::Results);
    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.count(SectionKind::Decisions), 40);
    assert!(state.debug_log.iter().any(|l| l.contains("decisiones:200")));
}

#[test]
fn test_empty_search_shows_no_results() {
    let mut state = make_state();
    let empty = envelope(json!({
        "decisiones": { "datos": [] },
        "casos": { "datos": [] },
        "audiencias": { "data": [] }
    }));

    search(&mut state, "2024-0000000", Ok(empty));

    assert_eq!(state.view_mode(), ViewMode::NoResults);
}

#[test]
fn test_failed_search_shows_banner_and_keeps_snapshot() {
    let mut state = make_state();
    search(&mut state, "2024-0001234", Ok(populated()));
    let before = state.snapshot().cloned().unwrap();

    search(
        &mut state,
        "2024-0009999",
        Err(SearchError::Server {
            status: 500,
            message: "Server error".to_string(),
        }),
    );

    assert!(matches!(state.view_mode(), ViewMode::Error(_)));
    assert!(!state.loading);
    assert_eq!(state.snapshot().unwrap().query, before.query);

    update(&mut state, Action::DismissError);
    assert_eq!(state.view_mode(), ViewMode::Results);
}

#[test]
fn test_stale_completion_is_ignored() {
    let mut state = make_state();
    type_query(&mut state, "A-2020");
    let first = take_ticket(update(&mut state, Action::Submit));
    state.query_input = "B-2021".to_string();
    let second = take_ticket(update(&mut state, Action::Submit));

    update(
        &mut state,
        Action::SearchCompleted {
            ticket: first,
            outcome: Ok(populated()),
        },
    );
    assert!(state.loading);
    assert!(state.snapshot().is_none());

    update(
        &mut state,
        Action::SearchCompleted {
            ticket: second,
            outcome: Ok(populated()),
        },
    );
    assert!(!state.loading);
    assert_eq!(state.snapshot().unwrap().query, "B-2021");
    assert!(state.debug_log.iter().any(|l| l.contains("superseded")));
}

#[test]
fn test_next_page_requests_active_section() {
    let mut state = make_state();
    search(&mut state, "2024-0001234", Ok(populated()));

    let ticket = take_ticket(update(&mut state, Action::NextPage));
    assert_eq!(ticket.request().pagina, 2);

    // Already on page 1: nothing to go back to.
    assert!(update(&mut state, Action::PrevPage).is_empty());
}

#[test]
fn test_single_page_section_has_no_paging() {
    let mut state = make_state();
    search(&mut state, "2024-0001234", Ok(populated()));
    update(&mut state, Action::SelectTab(SectionKind::Cases));

    assert!(update(&mut state, Action::NextPage).is_empty());
    assert!(update(&mut state, Action::PrevPage).is_empty());
}

#[test]
fn test_cursor_bounds_and_tab_reset() {
    let mut state = make_state();
    search(&mut state, "2024-0001234", Ok(populated()));

    update(&mut state, Action::MoveDown);
    update(&mut state, Action::MoveDown);
    update(&mut state, Action::MoveDown);
    assert_eq!(state.cursor, 1);

    update(&mut state, Action::MoveUp);
    update(&mut state, Action::MoveUp);
    assert_eq!(state.cursor, 0);

    update(&mut state, Action::MoveDown);
    update(&mut state, Action::NextTab);
    assert_eq!(state.active_tab, SectionKind::Cases);
    assert_eq!(state.cursor, 0);

    update(&mut state, Action::PrevTab);
    update(&mut state, Action::PrevTab);
    assert_eq!(state.active_tab, SectionKind::Hearings);
}

#[test]
fn test_open_link_for_decision_and_hearing() {
    let mut state = make_state();
    search(&mut state, "2024-0001234", Ok(populated()));

    match update(&mut state, Action::OpenLink).as_slice() {
        [SideEffect::OpenUrl(url)] => assert_eq!(url, "https://example.test/d2.pdf"),
        other => panic!("unexpected effects: {:?}", other),
    }

    update(&mut state, Action::MoveDown);
    assert!(update(&mut state, Action::OpenLink).is_empty());

    update(&mut state, Action::SelectTab(SectionKind::Hearings));
    match update(&mut state, Action::OpenLink).as_slice() {
        [SideEffect::OpenUrl(url)] => assert_eq!(url, "https://example.test/live"),
        other => panic!("unexpected effects: {:?}", other),
    }

    update(&mut state, Action::SelectTab(SectionKind::Cases));
    assert!(update(&mut state, Action::OpenLink).is_empty());
}

#[test]
fn test_toggle_debug_and_quit() {
    let mut state = make_state();
    update(&mut state, Action::ToggleDebug);
    assert!(state.show_debug);
    update(&mut state, Action::Quit);
    assert!(state.should_quit);
}

#[test]
fn test_debug_log_is_capped() {
    let mut state = make_state();
    for i in 0..120 {
        state.log(format!("line {i}"));
    }
    assert_eq!(state.debug_log.len(), 50);
    assert_eq!(state.debug_log.last().unwrap(), "line 119");
}

#[test]
fn test_paging_ignored_while_new_search_loads() {
    let mut state = make_state();
    search(&mut state, "A-2020", Ok(populated()));

    state.query_input = "B-2021".to_string();
    let pending = take_ticket(update(&mut state, Action::Submit));

    assert!(update(&mut state, Action::NextPage).is_empty());
    assert!(state.error_message.is_none());

    update(
        &mut state,
        Action::SearchCompleted {
            ticket: pending,
            outcome: Ok(populated()),
        },
    );
    assert_eq!(state.snapshot().unwrap().query, "B-2021");

    // Paging works again once the new search has landed
    let ticket = take_ticket(update(&mut state, Action::NextPage));
    assert_eq!(ticket.request().nuc, "B-2021");
    assert_eq!(ticket.request().pagina, 2);
}

#[test]
fn test_can_step_back_from_empty_page() {
    let mut state = make_state();
    search(&mut state, "2024-0001234", Ok(populated()));

    let ticket = take_ticket(update(&mut state, Action::NextPage));
    let empty_page = envelope(json!({
        "decisiones": { "error": "Status 500" },
        "casos": { "datos": [] },
        "audiencias": { "data": [] }
    }));
    update(
        &mut state,
        Action::SearchCompleted {
            ticket,
            outcome: Ok(empty_page),
        },
    );

    let snapshot = state.snapshot().unwrap();
    assert!(snapshot.decisions.pagination().is_none());
    assert_eq!(snapshot.pages.decisions, 2);

    assert!(update(&mut state, Action::NextPage).is_empty());
    let back = take_ticket(update(&mut state, Action::PrevPage));
    assert_eq!(back.request().pagina, 1);
}

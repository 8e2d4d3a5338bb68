use std::sync::Arc;

use crate::judicial::{Pagination, SearchSession, SearchState, SectionKind};

const DEBUG_LOG_LINES: usize = 50;

/// What the body area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    /// Nothing searched yet.
    Idle,
    /// First search in flight, nothing to show yet.
    Loading,
    /// A search failed as a whole; no section is shown.
    Error(String),
    /// Every section came back empty or failed.
    NoResults,
    Results,
}

#[derive(Debug)]
pub struct AppState {
    pub session: SearchSession,

    // Query bar
    pub query_input: String,
    pub editing: bool,

    // Sections
    pub active_tab: SectionKind,
    pub cursor: usize,

    // UI flags
    pub loading: bool,
    pub error_message: Option<String>,
    pub show_debug: bool,
    pub debug_log: Vec<String>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(page_size: u32, show_debug: bool) -> Self {
        Self {
            session: SearchSession::new(page_size),
            query_input: String::new(),
            editing: true,
            active_tab: SectionKind::Decisions,
            cursor: 0,
            loading: false,
            error_message: None,
            show_debug,
            debug_log: Vec::new(),
            should_quit: false,
        }
    }

    pub fn snapshot(&self) -> Option<&Arc<SearchState>> {
        self.session.current()
    }

    pub fn view_mode(&self) -> ViewMode {
        if let Some(ref msg) = self.error_message {
            return ViewMode::Error(msg.clone());
        }
        match self.snapshot() {
            None if self.loading => ViewMode::Loading,
            None => ViewMode::Idle,
            Some(state) if state.has_any_data => ViewMode::Results,
            Some(_) => ViewMode::NoResults,
        }
    }

    pub fn active_pagination(&self) -> Option<Pagination> {
        self.snapshot().and_then(|s| s.pager(self.active_tab))
    }

    pub fn active_record_count(&self) -> usize {
        self.snapshot()
            .map(|s| s.record_count(self.active_tab))
            .unwrap_or(0)
    }

    /// Link behind the highlighted row: the signed document for a
    /// decision, the hearing page for a hearing.
    pub fn selected_link(&self) -> Option<String> {
        let state = self.snapshot()?;
        match self.active_tab {
            SectionKind::Decisions => state
                .decisions
                .records()
                .get(self.cursor)
                .and_then(|d| d.document_url.clone()),
            SectionKind::Hearings => state
                .hearings
                .records()
                .get(self.cursor)
                .and_then(|h| h.link().map(str::to_string)),
            SectionKind::Cases => None,
        }
    }

    pub fn log(&mut self, line: String) {
        self.debug_log.push(line);
        if self.debug_log.len() > DEBUG_LOG_LINES {
            let overflow = self.debug_log.len() - DEBUG_LOG_LINES;
            self.debug_log.drain(..overflow);
        }
    }
}

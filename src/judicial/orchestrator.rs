//! Search lifecycle: validation, request sequencing, stale-response
//! discarding and snapshot assembly.
//!
//! `SearchSession` owns no transport so the UI loop can run fetches on
//! background tasks and feed the outcomes back in. `SearchOrchestrator`
//! pairs a session with a transport for callers that just want to await a
//! search.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use super::aggregate::{aggregate, any_data};
use super::client::Transport;
use super::error::SearchError;
use super::models::{
    CaseRecord, DebugTrace, Decision, Hearing, RawEnvelope, SectionKind, SectionResult,
};
use super::normalize::{debug_trace, error_text};
use super::paginate::{DEFAULT_PAGE_SIZE, Pagination};

/// Body of one search call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub nuc: String,
    pub pagina: u32,
    pub registros: u32,
}

/// Page currently shown for each section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionPages {
    pub decisions: u32,
    pub cases: u32,
    pub hearings: u32,
}

impl Default for SectionPages {
    fn default() -> Self {
        Self {
            decisions: 1,
            cases: 1,
            hearings: 1,
        }
    }
}

impl SectionPages {
    pub fn get(&self, kind: SectionKind) -> u32 {
        match kind {
            SectionKind::Decisions => self.decisions,
            SectionKind::Cases => self.cases,
            SectionKind::Hearings => self.hearings,
        }
    }

    pub fn set(&mut self, kind: SectionKind, page: u32) {
        match kind {
            SectionKind::Decisions => self.decisions = page,
            SectionKind::Cases => self.cases = page,
            SectionKind::Hearings => self.hearings = page,
        }
    }
}

/// Immutable result of one applied search or page change.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub query: String,
    pub seq: u64,
    pub pages: SectionPages,
    pub decisions: SectionResult<Decision>,
    pub cases: SectionResult<CaseRecord>,
    pub hearings: SectionResult<Hearing>,
    pub has_any_data: bool,
    pub debug: DebugTrace,
    pub fetched_at: DateTime<Utc>,
}

impl SearchState {
    pub fn count(&self, kind: SectionKind) -> u64 {
        match kind {
            SectionKind::Decisions => self.decisions.effective_count(),
            SectionKind::Cases => self.cases.effective_count(),
            SectionKind::Hearings => self.hearings.effective_count(),
        }
    }

    pub fn pagination(&self, kind: SectionKind) -> Option<&Pagination> {
        match kind {
            SectionKind::Decisions => self.decisions.pagination(),
            SectionKind::Cases => self.cases.pagination(),
            SectionKind::Hearings => self.hearings.pagination(),
        }
    }

    pub fn error(&self, kind: SectionKind) -> Option<&str> {
        match kind {
            SectionKind::Decisions => self.decisions.error(),
            SectionKind::Cases => self.cases.error(),
            SectionKind::Hearings => self.hearings.error(),
        }
    }

    /// Pager for a section. A section left without records by a page
    /// change still gets a pager at its requested page so it can step
    /// back.
    pub fn pager(&self, kind: SectionKind) -> Option<Pagination> {
        if let Some(p) = self.pagination(kind) {
            return Some(*p);
        }
        let page = self.pages.get(kind);
        (page > 1).then(|| Pagination::new(page, page, 0))
    }

    pub fn record_count(&self, kind: SectionKind) -> usize {
        match kind {
            SectionKind::Decisions => self.decisions.records().len(),
            SectionKind::Cases => self.cases.records().len(),
            SectionKind::Hearings => self.hearings.records().len(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    /// New search; every section starts on page 1.
    Fresh,
    /// Page change for one section of the current search.
    Advance { section: SectionKind, page: u32 },
}

/// An issued request. Only the most recently issued ticket can be applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    target: PageTarget,
    request: SearchRequest,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn target(&self) -> PageTarget {
        self.target
    }

    pub fn request(&self) -> &SearchRequest {
        &self.request
    }
}

#[derive(Debug, Clone)]
pub enum Completion {
    Applied(Arc<SearchState>),
    Failed(SearchError),
    /// A newer request was issued after this one; nothing changed.
    Stale,
}

impl Completion {
    pub fn into_result(self) -> Result<Arc<SearchState>, SearchError> {
        match self {
            Completion::Applied(state) => Ok(state),
            Completion::Failed(e) => Err(e),
            Completion::Stale => Err(SearchError::Superseded),
        }
    }
}

#[derive(Debug)]
pub struct SearchSession {
    page_size: u32,
    latest_seq: u64,
    /// Sequence of a new search that has not completed yet.
    pending_search: Option<u64>,
    current: Option<Arc<SearchState>>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl SearchSession {
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            latest_seq: 0,
            pending_search: None,
            current: None,
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn current(&self) -> Option<&Arc<SearchState>> {
        self.current.as_ref()
    }

    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn is_latest(&self, ticket: &SearchTicket) -> bool {
        ticket.seq == self.latest_seq
    }

    /// Starts a new search. Rejects blank queries without consuming a
    /// sequence number.
    pub fn begin(&mut self, query: &str) -> Result<SearchTicket, SearchError> {
        let nuc = query.trim();
        if nuc.is_empty() {
            return Err(SearchError::empty_query());
        }
        let ticket = self.issue(nuc.to_string(), PageTarget::Fresh, 1);
        self.pending_search = Some(ticket.seq);
        Ok(ticket)
    }

    /// True while a new search has been issued but not completed.
    pub fn search_pending(&self) -> bool {
        self.pending_search.is_some()
    }

    /// Starts a page change for one section of the current search. Refused
    /// while a new search is loading, since the current snapshot belongs
    /// to the previous query.
    pub fn begin_page(
        &mut self,
        section: SectionKind,
        page: u32,
    ) -> Result<SearchTicket, SearchError> {
        let query = self
            .current
            .as_ref()
            .map(|state| state.query.clone())
            .ok_or(SearchError::NoActiveSearch)?;
        if let Some(seq) = self.pending_search {
            debug!(seq, "Page change refused while a search is loading");
            return Err(SearchError::SearchPending);
        }
        if page == 0 {
            return Err(SearchError::Validation(
                "Page numbers start at 1.".to_string(),
            ));
        }
        Ok(self.issue(query, PageTarget::Advance { section, page }, page))
    }

    fn issue(&mut self, nuc: String, target: PageTarget, pagina: u32) -> SearchTicket {
        self.latest_seq += 1;
        debug!(seq = self.latest_seq, nuc = %nuc, pagina, "Issued search ticket");
        SearchTicket {
            seq: self.latest_seq,
            target,
            request: SearchRequest {
                nuc,
                pagina,
                registros: self.page_size,
            },
        }
    }

    /// Applies the outcome of a ticket's transport call.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<RawEnvelope, SearchError>,
    ) -> Completion {
        if !self.is_latest(&ticket) {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "Discarding stale search response"
            );
            return Completion::Stale;
        }
        self.pending_search = None;

        let envelope = match outcome {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(seq = ticket.seq, error = %e, "Search failed");
                return Completion::Failed(e);
            }
        };

        if let Some(message) = envelope.error.as_ref().and_then(error_text) {
            warn!(seq = ticket.seq, error = %message, "Search rejected by server");
            return Completion::Failed(SearchError::Rejected(message));
        }

        let state = match self.assemble(&ticket, &envelope) {
            Ok(state) => Arc::new(state),
            Err(e) => return Completion::Failed(e),
        };

        info!(
            seq = state.seq,
            nuc = %state.query,
            decisions = state.decisions.effective_count(),
            cases = state.cases.effective_count(),
            hearings = state.hearings.effective_count(),
            "Search applied"
        );
        self.current = Some(Arc::clone(&state));
        Completion::Applied(state)
    }

    fn assemble(
        &self,
        ticket: &SearchTicket,
        envelope: &RawEnvelope,
    ) -> Result<SearchState, SearchError> {
        let fresh = aggregate(envelope);
        let debug = debug_trace(envelope.debug.as_ref());

        match ticket.target {
            PageTarget::Fresh => Ok(SearchState {
                query: ticket.request.nuc.clone(),
                seq: ticket.seq,
                pages: SectionPages::default(),
                decisions: fresh.decisions,
                cases: fresh.cases,
                hearings: fresh.hearings,
                has_any_data: fresh.has_any_data,
                debug,
                fetched_at: Utc::now(),
            }),
            PageTarget::Advance { section, page } => {
                // Only the advanced section is refreshed; the other two
                // keep what they showed before.
                let base = self.current.as_deref().ok_or(SearchError::NoActiveSearch)?;
                let mut next = base.clone();
                next.seq = ticket.seq;
                next.pages.set(section, page);
                match section {
                    SectionKind::Decisions => next.decisions = fresh.decisions,
                    SectionKind::Cases => next.cases = fresh.cases,
                    SectionKind::Hearings => next.hearings = fresh.hearings,
                }
                next.has_any_data = any_data(&next.decisions, &next.cases, &next.hearings);
                next.debug = debug;
                next.fetched_at = Utc::now();
                Ok(next)
            }
        }
    }
}

/// Runs searches end to end over a transport.
pub struct SearchOrchestrator<T> {
    transport: T,
    session: SearchSession,
}

impl<T: Transport> SearchOrchestrator<T> {
    pub fn new(transport: T, page_size: u32) -> Self {
        Self {
            transport,
            session: SearchSession::new(page_size),
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn state(&self) -> Option<Arc<SearchState>> {
        self.session.current().cloned()
    }

    pub async fn search(&mut self, query: &str) -> Result<Arc<SearchState>, SearchError> {
        let ticket = self.session.begin(query)?;
        self.run(ticket).await
    }

    pub async fn change_page(
        &mut self,
        section: SectionKind,
        page: u32,
    ) -> Result<Arc<SearchState>, SearchError> {
        let ticket = self.session.begin_page(section, page)?;
        self.run(ticket).await
    }

    async fn run(&mut self, ticket: SearchTicket) -> Result<Arc<SearchState>, SearchError> {
        info!(nuc = %ticket.request.nuc, pagina = ticket.request.pagina, "Searching");
        let outcome = self.transport.search(ticket.request()).await;
        self.session.complete(ticket, outcome).into_result()
    }
}

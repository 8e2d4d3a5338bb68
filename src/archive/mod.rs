pub mod store;

pub use store::{ArchiveEntry, ArchiveStore, ArchivedSearch};

use anyhow::{Context, Result};
use tracing::error;

use crate::judicial::{
    RawEnvelope, SearchError, SearchRequest, SearchSession, SearchState, Transport,
};

/// Rebuilds the snapshot an archived search produced, stamped with the
/// time it was originally fetched.
pub fn replay(archived: &ArchivedSearch, page_size: u32) -> Result<SearchState> {
    let envelope: RawEnvelope = serde_json::from_value(archived.response.clone())
        .context("Archived response is not a search envelope")?;

    let mut session = SearchSession::new(page_size);
    let ticket = session.begin(&archived.nuc)?;
    let applied = session.complete(ticket, Ok(envelope)).into_result()?;

    let mut state = (*applied).clone();
    state.fetched_at = archived.searched_at;
    Ok(state)
}

/// Wraps a transport and records every envelope it successfully fetches.
/// Archive failures are logged and never fail the search.
#[derive(Clone)]
pub struct ArchivingTransport<T> {
    inner: T,
    store: Option<ArchiveStore>,
}

impl<T> ArchivingTransport<T> {
    pub fn new(inner: T, store: Option<ArchiveStore>) -> Self {
        Self { inner, store }
    }
}

impl<T: Transport + Sync> Transport for ArchivingTransport<T> {
    async fn search(&self, request: &SearchRequest) -> Result<RawEnvelope, SearchError> {
        let envelope = self.inner.search(request).await?;
        if let Some(ref store) = self.store
            && let Err(e) = store.save(&request.nuc, &envelope)
        {
            error!(nuc = %request.nuc, error = %e, "Failed to archive search");
        }
        Ok(envelope)
    }
}

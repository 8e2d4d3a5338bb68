pub mod aggregate;
pub mod client;
pub mod error;
pub mod models;
pub mod normalize;
pub mod orchestrator;
pub mod paginate;
pub mod status;

pub use aggregate::{Aggregate, aggregate};
pub use client::{BackendClient, DirectClient, JudicialClient, Transport};
pub use error::{SearchError, SectionFailure};
pub use models::*;
pub use orchestrator::{
    Completion, PageTarget, SearchOrchestrator, SearchRequest, SearchSession, SearchState,
    SearchTicket, SectionPages,
};
pub use paginate::{DEFAULT_PAGE_SIZE, PageControls, Pagination};
pub use status::{StatusCategory, classify};

use thiserror::Error;

/// Failures that abort a whole search. Section-level problems never show
/// up here; they are folded into `SectionResult::Failed`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("{0}")]
    Validation(String),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
    #[error("{0}")]
    Rejected(String),
    #[error("no search to paginate; submit a NUC first")]
    NoActiveSearch,
    #[error("a new search is still loading")]
    SearchPending,
    #[error("search was superseded by a newer request")]
    Superseded,
}

impl SearchError {
    pub fn empty_query() -> Self {
        SearchError::Validation("Please enter a NUC to search.".to_string())
    }
}

/// A problem confined to one section's payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct SectionFailure {
    pub message: String,
}

impl SectionFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for SearchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            SearchError::Transport("the server took too long to respond".to_string())
        } else {
            SearchError::Transport(e.to_string())
        }
    }
}

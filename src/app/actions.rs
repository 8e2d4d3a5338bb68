use crate::judicial::{RawEnvelope, SearchError, SearchTicket, SectionKind};

#[derive(Debug)]
pub enum Action {
    MoveUp,
    MoveDown,
    NextTab,
    PrevTab,
    SelectTab(SectionKind),
    NextPage,
    PrevPage,
    EditQuery,
    CancelEdit,
    QueryInput(char),
    QueryBackspace,
    Submit,
    OpenLink,
    ToggleDebug,
    SearchCompleted {
        ticket: SearchTicket,
        outcome: Result<RawEnvelope, SearchError>,
    },
    DismissError,
    Quit,
    Tick,
}

#[derive(Debug)]
pub enum SideEffect {
    RunSearch(SearchTicket),
    OpenUrl(String),
}

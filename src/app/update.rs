use crate::app::actions::{Action, SideEffect};
use crate::app::state::AppState;
use crate::judicial::{Completion, SearchError, SearchTicket};

pub fn update(state: &mut AppState, action: Action) -> Vec<SideEffect> {
    match action {
        Action::Quit => {
            state.should_quit = true;
            vec![]
        }
        Action::MoveUp => {
            if state.cursor > 0 {
                state.cursor -= 1;
            }
            vec![]
        }
        Action::MoveDown => {
            let max = state.active_record_count().saturating_sub(1);
            if state.cursor < max {
                state.cursor += 1;
            }
            vec![]
        }
        Action::NextTab => {
            state.active_tab = state.active_tab.next();
            state.cursor = 0;
            vec![]
        }
        Action::PrevTab => {
            state.active_tab = state.active_tab.previous();
            state.cursor = 0;
            vec![]
        }
        Action::SelectTab(kind) => {
            if state.active_tab != kind {
                state.active_tab = kind;
                state.cursor = 0;
            }
            vec![]
        }
        Action::NextPage => {
            let target = state.active_pagination().and_then(|p| p.next_page());
            change_page(state, target)
        }
        Action::PrevPage => {
            let target = state.active_pagination().and_then(|p| p.previous_page());
            change_page(state, target)
        }
        Action::EditQuery => {
            state.editing = true;
            vec![]
        }
        Action::CancelEdit => {
            state.editing = false;
            vec![]
        }
        Action::QueryInput(ch) => {
            if state.editing {
                state.query_input.push(ch);
            }
            vec![]
        }
        Action::QueryBackspace => {
            if state.editing {
                state.query_input.pop();
            }
            vec![]
        }
        Action::Submit => {
            state.editing = false;
            let result = state.session.begin(&state.query_input);
            dispatch(state, result)
        }
        Action::OpenLink => match state.selected_link() {
            Some(url) => vec![SideEffect::OpenUrl(url)],
            None => vec![],
        },
        Action::ToggleDebug => {
            state.show_debug = !state.show_debug;
            vec![]
        }
        Action::SearchCompleted { ticket, outcome } => {
            let seq = ticket.seq();
            match state.session.complete(ticket, outcome) {
                Completion::Applied(snapshot) => {
                    state.loading = false;
                    state.error_message = None;
                    state.cursor = 0;
                    state.log(format!("#{} {}", seq, snapshot.debug.summary()));
                }
                Completion::Failed(e) => {
                    state.loading = false;
                    state.log(format!("#{} error: {}", seq, e));
                    state.error_message = Some(e.to_string());
                }
                Completion::Stale => {
                    state.log(format!("#{} discarded (superseded)", seq));
                }
            }
            vec![]
        }
        Action::DismissError => {
            state.error_message = None;
            vec![]
        }
        Action::Tick => vec![],
    }
}

fn change_page(state: &mut AppState, target: Option<u32>) -> Vec<SideEffect> {
    let Some(page) = target else {
        return vec![];
    };
    match state.session.begin_page(state.active_tab, page) {
        // The snapshot on screen belongs to the previous query
        Err(SearchError::SearchPending) => {
            state.log(format!("page {} ignored: search still loading", page));
            vec![]
        }
        result => dispatch(state, result),
    }
}

fn dispatch(state: &mut AppState, ticket: Result<SearchTicket, SearchError>) -> Vec<SideEffect> {
    match ticket {
        Ok(ticket) => {
            state.loading = true;
            state.error_message = None;
            let request = ticket.request();
            state.log(format!(
                "#{} NUC {} (page {})",
                ticket.seq(),
                request.nuc,
                request.pagina
            ));
            vec![SideEffect::RunSearch(ticket)]
        }
        Err(e) => {
            state.error_message = Some(e.to_string());
            vec![]
        }
    }
}

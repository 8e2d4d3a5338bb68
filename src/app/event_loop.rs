use std::io;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::app::actions::{Action, SideEffect};
use crate::app::state::AppState;
use crate::app::update::update;
use crate::app::view;
use crate::judicial::{SectionKind, Transport};
use crate::util::config::AppConfig;

pub async fn run<T>(config: AppConfig, transport: T, initial_query: Option<String>) -> Result<()>
where
    T: Transport + Clone + Send + Sync + 'static,
{
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Restore the terminal even if we panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_loop(&mut terminal, config, transport, initial_query).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    result
}

async fn run_loop<T>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: AppConfig,
    transport: T,
    initial_query: Option<String>,
) -> Result<()>
where
    T: Transport + Clone + Send + Sync + 'static,
{
    let mut state = AppState::new(config.search.page_size, config.ui.show_debug);
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    if let Some(query) = initial_query {
        state.query_input = query;
        for effect in update(&mut state, Action::Submit) {
            spawn_side_effect(effect, &transport, &action_tx);
        }
    }

    let mut event_stream = crossterm::event::EventStream::new();

    // Keeps the "fetched N ago" label current
    let mut tick = tokio::time::interval(tokio::time::Duration::from_secs(30));
    tick.tick().await;

    loop {
        terminal.draw(|f| view::render(f, &state))?;

        if state.should_quit {
            break;
        }

        let action = tokio::select! {
            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(event)) => map_event_to_action(&event, &state),
                    _ => None,
                }
            }
            Some(action) = action_rx.recv() => Some(action),
            _ = tick.tick() => Some(Action::Tick),
        };

        if let Some(action) = action {
            for effect in update(&mut state, action) {
                spawn_side_effect(effect, &transport, &action_tx);
            }
        }
    }

    Ok(())
}

fn map_event_to_action(event: &Event, state: &AppState) -> Option<Action> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: event::KeyEventKind::Press,
        ..
    }) = event
    else {
        return None;
    };

    if let KeyCode::Char('c') = code
        && modifiers.contains(KeyModifiers::CONTROL)
    {
        return Some(Action::Quit);
    }

    // Error banner swallows everything but dismissal
    if state.error_message.is_some() {
        return match code {
            KeyCode::Esc | KeyCode::Enter => Some(Action::DismissError),
            _ => None,
        };
    }

    if state.editing {
        return match code {
            KeyCode::Esc => Some(Action::CancelEdit),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Backspace => Some(Action::QueryBackspace),
            KeyCode::Char(c) => Some(Action::QueryInput(*c)),
            _ => None,
        };
    }

    match code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('/') | KeyCode::Char('e') => Some(Action::EditQuery),
        KeyCode::Tab => Some(Action::NextTab),
        KeyCode::BackTab => Some(Action::PrevTab),
        KeyCode::Char('1') => Some(Action::SelectTab(SectionKind::Decisions)),
        KeyCode::Char('2') => Some(Action::SelectTab(SectionKind::Cases)),
        KeyCode::Char('3') => Some(Action::SelectTab(SectionKind::Hearings)),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveDown),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveUp),
        KeyCode::Char(']') | KeyCode::Char('n') | KeyCode::Right => Some(Action::NextPage),
        KeyCode::Char('[') | KeyCode::Char('p') | KeyCode::Left => Some(Action::PrevPage),
        KeyCode::Char('o') | KeyCode::Enter => Some(Action::OpenLink),
        KeyCode::Char('d') => Some(Action::ToggleDebug),
        _ => None,
    }
}

fn spawn_side_effect<T>(effect: SideEffect, transport: &T, action_tx: &mpsc::UnboundedSender<Action>)
where
    T: Transport + Clone + Send + Sync + 'static,
{
    match effect {
        SideEffect::RunSearch(ticket) => {
            let transport = transport.clone();
            let tx = action_tx.clone();

            tokio::spawn(async move {
                debug!(seq = ticket.seq(), nuc = %ticket.request().nuc, "Fetching envelope");
                let outcome = transport.search(ticket.request()).await;
                if let Err(ref e) = outcome {
                    error!(seq = ticket.seq(), error = %e, "Search request failed");
                }
                let _ = tx.send(Action::SearchCompleted { ticket, outcome });
            });
        }
        SideEffect::OpenUrl(url) => {
            tokio::task::spawn_blocking(move || {
                if let Err(e) = crate::util::browser::open_url(&url) {
                    error!(error = %e, "Failed to open link");
                }
            });
        }
    }
}

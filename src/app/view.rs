use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::app::state::AppState;
use crate::ui::widgets;

pub fn render(f: &mut Frame, state: &AppState) {
    let debug_height = if state.show_debug { 8 } else { 0 };

    // Query bar, section tabs, body, debug log, status bar
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(debug_height),
            Constraint::Length(1),
        ])
        .split(f.area());

    widgets::render_query_bar(f, vertical[0], state);
    widgets::render_tabs(f, vertical[1], state);
    widgets::render_body(f, vertical[2], state);
    if state.show_debug {
        widgets::render_debug_panel(f, vertical[3], state);
    }
    widgets::render_status_bar(f, vertical[4], state);
}

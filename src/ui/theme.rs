use ratatui::style::{Color, Modifier, Style};

use crate::judicial::StatusCategory;

pub const HIGHLIGHT: Style = Style::new()
    .fg(Color::Black)
    .bg(Color::Cyan)
    .add_modifier(Modifier::BOLD);

pub const HEADER: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

pub const DIM: Style = Style::new().fg(Color::DarkGray);

pub const ERROR: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

pub const BORDER_FOCUSED: Style = Style::new().fg(Color::Cyan);

pub const BORDER_UNFOCUSED: Style = Style::new().fg(Color::DarkGray);

pub const STATUS_BAR: Style = Style::new().fg(Color::White).bg(Color::DarkGray);

pub const TAB_ACTIVE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

pub const IDENTIFIER: Style = Style::new().fg(Color::Cyan);

pub const COURT: Style = Style::new().fg(Color::Yellow);

pub const PAGER_ENABLED: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

pub const PAGER_DISABLED: Style = Style::new().fg(Color::DarkGray);

pub fn status_badge(category: StatusCategory) -> Style {
    match category {
        StatusCategory::Pending => Style::new().fg(Color::Yellow),
        StatusCategory::Resolved => Style::new().fg(Color::Green),
        StatusCategory::Cancelled => Style::new().fg(Color::DarkGray),
        StatusCategory::Other => Style::new().fg(Color::Blue),
    }
}

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Tabs, Wrap},
};

use crate::app::state::{AppState, ViewMode};
use crate::judicial::{
    CaseRecord, Decision, Hearing, Pagination, SearchState, SectionKind, SectionResult, classify,
};
use crate::ui::theme;
use crate::util::time::{format_date, relative_time};

pub fn render_query_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let border_style = if state.editing {
        theme::BORDER_FOCUSED
    } else {
        theme::BORDER_UNFOCUSED
    };

    let block = Block::default()
        .title(" NUC ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let text = if state.query_input.is_empty() && !state.editing {
        Span::styled("Press / to search a NUC", theme::DIM)
    } else if state.editing {
        Span::styled(format!("{}_", state.query_input), theme::HEADER)
    } else {
        Span::raw(state.query_input.as_str())
    };

    f.render_widget(Paragraph::new(Line::from(text)).block(block), area);
}

pub fn render_tabs(f: &mut Frame, area: Rect, state: &AppState) {
    let titles: Vec<Line> = SectionKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let count = state
                .snapshot()
                .map(|s| format!(" ({})", s.count(*kind)))
                .unwrap_or_default();
            Line::from(format!("{} {}{}", i + 1, kind.label(), count))
        })
        .collect();

    let selected = SectionKind::ALL
        .iter()
        .position(|k| *k == state.active_tab)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(theme::DIM)
        .highlight_style(theme::TAB_ACTIVE)
        .divider("|");

    f.render_widget(tabs, area);
}

pub fn render_body(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(if state.editing {
            theme::BORDER_UNFOCUSED
        } else {
            theme::BORDER_FOCUSED
        });

    match state.view_mode() {
        ViewMode::Idle => {
            let para = Paragraph::new("Enter a NUC to see its decisions, cases and hearings.")
                .style(theme::DIM)
                .block(block);
            f.render_widget(para, area);
        }
        ViewMode::Loading => {
            let para = Paragraph::new("Searching...").style(theme::DIM).block(block);
            f.render_widget(para, area);
        }
        ViewMode::Error(msg) => render_error_banner(f, area, &msg),
        ViewMode::NoResults => {
            let query = state
                .snapshot()
                .map(|s| s.query.as_str())
                .unwrap_or_default();
            let lines = vec![
                Line::from(Span::styled("No results", theme::HEADER)),
                Line::from(""),
                Line::from(Span::styled(
                    format!("Nothing was found for NUC {}.", query),
                    theme::DIM,
                )),
                Line::from(Span::styled(
                    "0 decisions · 0 cases · 0 hearings",
                    theme::DIM,
                )),
            ];
            f.render_widget(Paragraph::new(lines).block(block), area);
        }
        ViewMode::Results => {
            if let Some(snapshot) = state.snapshot() {
                render_section(f, area, state, snapshot, block);
            }
        }
    }
}

fn render_section(f: &mut Frame, area: Rect, state: &AppState, snapshot: &SearchState, block: Block) {
    let kind = state.active_tab;
    let title = format!(" {} · {} ", kind.label(), snapshot.query);
    let block = block.title(title);

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);
    let pager = snapshot.pager(kind);

    if let Some(message) = snapshot.error(kind) {
        let lines = vec![
            Line::from(Span::styled(
                format!("{} could not be loaded", kind.label()),
                theme::ERROR,
            )),
            Line::from(""),
            Line::from(message.to_string()),
        ];
        f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), chunks[0]);
        render_pager(f, chunks[1], pager.as_ref(), 0);
        return;
    }

    let highlight = !state.editing;
    match kind {
        SectionKind::Decisions => {
            render_decisions(f, chunks[0], &snapshot.decisions, state.cursor, highlight)
        }
        SectionKind::Cases => render_cases(f, chunks[0], &snapshot.cases, state.cursor, highlight),
        SectionKind::Hearings => {
            render_hearings(f, chunks[0], &snapshot.hearings, state.cursor, highlight)
        }
    }

    render_pager(f, chunks[1], pager.as_ref(), snapshot.count(kind));
}

fn row_style(i: usize, cursor: usize, highlight: bool) -> Option<Style> {
    (highlight && i == cursor).then_some(theme::HIGHLIGHT)
}

fn styled(text: impl Into<String>, base: Style, row: Option<Style>) -> Cell<'static> {
    Cell::from(text.into()).style(row.unwrap_or(base))
}

fn header(titles: &[&'static str]) -> Row<'static> {
    Row::new(
        titles
            .iter()
            .map(|t| Cell::from(*t).style(theme::HEADER))
            .collect::<Vec<_>>(),
    )
    .height(1)
}

fn empty_message(f: &mut Frame, area: Rect, kind: SectionKind) {
    let msg = format!("No {} found for this NUC.", kind.label().to_lowercase());
    f.render_widget(Paragraph::new(msg).style(theme::DIM), area);
}

fn render_decisions(
    f: &mut Frame,
    area: Rect,
    section: &SectionResult<Decision>,
    cursor: usize,
    highlight: bool,
) {
    if section.records().is_empty() {
        empty_message(f, area, SectionKind::Decisions);
        return;
    }

    let rows: Vec<Row> = section
        .records()
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let row = row_style(i, cursor, highlight);
            let court = match d.matter {
                Some(ref matter) => format!("{} [{}]", d.court, matter),
                None => d.court.clone(),
            };
            Row::new(vec![
                styled(d.number.clone(), theme::IDENTIFIER, row),
                styled(format_date(d.date.as_ref()), theme::DIM, row),
                styled(
                    d.subject
                        .clone()
                        .unwrap_or_else(|| "No subject given".to_string()),
                    Style::default(),
                    row,
                ),
                styled(court, theme::COURT, row),
                styled(
                    if d.document_url.is_some() { "PDF" } else { "-" },
                    theme::DIM,
                    row,
                ),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(18),
        Constraint::Length(12),
        Constraint::Min(20),
        Constraint::Length(36),
        Constraint::Length(4),
    ];

    let table = Table::new(rows, widths).header(header(&["Number", "Date", "Subject", "Court", "Doc"]));
    f.render_widget(table, area);
}

fn render_cases(
    f: &mut Frame,
    area: Rect,
    section: &SectionResult<CaseRecord>,
    cursor: usize,
    highlight: bool,
) {
    if section.records().is_empty() {
        empty_message(f, area, SectionKind::Cases);
        return;
    }

    let rows: Vec<Row> = section
        .records()
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let row = row_style(i, cursor, highlight);
            Row::new(vec![
                styled(c.nuc.clone(), theme::IDENTIFIER, row),
                styled(c.case_type.clone(), Style::default(), row),
                styled(
                    c.matter.clone().unwrap_or_else(|| "-".to_string()),
                    theme::DIM,
                    row,
                ),
                styled(c.court.clone(), theme::COURT, row),
                styled(c.status.clone(), theme::status_badge(classify(&c.status)), row),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(24),
        Constraint::Length(20),
        Constraint::Length(16),
        Constraint::Min(20),
        Constraint::Length(14),
    ];

    let table =
        Table::new(rows, widths).header(header(&["NUC", "Type", "Matter", "Court", "Status"]));
    f.render_widget(table, area);
}

fn render_hearings(
    f: &mut Frame,
    area: Rect,
    section: &SectionResult<Hearing>,
    cursor: usize,
    highlight: bool,
) {
    if section.records().is_empty() {
        empty_message(f, area, SectionKind::Hearings);
        return;
    }

    let rows: Vec<Row> = section
        .records()
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let row = row_style(i, cursor, highlight);
            let when = h
                .date_label
                .clone()
                .unwrap_or_else(|| format_date(h.date.as_ref()));
            let place = [h.chamber.as_deref(), h.room.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(", ");
            let kind = match h.modality {
                Some(ref modality) => format!("{} ({})", h.hearing_type, modality),
                None => h.hearing_type.clone(),
            };
            Row::new(vec![
                styled(when, Style::default(), row),
                styled(h.time.clone().unwrap_or_default(), theme::DIM, row),
                styled(kind, Style::default(), row),
                styled(h.court.clone(), theme::COURT, row),
                styled(place, theme::DIM, row),
                styled(h.status.clone(), theme::status_badge(classify(&h.status)), row),
                styled(if h.link().is_some() { "Link" } else { "-" }, theme::DIM, row),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(22),
        Constraint::Length(8),
        Constraint::Length(24),
        Constraint::Min(20),
        Constraint::Length(18),
        Constraint::Length(14),
        Constraint::Length(5),
    ];

    let table = Table::new(rows, widths).header(header(&[
        "Date", "Time", "Type", "Court", "Room", "Status", "Link",
    ]));
    f.render_widget(table, area);
}

/// Record count, plus page arrows when there is more than one page.
pub fn render_pager(f: &mut Frame, area: Rect, pagination: Option<&Pagination>, count: u64) {
    let records = format!("{} record{}", count, if count == 1 { "" } else { "s" });

    let mut spans = Vec::new();
    if let Some(p) = pagination
        && let Some(controls) = p.controls()
    {
        let arrow = |enabled: bool| {
            if enabled {
                theme::PAGER_ENABLED
            } else {
                theme::PAGER_DISABLED
            }
        };
        spans.push(Span::styled("[<]", arrow(controls.prev_enabled)));
        spans.push(Span::raw(format!(" {} / {} ", p.current_page, p.total_pages)));
        spans.push(Span::styled("[>]", arrow(controls.next_enabled)));
        spans.push(Span::raw("  "));
    }
    spans.push(Span::styled(records, theme::DIM));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

pub fn render_debug_panel(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Debug ")
        .borders(Borders::ALL)
        .border_style(theme::BORDER_UNFOCUSED);

    let visible = area.height.saturating_sub(2) as usize;
    let skip = state.debug_log.len().saturating_sub(visible);
    let lines: Vec<Line> = state
        .debug_log
        .iter()
        .skip(skip)
        .map(|l| Line::from(Span::styled(format!("> {}", l), theme::DIM)))
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

pub fn render_status_bar(f: &mut Frame, area: Rect, state: &AppState) {
    let key_hints = if state.editing {
        "Enter: search | Esc: stop editing"
    } else {
        "/: new search | Tab/1-3: section | j/k: move | [/]: page | o: open | d: debug | q: quit"
    };

    let status = if state.loading {
        "Searching...".to_string()
    } else {
        String::new()
    };

    let right_text = state
        .snapshot()
        .map(|s| format!("{} | {}", s.debug.summary(), relative_time(&s.fetched_at)))
        .unwrap_or_default();

    let total_width = area.width as usize;
    let center_width = total_width.saturating_sub(key_hints.len() + right_text.len() + 2);
    let padding = center_width.saturating_sub(status.len());

    let line = Line::from(vec![
        Span::styled(key_hints, theme::STATUS_BAR),
        Span::styled(" ", theme::STATUS_BAR),
        Span::styled(status, theme::STATUS_BAR),
        Span::styled(" ".repeat(padding), theme::STATUS_BAR),
        Span::styled(right_text, theme::STATUS_BAR),
    ]);

    f.render_widget(Paragraph::new(line).style(theme::STATUS_BAR), area);
}

pub fn render_error_banner(f: &mut Frame, area: Rect, msg: &str) {
    let width = (area.width / 2).max(40).min(area.width.saturating_sub(4));
    let height = 6u16.min(area.height);
    let banner = Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    f.render_widget(Clear, banner);

    let block = Block::default()
        .title(" Error ")
        .borders(Borders::ALL)
        .border_style(theme::ERROR);

    let text = vec![
        Line::from(Span::styled(msg.to_string(), theme::ERROR)),
        Line::from(""),
        Line::from(Span::styled("Press Esc to dismiss", theme::DIM)),
    ];

    let para = Paragraph::new(text).wrap(Wrap { trim: true }).block(block);
    f.render_widget(para, banner);
}

//! Plain-text rendering of a search for non-interactive use.

use std::fmt::Write;

use crate::archive::ArchiveEntry;
use crate::judicial::{SearchState, SectionKind, SectionResult, StatusCategory, classify};
use crate::util::time::{format_date, relative_time};

fn badge(status: &str) -> &'static str {
    match classify(status) {
        StatusCategory::Pending => "pending",
        StatusCategory::Resolved => "resolved",
        StatusCategory::Cancelled => "cancelled",
        StatusCategory::Other => "other",
    }
}

fn section_header<T>(out: &mut String, kind: SectionKind, section: &SectionResult<T>) {
    let _ = write!(out, "\n== {} ({})", kind.label(), section.effective_count());
    if let Some(p) = section.pagination()
        && p.total_pages > 1
    {
        let _ = write!(out, "  page {}/{}", p.current_page, p.total_pages);
    }
    out.push('\n');

    match section {
        SectionResult::Failed { message } => {
            let _ = writeln!(out, "  error: {}", message);
        }
        SectionResult::Empty => {
            let _ = writeln!(out, "  no {} found", kind.label().to_lowercase());
        }
        SectionResult::Ok(_) => {}
    }
}

pub fn render_plain(state: &SearchState) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "NUC {}: {} decisions · {} cases · {} hearings",
        state.query,
        state.decisions.effective_count(),
        state.cases.effective_count(),
        state.hearings.effective_count(),
    );

    if !state.has_any_data {
        out.push_str("No results.\n");
    }

    section_header(&mut out, SectionKind::Decisions, &state.decisions);
    for d in state.decisions.records() {
        let _ = writeln!(
            out,
            "  {}  {}  {}",
            d.number,
            format_date(d.date.as_ref()),
            d.court
        );
        if let Some(ref subject) = d.subject {
            let _ = writeln!(out, "      {}", subject);
        }
        if let Some(ref url) = d.document_url {
            let _ = writeln!(out, "      {}", url);
        }
    }

    section_header(&mut out, SectionKind::Cases, &state.cases);
    for c in state.cases.records() {
        let _ = writeln!(
            out,
            "  {}  {}  {}  [{}: {}]",
            c.nuc,
            c.case_type,
            c.court,
            badge(&c.status),
            c.status
        );
    }

    section_header(&mut out, SectionKind::Hearings, &state.hearings);
    for h in state.hearings.records() {
        let when = h
            .date_label
            .clone()
            .unwrap_or_else(|| format_date(h.date.as_ref()));
        let _ = writeln!(
            out,
            "  {} {}  {}  {}  [{}: {}]",
            when,
            h.time.as_deref().unwrap_or(""),
            h.hearing_type,
            h.court,
            badge(&h.status),
            h.status
        );
        if let Some(link) = h.link() {
            let _ = writeln!(out, "      {}", link);
        }
    }

    let _ = writeln!(out, "\ndebug: {}", state.debug.summary());
    out
}

pub fn render_history(entries: &[ArchiveEntry]) -> String {
    if entries.is_empty() {
        return "No archived searches.\n".to_string();
    }
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{}  {:>8} bytes  {}",
            entry.name,
            entry.size,
            relative_time(&entry.modified)
        );
    }
    out
}

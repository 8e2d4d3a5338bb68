use serde_json::Value;

use super::normalize::Fields;

/// Records requested per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 15;

const CURRENT_PAGE: &[&str] = &["paginaActual", "PaginaActual"];
const TOTAL_PAGES: &[&str] = &["totalPaginas", "TotalPaginas"];
const TOTAL_COUNT: &[&str] = &["totalRegistros", "TotalRegistros"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

/// Prev/next affordances for a section with more than one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageControls {
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl Pagination {
    /// Clamps to `1 <= current_page <= total_pages`, `total_pages >= 1`.
    pub fn new(current_page: u32, total_pages: u32, total_count: u64) -> Self {
        let total_pages = total_pages.max(1);
        Self {
            current_page: current_page.clamp(1, total_pages),
            total_pages,
            total_count,
        }
    }

    /// Reads page metadata from a section payload. The total falls back
    /// to `returned` when the payload does not state one or states zero.
    pub fn from_payload(payload: &Value, returned: u64) -> Self {
        let Some(map) = payload.as_object() else {
            return Self::new(1, 1, returned);
        };
        let f = Fields::new(map);
        let current = f.count(CURRENT_PAGE).map_or(1, saturate);
        let total_pages = f.count(TOTAL_PAGES).map_or(1, saturate);
        let total_count = f
            .count(TOTAL_COUNT)
            .filter(|n| *n > 0)
            .unwrap_or(returned);
        Self::new(current, total_pages, total_count)
    }

    /// `None` when there is nothing to page through.
    pub fn controls(&self) -> Option<PageControls> {
        if self.total_pages <= 1 {
            return None;
        }
        Some(PageControls {
            prev_enabled: self.current_page != 1,
            next_enabled: self.current_page != self.total_pages,
        })
    }

    pub fn previous_page(&self) -> Option<u32> {
        self.controls()
            .filter(|c| c.prev_enabled)
            .map(|_| self.current_page - 1)
    }

    pub fn next_page(&self) -> Option<u32> {
        self.controls()
            .filter(|c| c.next_enabled)
            .map(|_| self.current_page + 1)
    }
}

fn saturate(n: u64) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

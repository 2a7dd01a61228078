use crate::api::FireRecord;
use crate::domain::Risk;
use crate::format::{format_date, format_frp, text_or_missing};
use serde::Serialize;

pub const PAGE_SIZE: usize = 50;
pub const COLUMNS: [&str; 6] = ["Município", "Estado", "Bioma", "Data", "FRP (MW)", "Risco"];
pub const EMPTY_MESSAGE: &str = "Nenhum dado encontrado com os filtros atuais.";
pub const LOAD_ERROR_MESSAGE: &str = "Erro ao carregar dados da tabela. Tente novamente.";

/// Display text for one table row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub municipality: String,
    pub state: String,
    pub biome: String,
    pub date: String,
    pub frp: String,
    pub risk: Risk,
    /// Badge class of `risk`, for consumers that style rows by class.
    pub risk_class: &'static str,
}

impl From<&FireRecord> for RowView {
    fn from(record: &FireRecord) -> Self {
        let frp = record.frp.filter(|v| v.is_finite()).unwrap_or(0.0);
        Self {
            municipality: text_or_missing(record.municipality.as_deref()),
            state: text_or_missing(record.state.as_deref()),
            biome: text_or_missing(record.biome.as_deref()),
            date: format_date(record.detected_at.as_deref()),
            frp: format_frp(Some(frp)),
            risk: Risk::from_frp(frp),
            risk_class: Risk::from_frp(frp).badge_class(),
        }
    }
}

/// 1-based "showing first–last of total" numbers for the footer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRange {
    pub first: usize,
    pub last: usize,
    pub total: usize,
}

/// Client-side paging over the last `/focos` result.
///
/// Filtering happens on the server, so the displayed set is always the full
/// fetch result.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    records: Vec<FireRecord>,
    page: usize,
    error: Option<String>,
}

impl Default for RecordTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordTable {
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
            page: 1,
            error: None,
        }
    }

    /// Replaces the data and goes back to page 1.
    pub fn load(&mut self, records: Vec<FireRecord>) {
        self.records = records;
        self.page = 1;
        self.error = None;
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.records.clear();
        self.page = 1;
        self.error = Some(message.into());
    }

    pub fn records(&self) -> &[FireRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub const fn page(&self) -> usize {
        self.page
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn total_pages(&self) -> usize {
        self.records.len().div_ceil(PAGE_SIZE).max(1)
    }

    pub const fn can_go_previous(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn next_page(&mut self) -> bool {
        if self.can_go_next() {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub fn previous_page(&mut self) -> bool {
        if self.can_go_previous() {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub const fn first_page(&mut self) {
        self.page = 1;
    }

    pub fn last_page(&mut self) {
        self.page = self.total_pages();
    }

    /// Half-open `[start, end)` indexes of the current page, clamped to the data.
    pub fn bounds(&self) -> (usize, usize) {
        let start = (self.page - 1) * PAGE_SIZE;
        let end = start + PAGE_SIZE;
        (start.min(self.records.len()), end.min(self.records.len()))
    }

    pub fn page_records(&self) -> &[FireRecord] {
        let (start, end) = self.bounds();
        &self.records[start..end]
    }

    pub fn page_rows(&self) -> Vec<RowView> {
        self.page_records().iter().map(RowView::from).collect()
    }

    pub fn range(&self) -> PageRange {
        let total = self.records.len();
        let start = (self.page - 1) * PAGE_SIZE;
        PageRange {
            first: (start + 1).min(total),
            last: (start + PAGE_SIZE).min(total),
            total,
        }
    }

    /// Message shown in place of the rows: the load error, or the empty-state text.
    pub fn placeholder(&self) -> Option<&str> {
        if let Some(error) = self.error.as_deref() {
            return Some(error);
        }
        self.page_records().is_empty().then_some(EMPTY_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(count: usize) -> Vec<FireRecord> {
        (0..count)
            .map(|i| FireRecord {
                municipality: Some(format!("Municipio {i}")),
                state: Some("SP".to_string()),
                biome: Some("Cerrado".to_string()),
                detected_at: Some("2025-11-02T10:00:00".to_string()),
                frp: Some(i as f64),
            })
            .collect()
    }

    #[test]
    fn total_pages_is_ceiling_with_minimum_one() {
        let mut table = RecordTable::new();
        for (count, pages) in [(0, 1), (1, 1), (50, 1), (51, 2), (100, 2), (101, 3), (1000, 20)] {
            table.load(records(count));
            assert_eq!(table.total_pages(), pages, "{count} records");
        }
    }

    #[test]
    fn paging_stays_in_bounds() {
        let mut table = RecordTable::new();
        table.load(records(120));

        assert!(!table.previous_page());
        assert_eq!(table.page(), 1);
        for _ in 0..10 {
            table.next_page();
        }
        assert_eq!(table.page(), 3);
        assert!(!table.can_go_next());
        assert_eq!(table.page_records().len(), 20);
        assert_eq!(
            table.range(),
            PageRange {
                first: 101,
                last: 120,
                total: 120
            }
        );
        for _ in 0..10 {
            table.previous_page();
        }
        assert_eq!(table.page(), 1);
    }

    #[test]
    fn first_page_holds_first_fifty_records() {
        let mut table = RecordTable::new();
        let data = records(75);
        table.load(data.clone());
        assert_eq!(table.page_records(), &data[..PAGE_SIZE]);
        assert_eq!(table.range().first, 1);
        assert_eq!(table.range().last, 50);
    }

    #[test]
    fn load_resets_to_first_page() {
        let mut table = RecordTable::new();
        table.load(records(200));
        table.last_page();
        assert_eq!(table.page(), 4);
        table.load(records(10));
        assert_eq!(table.page(), 1);
    }

    #[test]
    fn empty_result_shows_placeholder() {
        let mut table = RecordTable::new();
        table.load(Vec::new());
        assert_eq!(table.placeholder(), Some(EMPTY_MESSAGE));
        assert_eq!(
            table.range(),
            PageRange {
                first: 0,
                last: 0,
                total: 0
            }
        );
        assert!(!table.can_go_next());
        assert!(!table.can_go_previous());
    }

    #[test]
    fn failure_replaces_rows_with_error() {
        let mut table = RecordTable::new();
        table.load(records(5));
        table.fail(LOAD_ERROR_MESSAGE);
        assert!(table.is_empty());
        assert_eq!(table.placeholder(), Some(LOAD_ERROR_MESSAGE));
        table.load(records(5));
        assert_eq!(table.placeholder(), None);
    }

    #[test]
    fn row_view_fills_gaps() {
        let row = RowView::from(&FireRecord {
            municipality: None,
            state: Some("MT".to_string()),
            biome: Some(String::new()),
            detected_at: None,
            frp: None,
        });
        assert_eq!(row.municipality, "--");
        assert_eq!(row.biome, "--");
        assert_eq!(row.date, "--");
        assert_eq!(row.frp, "0.0");
        assert_eq!(row.risk, Risk::Low);

        let hot = RowView::from(&FireRecord {
            frp: Some(432.19),
            detected_at: Some("2025-11-02T10:00:00".to_string()),
            ..FireRecord::default()
        });
        assert_eq!(hot.frp, "432.2");
        assert_eq!(hot.date, "02/11/2025");
        assert_eq!(hot.risk, Risk::Critical);
        assert_eq!(hot.risk_class, "badge-critico");
        assert_eq!(row.risk_class, "badge-baixo");
    }
}

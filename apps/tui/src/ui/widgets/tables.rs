use crate::ui::widgets::palette::risk_style;
use focos_dashboard::table::{RowView, COLUMNS};
use ratatui::layout::{Alignment, Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

pub const WIDTHS: [Constraint; 6] = [
    Constraint::Min(18),
    Constraint::Length(20),
    Constraint::Length(16),
    Constraint::Length(11),
    Constraint::Length(9),
    Constraint::Length(9),
];

pub fn header_row() -> Row<'static> {
    Row::new(COLUMNS.iter().map(|title| Cell::from(*title))).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )
}

pub fn record_row(row: &RowView) -> Row<'static> {
    Row::new(vec![
        Cell::from(row.municipality.clone()),
        Cell::from(row.state.clone()),
        Cell::from(row.biome.clone()),
        Cell::from(row.date.clone()),
        Cell::from(row.frp.clone()),
        Cell::from(row.risk.label()).style(risk_style(row.risk)),
    ])
}

/// Occurrence rows under the common header, or `placeholder` centred in the
/// block when there is nothing to list.
pub fn render_records(
    f: &mut Frame<'_>,
    area: Rect,
    block: Block<'_>,
    rows: &[RowView],
    placeholder: Option<&str>,
) {
    if let Some(message) = placeholder {
        let paragraph = Paragraph::new(message.to_string())
            .block(block)
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    }

    let table = Table::new(rows.iter().map(record_row), WIDTHS)
        .header(header_row())
        .block(block)
        .column_spacing(1);
    f.render_widget(table, area);
}

pub fn bordered(title: String, color: Color) -> Block<'static> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

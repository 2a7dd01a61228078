use crate::app::App;
use crate::ui::widgets::tables::{bordered, render_records};
use focos_dashboard::table::RowView;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::Frame;

const NO_ALERTS: &str = "Nenhum alerta crítico no momento.";

pub fn render_alerts(app: &App, f: &mut Frame<'_>, area: Rect) {
    let rows: Vec<RowView> = app.alerts.iter().map(RowView::from).collect();
    let placeholder = app
        .alerts_error
        .as_deref()
        .or_else(|| rows.is_empty().then_some(NO_ALERTS));

    let block = bordered(
        format!(" Alertas críticos (FRP > 50 MW) · {} ", rows.len()),
        Color::Magenta,
    );
    render_records(f, area, block, &rows, placeholder);
}

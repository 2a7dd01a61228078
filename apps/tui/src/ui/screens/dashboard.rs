use crate::app::App;
use crate::ui::widgets::cards::render_cards;
use crate::ui::widgets::charts::render_chart;
use focos_dashboard::dashboard::describe_status;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line as TextLine;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(2),
            Constraint::Percentage(36),
            Constraint::Percentage(32),
            Constraint::Min(8),
        ])
        .split(area);

    let view = app.dashboard.as_ref();
    render_cards(view.map(|v| &v.cards), f, rows[0]);
    render_details(app, f, rows[1]);

    let charts = view.map(|v| &v.charts);
    let top = split_columns(rows[2]);
    render_chart(
        charts.and_then(|c| c.states.as_ref()),
        "Focos por Estado",
        f,
        top[0],
    );
    render_chart(
        charts.and_then(|c| c.biomes.as_ref()),
        "Distribuição por Bioma",
        f,
        top[1],
    );

    let middle = split_columns(rows[3]);
    render_chart(
        charts.and_then(|c| c.daily.as_ref()),
        "Evolução Diária dos Focos",
        f,
        middle[0],
    );
    render_chart(
        charts.and_then(|c| c.risk.as_ref()),
        "Distribuição por Risco de Fogo",
        f,
        middle[1],
    );

    render_chart(
        charts.and_then(|c| c.frp.as_ref()),
        "Média FRP por Estado",
        f,
        rows[4],
    );
}

/// Backend FRP statistics and server status under the cards.
fn render_details(app: &App, f: &mut Frame<'_>, area: Rect) {
    let stats = app
        .dashboard
        .as_ref()
        .and_then(|view| view.stats.line())
        .unwrap_or_default();
    let server = app.server.as_ref().map(describe_status).unwrap_or_default();
    let paragraph = Paragraph::new(vec![TextLine::from(stats), TextLine::from(server)])
        .style(Style::default().fg(Color::Gray));
    f.render_widget(paragraph, area);
}

fn split_columns(area: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area)
}

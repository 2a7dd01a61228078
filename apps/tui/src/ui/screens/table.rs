use crate::app::App;
use crate::ui::key_style;
use crate::ui::widgets::tables::{bordered, render_records};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render_table(app: &App, f: &mut Frame<'_>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(1)])
        .split(area);

    let table = &app.table;
    let block = bordered(
        format!(" Focos · {} ", app.filters.describe()),
        Color::Yellow,
    );
    render_records(
        f,
        chunks[0],
        block,
        &table.page_rows(),
        table.placeholder(),
    );

    let range = table.range();
    let enabled = |on: bool| {
        if on {
            key_style()
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };
    let footer = TextLine::from(vec![
        Span::styled("← anterior", enabled(table.can_go_previous())),
        Span::raw(format!(
            "   Mostrando {}-{} de {} · Página {} de {}   ",
            range.first,
            range.last,
            range.total,
            table.page(),
            table.total_pages()
        )),
        Span::styled("próxima →", enabled(table.can_go_next())),
    ]);
    f.render_widget(
        Paragraph::new(footer).alignment(ratatui::layout::Alignment::Center),
        chunks[1],
    );
}

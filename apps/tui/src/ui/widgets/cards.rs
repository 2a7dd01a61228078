use crate::ui::ACCENT;
use focos_dashboard::dashboard::SummaryCards;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

/// The four headline cards; dashes until the first load succeeds.
pub fn render_cards(cards: Option<&SummaryCards>, f: &mut Frame<'_>, area: Rect) {
    let values = cards.map_or_else(
        || ["--".to_string(), "--".to_string(), "--".to_string(), "--".to_string()],
        |cards| {
            [
                cards.total.clone(),
                cards.states.to_string(),
                cards.biomes.to_string(),
                format!("{} MW", cards.mean_frp),
            ]
        },
    );
    let titles = ["Total de Focos", "Estados", "Biomas", "FRP Médio"];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((title, value), column) in titles.iter().zip(values).zip(columns.iter()) {
        let card = Paragraph::new(TextLine::from(Span::styled(
            value,
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(*title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        f.render_widget(card, *column);
    }
}

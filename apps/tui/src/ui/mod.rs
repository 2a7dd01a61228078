// UI module: one render function per screen plus shared widgets

pub mod screens;
pub mod widgets;

use crate::app::{App, AppScreen};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, BRAILLE_SIX};

pub const ACCENT: Color = Color::Rgb(255, 87, 34);

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(app, f, chunks[0]);

    match app.screen {
        AppScreen::Dashboard => screens::dashboard::render_dashboard(app, f, chunks[1]),
        AppScreen::Table => screens::table::render_table(app, f, chunks[1]),
        AppScreen::Alerts => screens::alerts::render_alerts(app, f, chunks[1]),
        AppScreen::Filters => screens::filters::render_filters(app, f, chunks[1]),
    }

    render_status_bar(app, f, chunks[2]);

    if app.show_help {
        screens::help::render_help(f);
    }
}

fn render_header(app: &App, f: &mut Frame<'_>, area: Rect) {
    let block = Block::default()
        .title(" Focos de Queimadas no Brasil ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(34)])
        .split(inner);

    let titles = AppScreen::ALL
        .iter()
        .enumerate()
        .map(|(index, screen)| TextLine::from(format!("{} {}", index + 1, screen.title())))
        .collect::<Vec<_>>();
    let tabs = Tabs::new(titles)
        .select(app.screen.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .divider(Span::raw("|"));
    f.render_widget(tabs, columns[0]);

    if app.is_loading() {
        let throbber = Throbber::default()
            .label("Carregando...")
            .style(Style::default().fg(Color::Yellow))
            .throbber_set(BRAILLE_SIX);
        let mut state = app.throbber.clone();
        f.render_stateful_widget(throbber, columns[1], &mut state);
    } else if let Some(view) = &app.dashboard {
        let updated = Paragraph::new(format!("Atualizado {}", view.updated_label()))
            .style(Style::default().fg(Color::DarkGray))
            .alignment(ratatui::layout::Alignment::Right);
        f.render_widget(updated, columns[1]);
    }
}

fn render_status_bar(app: &App, f: &mut Frame<'_>, area: Rect) {
    let line = if app.status_message.is_empty() {
        TextLine::from(vec![
            Span::styled("F1", key_style()),
            Span::raw(" ajuda  "),
            Span::styled("Tab", key_style()),
            Span::raw(" tela  "),
            Span::styled("r", key_style()),
            Span::raw(" atualizar  "),
            Span::styled("f", key_style()),
            Span::raw(" filtros  "),
            Span::styled("e", key_style()),
            Span::raw(" exportar  "),
            Span::styled("q", key_style()),
            Span::raw(" sair"),
        ])
    } else {
        TextLine::from(Span::styled(
            app.status_message.as_str(),
            Style::default().fg(Color::Yellow),
        ))
    };
    f.render_widget(Paragraph::new(line), area);
}

pub fn key_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

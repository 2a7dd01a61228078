use crate::app::form::{FilterField, Picker};
use crate::app::App;
use crate::ui::{key_style, ACCENT};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

const ALL_LABEL: &str = "Todos";
/// Matches listed under a focused picker.
const MAX_MATCHES: usize = 12;

pub fn render_filters(app: &App, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_form(app, f, columns[0]);
    render_matches(app, f, columns[1]);
}

fn render_form(app: &App, f: &mut Frame<'_>, area: Rect) {
    let form = &app.form;
    let mut lines = Vec::new();

    for field in FilterField::ALL {
        let focused = field == form.field;
        let value = match field {
            FilterField::State => picker_value(&form.state, &app.options.states),
            FilterField::Biome => picker_value(&form.biome, &app.options.biomes),
            FilterField::StartDate => text_value(&form.start_date, focused),
            FilterField::EndDate => text_value(&form.end_date, focused),
            FilterField::FrpMin => text_value(&form.frp_min, focused),
            FilterField::FrpMax => text_value(&form.frp_max, focused),
            FilterField::Criticality => form
                .criticality
                .map_or(ALL_LABEL, |criticality| criticality.label())
                .to_string(),
        };
        let marker = if focused { "▶ " } else { "  " };
        let label_style = if focused {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        lines.push(TextLine::from(vec![
            Span::styled(marker, label_style),
            Span::styled(format!("{:<12}", field.label()), label_style),
            Span::raw(value),
        ]));
    }

    lines.push(TextLine::default());
    if let Some(error) = &form.error {
        lines.push(TextLine::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(TextLine::from(vec![
        Span::styled("Enter", key_style()),
        Span::raw(" aplicar  "),
        Span::styled("Ctrl-R", key_style()),
        Span::raw(" limpar  "),
        Span::styled("Esc", key_style()),
        Span::raw(" voltar"),
    ]));
    lines.push(TextLine::from(Span::styled(
        "Datas no formato AAAA-MM-DD, FRP em MW",
        Style::default().fg(Color::DarkGray),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Filtros ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(ACCENT)),
    );
    f.render_widget(paragraph, area);
}

fn picker_value(picker: &Picker, options: &[String]) -> String {
    let choice = picker.choice(options).unwrap_or(ALL_LABEL);
    if picker.query.is_empty() {
        format!("◀ {choice} ▶")
    } else {
        format!("◀ {choice} ▶  busca: {}", picker.query)
    }
}

fn text_value(input: &str, focused: bool) -> String {
    if focused {
        format!("{input}▏")
    } else if input.is_empty() {
        "--".to_string()
    } else {
        input.to_string()
    }
}

fn render_matches(app: &App, f: &mut Frame<'_>, area: Rect) {
    let (picker, options) = match app.form.field {
        FilterField::State => (&app.form.state, &app.options.states),
        FilterField::Biome => (&app.form.biome, &app.options.biomes),
        _ => {
            let block = Block::default()
                .title(" Opções ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray));
            f.render_widget(block, area);
            return;
        }
    };

    let matches = picker.matches(options);
    let highlight = Style::default()
        .bg(ACCENT)
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);
    let first = picker.fallback.as_deref().unwrap_or(ALL_LABEL);
    let items: Vec<ListItem<'_>> = std::iter::once(first)
        .chain(matches.iter().copied())
        .enumerate()
        .skip(picker.selected.saturating_sub(MAX_MATCHES - 1))
        .take(MAX_MATCHES)
        .map(|(index, option)| {
            let item = ListItem::new(option.to_string());
            if index == picker.selected {
                item.style(highlight)
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(format!(" Opções ({}) ", matches.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(list, area);
}

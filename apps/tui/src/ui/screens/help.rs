use crate::ui::key_style;
use crate::ui::widgets::popup::centered_rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

const BINDINGS: [(&str, &str); 12] = [
    ("Tab / Shift-Tab", "próxima / tela anterior"),
    ("1-4", "Painel, Focos, Alertas, Filtros"),
    ("← → / n p", "página anterior / próxima"),
    ("Home / End", "primeira / última página"),
    ("r", "atualizar dados"),
    ("f", "abrir filtros"),
    ("e", "exportar CSV dos filtros atuais"),
    ("q", "sair"),
    ("Filtros ↑ ↓", "escolher campo"),
    ("Filtros ← →", "alternar opções"),
    ("Filtros Enter", "aplicar"),
    ("Filtros Ctrl-R", "limpar filtros (últimos 7 dias)"),
];

pub fn render_help(f: &mut Frame<'_>) {
    let area = centered_rect(60, 60, f.area());
    let lines: Vec<TextLine<'_>> = BINDINGS
        .iter()
        .map(|(key, action)| {
            TextLine::from(vec![
                Span::styled(format!("{key:>16}"), key_style()),
                Span::raw(format!("  {action}")),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(" Ajuda (F1 / Esc para fechar) ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

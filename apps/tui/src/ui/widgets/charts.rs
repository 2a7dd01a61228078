use crate::ui::widgets::palette::hex_color;
use focos_dashboard::charts::{ChartConfig, ChartKind};
use ratatui::layout::{Alignment, Direction, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph,
};
use ratatui::Frame;

const EMPTY_CHART: &str = "Sem dados para exibir";

/// Draws `chart`, or an empty panel titled `title` when there is no data.
pub fn render_chart(chart: Option<&ChartConfig>, title: &str, f: &mut Frame<'_>, area: Rect) {
    let Some(chart) = chart else {
        let paragraph = Paragraph::new(EMPTY_CHART)
            .block(chart_block(title))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
        return;
    };

    match chart.kind {
        ChartKind::Column => render_columns(chart, f, area),
        ChartKind::Bar => render_bars(chart, f, area),
        ChartKind::Line => render_line(chart, f, area),
        ChartKind::Pie => render_shares(chart, f, area),
    }
}

fn chart_block(title: &str) -> Block<'static> {
    Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_value(value: f64) -> u64 {
    value.max(0.0).round() as u64
}

fn short_label(label: &str, width: usize) -> String {
    label.chars().take(width.max(1)).collect()
}

fn render_columns(chart: &ChartConfig, f: &mut Frame<'_>, area: Rect) {
    let count = chart.points.len().max(1);
    let inner_width = usize::from(area.width.saturating_sub(2));
    let bar_width = (inner_width / count).saturating_sub(1).clamp(1, 9);

    let bars: Vec<Bar<'_>> = chart
        .points
        .iter()
        .map(|point| {
            Bar::default()
                .value(bar_value(point.value))
                .label(TextLine::from(short_label(&point.label, bar_width)))
                .style(Style::default().fg(hex_color(&point.color)))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    let widget = BarChart::default()
        .block(chart_block(chart.title))
        .data(BarGroup::default().bars(&bars))
        .max(bar_value(chart.max_value()).max(1))
        .bar_gap(1)
        .bar_width(u16::try_from(bar_width).unwrap_or(1));

    f.render_widget(widget, area);
}

fn render_bars(chart: &ChartConfig, f: &mut Frame<'_>, area: Rect) {
    let bars: Vec<Bar<'_>> = chart
        .points
        .iter()
        .map(|point| {
            Bar::default()
                .value(bar_value(point.value))
                .text_value(format!("{:.1}{}", point.value, chart.value_suffix))
                .label(TextLine::from(point.label.clone()))
                .style(Style::default().fg(hex_color(&point.color)))
                .value_style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD))
        })
        .collect();

    let widget = BarChart::default()
        .block(chart_block(chart.title))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .max(bar_value(chart.max_value()).max(1))
        .bar_gap(0)
        .bar_width(1);

    f.render_widget(widget, area);
}

fn render_line(chart: &ChartConfig, f: &mut Frame<'_>, area: Rect) {
    let data: Vec<(f64, f64)> = chart
        .values()
        .enumerate()
        .map(|(index, value)| (index as f64, value))
        .collect();
    let color = chart
        .points
        .first()
        .map_or(Color::Red, |point| hex_color(&point.color));

    let last = chart.points.len().saturating_sub(1);
    let x_labels: Vec<Span<'_>> = [0, last / 2, last]
        .iter()
        .filter_map(|index| chart.points.get(*index))
        .map(|point| Span::raw(point.label.clone()))
        .collect();
    let y_max = (chart.max_value() * 1.1).max(1.0);

    let datasets = vec![Dataset::default()
        .name(chart.series_name)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&data)];

    let widget = Chart::new(datasets)
        .block(chart_block(chart.title))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, (last as f64).max(1.0)])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(chart.y_axis.unwrap_or_default())
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, y_max])
                .labels(vec![
                    Span::raw("0"),
                    Span::raw(format!("{:.0}", y_max / 2.0)),
                    Span::raw(format!("{y_max:.0}")),
                ]),
        );

    f.render_widget(widget, area);
}

/// Pie slices as a stacked share bar plus a legend.
fn render_shares(chart: &ChartConfig, f: &mut Frame<'_>, area: Rect) {
    let width = usize::from(area.width.saturating_sub(2));
    let mut lines = vec![share_bar(chart, width), TextLine::default()];

    lines.extend(chart.points.iter().map(|point| {
        TextLine::from(vec![
            Span::styled("■ ", Style::default().fg(hex_color(&point.color))),
            Span::raw(format!(
                "{}: {:.0}{} ({:.1}%)",
                point.label,
                point.value,
                chart.value_suffix,
                point.share.unwrap_or_default()
            )),
        ])
    }));

    let paragraph = Paragraph::new(lines).block(chart_block(chart.title));
    f.render_widget(paragraph, area);
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn share_bar(chart: &ChartConfig, width: usize) -> TextLine<'static> {
    let spans = chart
        .points
        .iter()
        .map(|point| {
            let cells = (point.share.unwrap_or_default() / 100.0 * width as f64).round() as usize;
            Span::styled("█".repeat(cells), Style::default().fg(hex_color(&point.color)))
        })
        .collect::<Vec<_>>();
    TextLine::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_fit_bar_width() {
        assert_eq!(short_label("MATO GROSSO", 4), "MATO");
        assert_eq!(short_label("SP", 0), "S");
    }

    #[test]
    fn bar_values_round_and_floor_at_zero() {
        assert_eq!(bar_value(12.6), 13);
        assert_eq!(bar_value(-3.0), 0);
    }
}

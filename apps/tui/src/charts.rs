// Chart configurations built from API payloads.
//
// Every builder is pure: it returns `None` for an empty payload and otherwise
// a serializable `ChartConfig` that the terminal widgets (or the headless
// JSON report) consume.

use crate::api::{BiomeDistribution, DailySeries, FireMetrics, FrpByState, RiskDistribution};
use crate::domain::{biome_color, hex_to_rgb, risk_color, rgb_to_hex};
use crate::format::format_day_label;
use serde::Serialize;

/// Days kept by the daily evolution chart.
pub const DAILY_WINDOW: usize = 30;
/// States kept by the FRP ranking.
pub const FRP_TOP: usize = 15;

pub const STATE_BAR_COLOR: &str = "#FF0000";
pub const DAILY_LINE_COLOR: &str = "#FF0000";
pub const FRP_GRADIENT: (&str, &str) = ("#D32F2F", "#F57C00");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Vertical bars.
    Column,
    Pie,
    Line,
    /// Horizontal bars.
    Bar,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
    pub color: String,
    /// Percentage of the total, pie charts only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub id: &'static str,
    pub kind: ChartKind,
    pub title: &'static str,
    pub series_name: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_axis: Option<&'static str>,
    pub value_suffix: &'static str,
    pub points: Vec<ChartPoint>,
}

impl ChartConfig {
    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::max)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.points.iter().map(|p| p.label.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.value)
    }
}

/// The five dashboard charts; a missing chart had no data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardCharts {
    pub states: Option<ChartConfig>,
    pub biomes: Option<ChartConfig>,
    pub daily: Option<ChartConfig>,
    pub risk: Option<ChartConfig>,
    pub frp: Option<ChartConfig>,
}

pub fn states_chart(metrics: &FireMetrics) -> Option<ChartConfig> {
    if metrics.by_state.is_empty() {
        return None;
    }
    let points = metrics
        .by_state
        .iter()
        .map(|(state, count)| point(state, count, STATE_BAR_COLOR))
        .collect();

    Some(ChartConfig {
        id: "chartEstados",
        kind: ChartKind::Column,
        title: "Focos por Estado",
        series_name: "Focos",
        y_axis: Some("Número de Focos"),
        value_suffix: " focos",
        points,
    })
}

pub fn biome_chart(distribution: &BiomeDistribution) -> Option<ChartConfig> {
    if distribution.is_empty() {
        return None;
    }
    let total = distribution.total();
    let points = distribution
        .iter()
        .map(|(biome, count)| ChartPoint {
            share: Some(if total > 0.0 { count / total * 100.0 } else { 0.0 }),
            ..point(biome, count, biome_color(biome))
        })
        .collect();

    Some(ChartConfig {
        id: "chartBioma",
        kind: ChartKind::Pie,
        title: "Distribuição por Bioma",
        series_name: "Focos",
        y_axis: None,
        value_suffix: " focos",
        points,
    })
}

/// Keeps the last [`DAILY_WINDOW`] days in the order the API sent them.
pub fn daily_chart(series: &DailySeries) -> Option<ChartConfig> {
    if series.is_empty() {
        return None;
    }
    let skip = series.len().saturating_sub(DAILY_WINDOW);
    let points = series
        .iter()
        .skip(skip)
        .map(|(day, count)| ChartPoint {
            label: format_day_label(day),
            value: count,
            color: DAILY_LINE_COLOR.to_string(),
            share: None,
        })
        .collect();

    Some(ChartConfig {
        id: "chartDia",
        kind: ChartKind::Line,
        title: "Evolução Diária dos Focos (últimos 30 dias)",
        series_name: "Focos",
        y_axis: Some("Focos por Dia"),
        value_suffix: " focos",
        points,
    })
}

pub fn risk_chart(distribution: &RiskDistribution) -> Option<ChartConfig> {
    if distribution.is_empty() {
        return None;
    }
    let points = distribution
        .iter()
        .map(|(label, count)| point(label, count, risk_color(label)))
        .collect();

    Some(ChartConfig {
        id: "chartRisco",
        kind: ChartKind::Column,
        title: "Distribuição por Risco de Fogo",
        series_name: "Focos",
        y_axis: Some("Número de Focos"),
        value_suffix: " focos",
        points,
    })
}

/// Highest mean FRP first, at most [`FRP_TOP`] states.
pub fn frp_chart(frp: &FrpByState) -> Option<ChartConfig> {
    if frp.is_empty() {
        return None;
    }
    let mut ranked: Vec<(&str, f64)> = frp.iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked.truncate(FRP_TOP);

    let steps = ranked.len().saturating_sub(1).max(1) as f64;
    let points = ranked
        .iter()
        .enumerate()
        .map(|(rank, (state, value))| {
            let color = gradient(FRP_GRADIENT.0, FRP_GRADIENT.1, rank as f64 / steps);
            point(state, *value, &color)
        })
        .collect();

    Some(ChartConfig {
        id: "chartFRP",
        kind: ChartKind::Bar,
        title: "Média FRP por Estado (Top 15)",
        series_name: "FRP Médio",
        y_axis: Some("FRP Médio (MW)"),
        value_suffix: " MW",
        points,
    })
}

/// Linear interpolation between two `#RRGGBB` colours, `t` in `[0, 1]`.
pub fn gradient(start: &str, end: &str, t: f64) -> String {
    let (Some(from), Some(to)) = (hex_to_rgb(start), hex_to_rgb(end)) else {
        return start.to_string();
    };
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| to_channel((f64::from(b) - f64::from(a)).mul_add(t, f64::from(a)));
    rgb_to_hex((mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2)))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

fn point(label: &str, value: f64, color: &str) -> ChartPoint {
    ChartPoint {
        label: label.to_string(),
        value,
        color: color.to_string(),
        share: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Tally;

    fn daily(days: usize) -> DailySeries {
        Tally::from_pairs((1..=days).map(|d| {
            let day = chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
                .and_then(|start| start.checked_add_days(chrono::Days::new(d as u64 - 1)))
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            (day, d as f64)
        }))
    }

    #[test]
    fn empty_payloads_produce_no_chart() {
        let empty = Tally::default();
        assert!(states_chart(&FireMetrics::default()).is_none());
        assert!(biome_chart(&empty).is_none());
        assert!(daily_chart(&empty).is_none());
        assert!(risk_chart(&empty).is_none());
        assert!(frp_chart(&empty).is_none());
    }

    #[test]
    fn daily_keeps_last_thirty_in_order() {
        let chart = daily_chart(&daily(45));
        let values: Vec<f64> = chart.iter().flat_map(ChartConfig::values).collect();
        let expected: Vec<f64> = (16..=45).map(f64::from).collect();
        assert_eq!(values, expected);
        assert_eq!(chart.map(|c| c.points[0].label.clone()), Some("16/01".to_string()));
    }

    #[test]
    fn daily_shorter_than_window_is_untouched() {
        let chart = daily_chart(&daily(12));
        assert_eq!(chart.map(|c| c.points.len()), Some(12));
    }

    #[test]
    fn frp_ranking_sorted_and_truncated() {
        let frp = Tally::from_pairs((0..20).map(|i| (format!("UF{i}"), f64::from((i * 7) % 20))));
        let Some(chart) = frp_chart(&frp) else {
            panic!("expected a chart");
        };
        assert_eq!(chart.points.len(), FRP_TOP);
        let values: Vec<f64> = chart.values().collect();
        assert!(values.windows(2).all(|w| w[0] > w[1]), "{values:?}");
        assert!((values[0] - 19.0).abs() < f64::EPSILON);
        assert_eq!(chart.points[0].color, FRP_GRADIENT.0);
        assert_eq!(chart.points[FRP_TOP - 1].color, FRP_GRADIENT.1);
    }

    #[test]
    fn biome_slices_carry_palette_and_share() {
        let distribution = Tally::from_pairs([("Amazonia", 75.0), ("Pampa", 25.0)]);
        let Some(chart) = biome_chart(&distribution) else {
            panic!("expected a chart");
        };
        assert_eq!(chart.kind, ChartKind::Pie);
        assert_eq!(chart.points[0].color, biome_color("Amazonia"));
        assert_eq!(chart.points[0].share, Some(75.0));
        assert_eq!(chart.points[1].share, Some(25.0));
    }

    #[test]
    fn risk_bars_use_risk_palette() {
        let distribution = Tally::from_pairs([("Crítico", 3.0), ("Baixo", 9.0), ("Outro", 1.0)]);
        let Some(chart) = risk_chart(&distribution) else {
            panic!("expected a chart");
        };
        let colors: Vec<&str> = chart.points.iter().map(|p| p.color.as_str()).collect();
        assert_eq!(colors, ["#9C27B0", "#4CAF50", "#FF9800"]);
    }

    #[test]
    fn states_keep_api_order() {
        let metrics = FireMetrics {
            total: 6,
            by_state: Tally::from_pairs([("PARA", 4.0), ("ACRE", 2.0)]),
            ..FireMetrics::default()
        };
        let Some(chart) = states_chart(&metrics) else {
            panic!("expected a chart");
        };
        assert_eq!(chart.labels().collect::<Vec<_>>(), ["PARA", "ACRE"]);
        assert_eq!(chart.kind, ChartKind::Column);
    }

    #[test]
    fn gradient_endpoints_and_midpoint() {
        assert_eq!(gradient("#000000", "#FFFFFF", 0.0), "#000000");
        assert_eq!(gradient("#000000", "#FFFFFF", 1.0), "#FFFFFF");
        assert_eq!(gradient("#000000", "#FEFEFE", 0.5), "#7F7F7F");
        assert_eq!(gradient("bad", "#FFFFFF", 0.5), "bad");
    }
}

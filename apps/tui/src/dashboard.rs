// Dashboard data loading and the derived view (cards and charts).

use crate::api::{
    ApiError, ApiStatus, BiomeDistribution, DailySeries, FireApi, FireMetrics, FrpByState,
    RiskDistribution,
};
use crate::charts::{
    biome_chart, daily_chart, frp_chart, risk_chart, states_chart, DashboardCharts,
};
use crate::format::{format_count, format_date, format_frp};
use chrono::{DateTime, Local};
use log::{debug, warn};
use serde::Serialize;

pub const LOAD_ERROR_MESSAGE: &str = "Erro ao carregar dados. Verifique a conexão com o servidor.";

/// The five dashboard payloads, fetched together.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardData {
    pub metrics: FireMetrics,
    pub biomes: BiomeDistribution,
    pub daily: DailySeries,
    pub risk: RiskDistribution,
    pub frp: FrpByState,
}

/// Runs the five dashboard requests concurrently.
///
/// The batch fails as a whole: the first error is returned and any payload
/// that already arrived is dropped.
pub async fn load_dashboard<A: FireApi + ?Sized>(api: &A) -> Result<DashboardData, ApiError> {
    let (metrics, biomes, daily, risk, frp) = tokio::try_join!(
        api.metrics(),
        api.occurrences_by_biome(),
        api.occurrences_by_day(),
        api.fire_risk(),
        api.frp_by_state(),
    )?;
    debug!(
        "dashboard loaded: {} focos, {} days",
        metrics.total,
        daily.len()
    );

    Ok(DashboardData {
        metrics,
        biomes,
        daily,
        risk,
        frp,
    })
}

/// Choices offered by the state and biome filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub states: Vec<String>,
    pub biomes: Vec<String>,
}

pub async fn load_filter_options<A: FireApi + ?Sized>(api: &A) -> Result<FilterOptions, ApiError> {
    let (states, biomes) = tokio::try_join!(api.states(), api.biomes()).map_err(|e| {
        warn!("could not load filter options: {e}");
        e
    })?;
    Ok(FilterOptions { states, biomes })
}

/// Headline numbers shown above the charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCards {
    pub total: String,
    pub states: usize,
    pub biomes: usize,
    /// Mean of the per-state FRP means.
    pub mean_frp: String,
}

impl SummaryCards {
    pub fn from_data(data: &DashboardData) -> Self {
        let mean_frp = if data.frp.is_empty() {
            None
        } else {
            Some(data.frp.total() / data.frp.len() as f64)
        };

        // backend totals win over the size of the chart payloads
        let count = |total: Option<u64>, fallback: usize| {
            total.and_then(|n| usize::try_from(n).ok()).unwrap_or(fallback)
        };

        Self {
            total: format_count(data.metrics.total),
            states: count(data.metrics.total_states, data.metrics.by_state.len()),
            biomes: count(data.metrics.total_biomes, data.biomes.len()),
            mean_frp: format_frp(mean_frp),
        }
    }
}

/// Dataset-wide FRP statistics reported by `/metricas`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrpStats {
    pub mean: Option<String>,
    pub max: Option<String>,
    pub min: Option<String>,
    pub std_dev: Option<String>,
    pub latest_detection: Option<String>,
}

impl FrpStats {
    pub fn from_metrics(metrics: &FireMetrics) -> Self {
        let frp = |value: Option<f64>| value.filter(|v| v.is_finite()).map(|v| format_frp(Some(v)));
        Self {
            mean: frp(metrics.mean_frp),
            max: frp(metrics.max_frp),
            min: frp(metrics.min_frp),
            std_dev: frp(metrics.std_dev_frp),
            latest_detection: metrics
                .latest_detection
                .as_deref()
                .filter(|v| !v.trim().is_empty())
                .map(|v| format_date(Some(v))),
        }
    }

    /// One line of the available figures, `None` when the backend sent none.
    pub fn line(&self) -> Option<String> {
        let parts: Vec<String> = [
            ("FRP médio geral", &self.mean, " MW"),
            ("máx", &self.max, " MW"),
            ("mín", &self.min, " MW"),
            ("desvio", &self.std_dev, " MW"),
            ("última detecção", &self.latest_detection, ""),
        ]
        .into_iter()
        .filter_map(|(label, value, unit)| {
            value.as_ref().map(|value| format!("{label} {value}{unit}"))
        })
        .collect();
        (!parts.is_empty()).then(|| parts.join(" · "))
    }
}

/// `/status` summarised for the header and the headless report.
pub fn describe_status(status: &ApiStatus) -> String {
    let mut parts = vec![
        format!("Servidor {}", status.status),
        format!("{} registros", format_count(status.dataset_size)),
    ];
    let coverage = &status.coverage;
    if coverage.start.is_some() || coverage.end.is_some() {
        parts.push(format!(
            "cobertura {} → {}",
            format_date(coverage.start.as_deref()),
            format_date(coverage.end.as_deref())
        ));
    }
    if !status.columns.is_empty() {
        parts.push(format!("{} colunas", status.columns.len()));
    }
    if let Some(memory) = status.memory_usage.as_deref().filter(|m| !m.is_empty()) {
        parts.push(format!("memória {memory}"));
    }
    parts.join(" · ")
}

impl DashboardCharts {
    pub fn build(data: &DashboardData) -> Self {
        Self {
            states: states_chart(&data.metrics),
            biomes: biome_chart(&data.biomes),
            daily: daily_chart(&data.daily),
            risk: risk_chart(&data.risk),
            frp: frp_chart(&data.frp),
        }
    }
}

/// Everything the dashboard screen draws, derived from one successful load.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub cards: SummaryCards,
    pub stats: FrpStats,
    pub charts: DashboardCharts,
    pub updated_at: DateTime<Local>,
}

impl DashboardView {
    pub fn new(data: &DashboardData, updated_at: DateTime<Local>) -> Self {
        Self {
            cards: SummaryCards::from_data(data),
            stats: FrpStats::from_metrics(&data.metrics),
            charts: DashboardCharts::build(data),
            updated_at,
        }
    }

    pub fn updated_label(&self) -> String {
        self.updated_at.format("%d/%m/%Y %H:%M:%S").to_string()
    }
}

use chrono::Local;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use focos_dashboard::api::{ApiStatus, FireApi};
use focos_dashboard::charts::{ChartConfig, DashboardCharts};
use focos_dashboard::dashboard::{
    describe_status, load_dashboard, DashboardView, FrpStats, SummaryCards, LOAD_ERROR_MESSAGE,
};
use focos_dashboard::filters::FilterCriteria;
use focos_dashboard::table::{
    PageRange, RecordTable, RowView, LOAD_ERROR_MESSAGE as TABLE_ERROR,
};
use log::{error, warn};
use serde::Serialize;

/// Run the application in headless mode (no UI)
///
/// Loads the dashboard and the first table page once and prints them. A
/// dashboard failure is an error; a table failure is only reported.
pub async fn run_headless(api: &dyn FireApi, filters: &FilterCriteria, json: bool) -> Result<()> {
    let report = build_report(api, filters).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report);
    }

    Ok(())
}

async fn build_report(api: &dyn FireApi, filters: &FilterCriteria) -> Result<HeadlessReport> {
    let data = load_dashboard(api).await.map_err(|e| {
        error!("dashboard load failed: {e}");
        eyre!("{LOAD_ERROR_MESSAGE} ({e})")
    })?;
    let view = DashboardView::new(&data, Local::now());

    let mut table = RecordTable::new();
    match api.occurrences(filters).await {
        Ok(records) => table.load(records),
        Err(e) => {
            error!("table load failed: {e}");
            table.fail(TABLE_ERROR);
        }
    }

    let server = match api.status().await {
        Ok(status) => Some(status),
        Err(e) => {
            warn!("status unavailable: {e}");
            None
        }
    };

    Ok(HeadlessReport {
        server,
        filters: filters.describe(),
        updated_at: view.updated_label(),
        summary: view.cards,
        stats: view.stats,
        charts: view.charts,
        table: HeadlessTable {
            page: table.page(),
            total_pages: table.total_pages(),
            range: table.range(),
            message: table.placeholder().map(str::to_string),
            rows: table.page_rows(),
        },
    })
}

fn render_report(report: &HeadlessReport) {
    println!("\nFocos de Queimadas");
    println!("==================");
    println!("Atualizado em: {}", report.updated_at);
    if let Some(server) = &report.server {
        println!("{}", describe_status(server));
    }
    println!("Total de focos: {}", report.summary.total);
    println!("Estados afetados: {}", report.summary.states);
    println!("Biomas afetados: {}", report.summary.biomes);
    println!("FRP médio: {} MW", report.summary.mean_frp);
    if let Some(stats) = report.stats.line() {
        println!("{stats}");
    }

    let charts = &report.charts;
    for chart in [
        &charts.states,
        &charts.biomes,
        &charts.daily,
        &charts.risk,
        &charts.frp,
    ]
    .into_iter()
    .flatten()
    {
        render_chart(chart);
    }

    let table = &report.table;
    println!("\nFocos ({})", report.filters);
    match &table.message {
        Some(message) => println!("{message}"),
        None => {
            for row in &table.rows {
                println!(
                    "- {} | {} | {} | {} | {} MW | {}",
                    row.municipality,
                    row.state,
                    row.biome,
                    row.date,
                    row.frp,
                    row.risk.label()
                );
            }
        }
    }
    println!(
        "Mostrando {}-{} de {} (página {} de {})",
        table.range.first, table.range.last, table.range.total, table.page, table.total_pages
    );
}

fn render_chart(chart: &ChartConfig) {
    println!("\n{}:", chart.title);
    for point in &chart.points {
        let share = point
            .share
            .map_or_else(String::new, |share| format!(" ({share:.1}%)"));
        println!(
            "- {}: {}{}{share}",
            point.label, point.value, chart.value_suffix
        );
    }
}

#[derive(Serialize)]
struct HeadlessReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    server: Option<ApiStatus>,
    filters: String,
    updated_at: String,
    summary: SummaryCards,
    stats: FrpStats,
    charts: DashboardCharts,
    table: HeadlessTable,
}

#[derive(Serialize)]
struct HeadlessTable {
    page: usize,
    total_pages: usize,
    range: PageRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    rows: Vec<RowView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use focos_dashboard::api::{
        ApiError, BiomeDistribution, DailySeries, Endpoint, FireMetrics, FireRecord, FrpByState,
        RiskDistribution, Tally,
    };
    use std::error::Error;

    /// Canned API; `failing` answers that endpoint with a 503.
    #[derive(Debug, Default)]
    struct CannedApi {
        failing: Option<Endpoint>,
        records: usize,
    }

    impl CannedApi {
        fn check(&self, endpoint: Endpoint) -> Result<(), ApiError> {
            if self.failing == Some(endpoint) {
                return Err(ApiError::Status {
                    endpoint,
                    status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
                });
            }
            Ok(())
        }
    }

    #[async_trait]
    impl FireApi for CannedApi {
        async fn metrics(&self) -> Result<FireMetrics, ApiError> {
            self.check(Endpoint::Metrics)?;
            Ok(FireMetrics {
                total: 4321,
                by_state: Tally::from_pairs([("PARA", 4000.0), ("ACRE", 321.0)]),
                max_frp: Some(310.0),
                ..FireMetrics::default()
            })
        }

        async fn occurrences_by_biome(&self) -> Result<BiomeDistribution, ApiError> {
            self.check(Endpoint::OccurrencesByBiome)?;
            Ok(Tally::from_pairs([("Amazônia", 4321.0)]))
        }

        async fn occurrences_by_day(&self) -> Result<DailySeries, ApiError> {
            self.check(Endpoint::OccurrencesByDay)?;
            Ok(Tally::from_pairs([("2025-11-01", 21.0)]))
        }

        async fn fire_risk(&self) -> Result<RiskDistribution, ApiError> {
            self.check(Endpoint::FireRisk)?;
            Ok(Tally::from_pairs([("Alto", 3.0)]))
        }

        async fn frp_by_state(&self) -> Result<FrpByState, ApiError> {
            self.check(Endpoint::FrpByState)?;
            Ok(Tally::from_pairs([("PARA", 18.0)]))
        }

        async fn states(&self) -> Result<Vec<String>, ApiError> {
            self.check(Endpoint::States)?;
            Ok(Vec::new())
        }

        async fn biomes(&self) -> Result<Vec<String>, ApiError> {
            self.check(Endpoint::Biomes)?;
            Ok(Vec::new())
        }

        async fn occurrences(&self, _: &FilterCriteria) -> Result<Vec<FireRecord>, ApiError> {
            self.check(Endpoint::Occurrences)?;
            Ok((0..self.records)
                .map(|index| FireRecord {
                    municipality: Some(format!("MUNICIPIO {index}")),
                    frp: Some(5.0),
                    ..FireRecord::default()
                })
                .collect())
        }

        async fn alerts(&self) -> Result<Vec<FireRecord>, ApiError> {
            self.check(Endpoint::Alerts)?;
            Ok(Vec::new())
        }

        async fn status(&self) -> Result<ApiStatus, ApiError> {
            self.check(Endpoint::Status)?;
            Ok(ApiStatus {
                status: "online".to_string(),
                dataset_size: 4321,
                ..ApiStatus::default()
            })
        }

        async fn export_csv(&self, _: &FilterCriteria) -> Result<String, ApiError> {
            self.check(Endpoint::ExportCsv)?;
            Ok(String::new())
        }
    }

    #[tokio::test]
    async fn json_report_carries_summary_charts_and_first_page() -> Result<(), Box<dyn Error>> {
        let api = CannedApi {
            records: 70,
            ..CannedApi::default()
        };
        let report = build_report(&api, &FilterCriteria::default()).await?;
        let json = serde_json::to_value(&report)?;

        assert_eq!(json["summary"]["total"], "4.321");
        assert_eq!(json["stats"]["max"], "310.0");
        assert_eq!(json["server"]["status"], "online");
        assert_eq!(json["charts"]["states"]["points"][0]["label"], "PARA");
        assert_eq!(json["table"]["page"], 1);
        assert_eq!(json["table"]["total_pages"], 2);
        assert_eq!(json["table"]["rows"].as_array().map(Vec::len), Some(50));
        assert_eq!(json["table"]["rows"][0]["municipality"], "MUNICIPIO 0");
        assert_eq!(json["table"]["rows"][0]["risk"], "Baixo");
        assert_eq!(json["table"]["rows"][0]["risk_class"], "badge-baixo");
        assert!(json["table"].get("message").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn dashboard_failure_is_an_error() {
        for endpoint in [Endpoint::Metrics, Endpoint::FrpByState] {
            let api = CannedApi {
                failing: Some(endpoint),
                ..CannedApi::default()
            };
            let result = build_report(&api, &FilterCriteria::default()).await;
            assert!(result.is_err(), "{endpoint}");
        }
    }

    #[tokio::test]
    async fn table_and_status_failures_are_only_reported() -> Result<(), Box<dyn Error>> {
        let api = CannedApi {
            failing: Some(Endpoint::Occurrences),
            ..CannedApi::default()
        };
        let report = build_report(&api, &FilterCriteria::default()).await?;
        assert_eq!(report.table.message.as_deref(), Some(TABLE_ERROR));
        assert!(report.table.rows.is_empty());

        let api = CannedApi {
            failing: Some(Endpoint::Status),
            ..CannedApi::default()
        };
        let report = build_report(&api, &FilterCriteria::default()).await?;
        assert!(report.server.is_none());
        Ok(())
    }
}

// HTTP access to the focos API

pub mod client;
pub mod error;
pub mod models;

pub use client::ApiClient;
pub use error::ApiError;
pub use models::{
    ApiStatus, BiomeDistribution, Coverage, DailySeries, FireMetrics, FireRecord, FrpByState,
    RiskDistribution, Tally,
};

use crate::filters::FilterCriteria;
use async_trait::async_trait;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Metrics,
    OccurrencesByBiome,
    OccurrencesByDay,
    FireRisk,
    FrpByState,
    States,
    Biomes,
    Occurrences,
    Alerts,
    Status,
    ExportCsv,
}

impl Endpoint {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Metrics => "/metricas",
            Self::OccurrencesByBiome => "/focos_por_bioma",
            Self::OccurrencesByDay => "/focos_por_dia",
            Self::FireRisk => "/risco_fogo",
            Self::FrpByState => "/frp_estados",
            Self::States => "/estados",
            Self::Biomes => "/biomas",
            Self::Occurrences => "/focos",
            Self::Alerts => "/alertas",
            Self::Status => "/status",
            Self::ExportCsv => "/exportar/csv",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Read-only operations of the focos API.
#[async_trait]
pub trait FireApi: Send + Sync {
    async fn metrics(&self) -> Result<FireMetrics, ApiError>;
    async fn occurrences_by_biome(&self) -> Result<BiomeDistribution, ApiError>;
    async fn occurrences_by_day(&self) -> Result<DailySeries, ApiError>;
    async fn fire_risk(&self) -> Result<RiskDistribution, ApiError>;
    async fn frp_by_state(&self) -> Result<FrpByState, ApiError>;
    async fn states(&self) -> Result<Vec<String>, ApiError>;
    async fn biomes(&self) -> Result<Vec<String>, ApiError>;
    async fn occurrences(&self, filters: &FilterCriteria) -> Result<Vec<FireRecord>, ApiError>;
    async fn alerts(&self) -> Result<Vec<FireRecord>, ApiError>;
    async fn status(&self) -> Result<ApiStatus, ApiError>;
    async fn export_csv(&self, filters: &FilterCriteria) -> Result<String, ApiError>;
}

use chrono::{Days, NaiveDate};
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_LIMIT: u32 = 1000;
/// Length of the default date window, in days back from today.
pub const DEFAULT_WINDOW_DAYS: u64 = 7;
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("start date {start} is after end date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },
    #[error("invalid FRP {0:?}, expected a non-negative number")]
    InvalidFrp(String),
    #[error("minimum FRP {min} is above maximum FRP {max}")]
    InvertedFrpRange { min: f64, max: f64 },
}

/// Server-side FRP criticality filter accepted by `/focos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Criticality {
    Low,
    Medium,
    High,
    Critical,
}

impl Criticality {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "baixa",
            Self::Medium => "media",
            Self::High => "alta",
            Self::Critical => "critica",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Baixa (< 10 MW)",
            Self::Medium => "Média (10-50 MW)",
            Self::High => "Alta (50-100 MW)",
            Self::Critical => "Crítica (> 100 MW)",
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Low),
            1 => Some(Self::Medium),
            2 => Some(Self::High),
            3 => Some(Self::Critical),
            _ => None,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "baixa" => Some(Self::Low),
            "media" | "média" => Some(Self::Medium),
            "alta" => Some(Self::High),
            "critica" | "crítica" => Some(Self::Critical),
            _ => None,
        }
    }
}

/// The filters applied to the occurrence table.
///
/// Dashboard summary endpoints are never scoped by these criteria.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub state: Option<String>,
    pub biome: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub frp_min: Option<f64>,
    pub frp_max: Option<f64>,
    pub criticality: Option<Criticality>,
    pub limit: Option<u32>,
}

impl FilterCriteria {
    /// No state or biome, dates covering the last week up to `today`.
    pub fn last_week(today: NaiveDate) -> Self {
        Self {
            start_date: today.checked_sub_days(Days::new(DEFAULT_WINDOW_DAYS)),
            end_date: Some(today),
            limit: Some(DEFAULT_LIMIT),
            ..Self::default()
        }
    }

    pub fn reset(&mut self, today: NaiveDate) {
        let limit = self.limit;
        *self = Self::last_week(today);
        self.limit = limit.or(Some(DEFAULT_LIMIT));
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    pub fn state(&self) -> Option<&str> {
        non_empty(self.state.as_deref())
    }

    pub fn biome(&self) -> Option<&str> {
        non_empty(self.biome.as_deref())
    }

    pub fn validate(&self) -> Result<(), FilterError> {
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start > end {
                return Err(FilterError::InvertedRange { start, end });
            }
        }
        for bound in [self.frp_min, self.frp_max].into_iter().flatten() {
            if !bound.is_finite() || bound < 0.0 {
                return Err(FilterError::InvalidFrp(bound.to_string()));
            }
        }
        if let (Some(min), Some(max)) = (self.frp_min, self.frp_max) {
            if min > max {
                return Err(FilterError::InvertedFrpRange { min, max });
            }
        }
        Ok(())
    }

    /// Query parameters for `/focos`: only the set fields, `limit` always last.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = self.export_pairs();
        if let Some(min) = self.frp_min {
            pairs.push(("frp_min", min.to_string()));
        }
        if let Some(max) = self.frp_max {
            pairs.push(("frp_max", max.to_string()));
        }
        if let Some(criticality) = self.criticality {
            pairs.push(("criticidade", criticality.as_str().to_string()));
        }
        pairs.push(("limit", self.limit().to_string()));
        pairs
    }

    /// Query parameters understood by `/exportar/csv`.
    pub fn export_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(state) = self.state() {
            pairs.push(("estado", state.to_string()));
        }
        if let Some(biome) = self.biome() {
            pairs.push(("bioma", biome.to_string()));
        }
        if let Some(start) = self.start_date {
            pairs.push(("data_inicio", start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("data_fim", end.format(DATE_FORMAT).to_string()));
        }
        pairs
    }

    /// Short human summary for the header line.
    pub fn describe(&self) -> String {
        let mut parts = vec![
            self.state().unwrap_or("Todos os Estados").to_string(),
            self.biome().unwrap_or("Todos os Biomas").to_string(),
        ];
        match (self.start_date, self.end_date) {
            (None, None) => parts.push("todo o período".to_string()),
            (start, end) => parts.push(format!(
                "{} → {}",
                start.map_or_else(|| "…".to_string(), |d| d.format("%d/%m/%Y").to_string()),
                end.map_or_else(|| "…".to_string(), |d| d.format("%d/%m/%Y").to_string()),
            )),
        }
        match (self.frp_min, self.frp_max) {
            (None, None) => {}
            (Some(min), None) => parts.push(format!("FRP ≥ {min} MW")),
            (None, Some(max)) => parts.push(format!("FRP ≤ {max} MW")),
            (Some(min), Some(max)) => parts.push(format!("FRP {min}-{max} MW")),
        }
        if let Some(criticality) = self.criticality {
            parts.push(criticality.label().to_string());
        }
        parts.join(" · ")
    }
}

/// Empty input clears the date.
pub fn parse_date_input(input: &str) -> Result<Option<NaiveDate>, FilterError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| FilterError::InvalidDate(trimmed.to_string()))
}

/// Empty input clears the bound; a decimal comma is accepted.
pub fn parse_frp_input(input: &str) -> Result<Option<f64>, FilterError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
        .map(Some)
        .ok_or_else(|| FilterError::InvalidFrp(trimmed.to_string()))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

use chrono::NaiveDate;
use clap::Parser;
use env_logger::{Builder, Env};
use log::LevelFilter;
use focos_dashboard::filters::{parse_date_input, Criticality, FilterCriteria, FilterError};

#[derive(Debug, Parser)]
#[command(
    name = "focos-dashboard",
    version,
    about = "Dashboard de focos de queimadas no Brasil"
)]
pub struct CliArgs {
    /// Print the dashboard once and exit
    #[arg(long)]
    pub headless: bool,

    /// Print the headless report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the API base URL
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Directory for CSV exports
    #[arg(long = "export-dir", value_name = "PATH")]
    pub export_dir: Option<String>,

    /// Initial state filter
    #[arg(long, value_name = "UF")]
    pub estado: Option<String>,

    /// Initial biome filter
    #[arg(long, value_name = "BIOMA")]
    pub bioma: Option<String>,

    /// Start date (YYYY-MM-DD), defaults to a week ago
    #[arg(long, value_name = "DATA")]
    pub inicio: Option<String>,

    /// End date (YYYY-MM-DD), defaults to today
    #[arg(long, value_name = "DATA")]
    pub fim: Option<String>,

    /// Minimum FRP (MW) for table rows
    #[arg(long = "frp-min", value_name = "MW")]
    pub frp_min: Option<f64>,

    /// Maximum FRP (MW) for table rows
    #[arg(long = "frp-max", value_name = "MW")]
    pub frp_max: Option<f64>,

    /// Maximum records fetched for the table
    #[arg(long, value_name = "N")]
    pub limit: Option<u32>,

    /// Criticality: baixa, media, alta or critica
    #[arg(long, value_name = "NIVEL", value_parser = parse_criticality)]
    pub criticidade: Option<Criticality>,
}

fn parse_criticality(value: &str) -> Result<Criticality, String> {
    Criticality::parse(value).ok_or_else(|| format!("unknown criticality {value:?}"))
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.api_url {
            std::env::set_var("API_BASE_URL", url);
        }
        if let Some(timeout) = self.timeout {
            std::env::set_var("API_TIMEOUT_SECS", timeout.to_string());
        }
        if let Some(dir) = &self.export_dir {
            std::env::set_var("EXPORT_DIR", dir);
        }
    }

    /// Initial filters: the last week, narrowed by any filter flag given.
    pub fn filters(&self, today: NaiveDate) -> Result<FilterCriteria, FilterError> {
        let mut criteria = FilterCriteria::last_week(today);
        if let Some(state) = &self.estado {
            criteria.state = Some(state.clone());
        }
        if let Some(biome) = &self.bioma {
            criteria.biome = Some(biome.clone());
        }
        if let Some(start) = &self.inicio {
            criteria.start_date = parse_date_input(start)?;
        }
        if let Some(end) = &self.fim {
            criteria.end_date = parse_date_input(end)?;
        }
        if self.frp_min.is_some() {
            criteria.frp_min = self.frp_min;
        }
        if self.frp_max.is_some() {
            criteria.frp_max = self.frp_max;
        }
        if let Some(limit) = self.limit {
            criteria.limit = Some(limit);
        }
        if self.criticidade.is_some() {
            criteria.criticality = self.criticidade;
        }
        criteria.validate()?;
        Ok(criteria)
    }

    /// Logger reading its filter from `env` (`RUST_LOG` in practice), `warn`
    /// when unset. `--debug` overrides the default level either way.
    pub fn log_builder(&self, env: Env<'_>) -> Builder {
        let mut builder = Builder::from_env(env.default_filter_or("warn"));
        if self.debug {
            builder.filter_level(LevelFilter::Debug);
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 8).unwrap_or_default()
    }

    #[test]
    fn defaults_to_last_week() -> Result<(), FilterError> {
        let args = CliArgs::parse_from(["focos-dashboard"]);
        assert_eq!(args.filters(today())?, FilterCriteria::last_week(today()));
        let unset = Env::new().filter("FOCOS_DASHBOARD_TEST_LOG_UNSET");
        assert_eq!(args.log_builder(unset).build().filter(), LevelFilter::Warn);
        Ok(())
    }

    #[test]
    fn filter_flags_narrow_the_query() -> Result<(), FilterError> {
        let args = CliArgs::parse_from([
            "focos-dashboard",
            "--headless",
            "--estado",
            "SP",
            "--inicio",
            "2025-11-01",
            "--limit",
            "200",
            "--criticidade",
            "alta",
        ]);
        let filters = args.filters(today())?;
        assert!(args.headless);
        assert_eq!(filters.state(), Some("SP"));
        assert_eq!(filters.start_date, NaiveDate::from_ymd_opt(2025, 11, 1));
        assert_eq!(filters.limit(), 200);
        assert_eq!(filters.criticality, Some(Criticality::High));
        Ok(())
    }

    #[test]
    fn frp_flags_are_validated() -> Result<(), FilterError> {
        let args = CliArgs::parse_from(["focos-dashboard", "--frp-min", "10", "--frp-max", "250.5"]);
        let filters = args.filters(today())?;
        assert_eq!(filters.frp_min, Some(10.0));
        assert_eq!(filters.frp_max, Some(250.5));

        let inverted = CliArgs::parse_from(["focos-dashboard", "--frp-min", "90", "--frp-max", "9"]);
        assert!(matches!(
            inverted.filters(today()),
            Err(FilterError::InvertedFrpRange { .. })
        ));
        Ok(())
    }

    #[test]
    fn debug_flag_beats_environment_filter() {
        const VAR: &str = "FOCOS_DASHBOARD_TEST_LOG";
        std::env::set_var(VAR, "error");

        let quiet = CliArgs::parse_from(["focos-dashboard"]);
        assert_eq!(
            quiet.log_builder(Env::new().filter(VAR)).build().filter(),
            LevelFilter::Error
        );

        let debug = CliArgs::parse_from(["focos-dashboard", "--debug"]);
        assert_eq!(
            debug.log_builder(Env::new().filter(VAR)).build().filter(),
            LevelFilter::Debug
        );
    }

    #[test]
    fn rejects_unknown_criticality() {
        assert!(CliArgs::try_parse_from(["focos-dashboard", "--criticidade", "extrema"]).is_err());
    }
}

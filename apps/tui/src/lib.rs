// Library side of the dashboard: API access, filters and the view models
// the terminal screens and the headless report are built from.
pub mod api;
pub mod charts;
pub mod config;
pub mod dashboard;
pub mod domain;
pub mod filters;
pub mod format;
pub mod table;

pub use api::{ApiClient, ApiError, FireApi};
pub use config::AppConfig;
pub use dashboard::{load_dashboard, load_filter_options, DashboardData, DashboardView};
pub use domain::Risk;
pub use filters::{Criticality, FilterCriteria};
pub use table::RecordTable;

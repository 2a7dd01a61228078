use chrono::{DateTime, Local};
use color_eyre::Result;
use focos_dashboard::api::{ApiError, ApiStatus, FireApi, FireRecord};
use focos_dashboard::dashboard::{load_dashboard, load_filter_options, DashboardData, FilterOptions};
use focos_dashboard::filters::FilterCriteria;
use log::{debug, info};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadKind {
    Dashboard,
    Table,
    Options,
    Alerts,
    Status,
    Export,
}

impl LoadKind {
    pub const ALL: [Self; 6] = [
        Self::Dashboard,
        Self::Table,
        Self::Options,
        Self::Alerts,
        Self::Status,
        Self::Export,
    ];

    const fn index(self) -> usize {
        match self {
            Self::Dashboard => 0,
            Self::Table => 1,
            Self::Options => 2,
            Self::Alerts => 3,
            Self::Status => 4,
            Self::Export => 5,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "painel",
            Self::Table => "tabela",
            Self::Options => "filtros",
            Self::Alerts => "alertas",
            Self::Status => "status",
            Self::Export => "exportação",
        }
    }
}

#[derive(Debug)]
pub enum LoadOutcome {
    Dashboard(Result<DashboardData, ApiError>),
    Table(Result<Vec<FireRecord>, ApiError>),
    Options(Result<FilterOptions, ApiError>),
    Alerts(Result<Vec<FireRecord>, ApiError>),
    Status(Result<ApiStatus, ApiError>),
    Export(Result<PathBuf>),
}

impl LoadOutcome {
    pub const fn kind(&self) -> LoadKind {
        match self {
            Self::Dashboard(_) => LoadKind::Dashboard,
            Self::Table(_) => LoadKind::Table,
            Self::Options(_) => LoadKind::Options,
            Self::Alerts(_) => LoadKind::Alerts,
            Self::Status(_) => LoadKind::Status,
            Self::Export(_) => LoadKind::Export,
        }
    }
}

/// A finished background load, tagged with the generation it was started under.
#[derive(Debug)]
pub struct LoadEvent {
    pub generation: u64,
    pub outcome: LoadOutcome,
}

/// Tracks the newest request generation per load kind.
///
/// Only the result of the newest request is accepted; anything older that
/// finishes late is dropped.
#[derive(Debug, Default, Clone)]
pub struct LoadFence {
    latest: [u64; LoadKind::ALL.len()],
    in_flight: [bool; LoadKind::ALL.len()],
}

impl LoadFence {
    pub fn begin(&mut self, kind: LoadKind) -> u64 {
        let slot = kind.index();
        self.latest[slot] += 1;
        self.in_flight[slot] = true;
        self.latest[slot]
    }

    pub fn accept(&mut self, kind: LoadKind, generation: u64) -> bool {
        let slot = kind.index();
        if generation != self.latest[slot] {
            return false;
        }
        self.in_flight[slot] = false;
        true
    }

    pub const fn is_loading(&self, kind: LoadKind) -> bool {
        self.in_flight[kind.index()]
    }

    pub fn loading(&self) -> impl Iterator<Item = LoadKind> + '_ {
        LoadKind::ALL
            .into_iter()
            .filter(|kind| self.is_loading(*kind))
    }
}

/// Starts API work on the runtime and reports back over a channel.
#[derive(Clone)]
pub struct AppActions {
    api: Arc<dyn FireApi>,
    tx: UnboundedSender<LoadEvent>,
    pub export_dir: PathBuf,
}

impl std::fmt::Debug for AppActions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppActions")
            .field("export_dir", &self.export_dir)
            .finish_non_exhaustive()
    }
}

impl AppActions {
    pub fn new(api: Arc<dyn FireApi>, export_dir: PathBuf) -> (Self, UnboundedReceiver<LoadEvent>) {
        let (tx, rx) = unbounded_channel();
        (
            Self {
                api,
                tx,
                export_dir,
            },
            rx,
        )
    }

    pub fn refresh_dashboard(&self, generation: u64) {
        let api = Arc::clone(&self.api);
        self.spawn(generation, async move {
            LoadOutcome::Dashboard(load_dashboard(api.as_ref()).await)
        });
    }

    pub fn refresh_table(&self, generation: u64, filters: FilterCriteria) {
        let api = Arc::clone(&self.api);
        self.spawn(generation, async move {
            LoadOutcome::Table(api.occurrences(&filters).await)
        });
    }

    pub fn refresh_options(&self, generation: u64) {
        let api = Arc::clone(&self.api);
        self.spawn(generation, async move {
            LoadOutcome::Options(load_filter_options(api.as_ref()).await)
        });
    }

    pub fn refresh_alerts(&self, generation: u64) {
        let api = Arc::clone(&self.api);
        self.spawn(generation, async move {
            LoadOutcome::Alerts(api.alerts().await)
        });
    }

    pub fn refresh_status(&self, generation: u64) {
        let api = Arc::clone(&self.api);
        self.spawn(generation, async move {
            LoadOutcome::Status(api.status().await)
        });
    }

    pub fn export_csv(&self, generation: u64, filters: FilterCriteria) {
        let api = Arc::clone(&self.api);
        let dir = self.export_dir.clone();
        self.spawn(generation, async move {
            LoadOutcome::Export(write_export(api.as_ref(), &filters, &dir, Local::now()).await)
        });
    }

    fn spawn<F>(&self, generation: u64, work: F)
    where
        F: Future<Output = LoadOutcome> + Send + 'static,
    {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = work.await;
            debug!("{} load #{generation} finished", outcome.kind().label());
            if tx.send(LoadEvent { generation, outcome }).is_err() {
                debug!("load result dropped, UI already closed");
            }
        });
    }
}

pub fn export_file_name(now: DateTime<Local>) -> String {
    format!("incendios_brasil_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

/// Downloads the CSV for `filters` and stores it under `dir`.
pub async fn write_export(
    api: &dyn FireApi,
    filters: &FilterCriteria,
    dir: &Path,
    now: DateTime<Local>,
) -> Result<PathBuf> {
    let body = api.export_csv(filters).await?;
    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(export_file_name(now));
    tokio::fs::write(&path, body).await?;
    info!("exported {}", path.display());
    Ok(path)
}

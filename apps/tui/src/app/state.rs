use crate::app::actions::{AppActions, LoadEvent, LoadFence, LoadKind, LoadOutcome};
use crate::app::form::FilterForm;
use chrono::{Local, NaiveDate};
use focos_dashboard::api::{ApiStatus, FireRecord};
use focos_dashboard::dashboard::{DashboardView, FilterOptions, LOAD_ERROR_MESSAGE};
use focos_dashboard::filters::FilterCriteria;
use focos_dashboard::table::{RecordTable, LOAD_ERROR_MESSAGE as TABLE_ERROR_MESSAGE};
use log::{debug, error, warn};
use throbber_widgets_tui::ThrobberState;
use tokio::sync::mpsc::UnboundedReceiver;

pub const REFRESHING: &str = "Atualizando...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Dashboard,
    Table,
    Alerts,
    Filters,
}

impl AppScreen {
    pub const ALL: [Self; 4] = [Self::Dashboard, Self::Table, Self::Alerts, Self::Filters];

    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Painel",
            Self::Table => "Focos",
            Self::Alerts => "Alertas",
            Self::Filters => "Filtros",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Dashboard => 0,
            Self::Table => 1,
            Self::Alerts => 2,
            Self::Filters => 3,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Dashboard),
            1 => Some(Self::Table),
            2 => Some(Self::Alerts),
            3 => Some(Self::Filters),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub show_help: bool,
    pub status_message: String,
    pub filters: FilterCriteria,
    pub options: FilterOptions,
    pub form: FilterForm,
    pub dashboard: Option<DashboardView>,
    pub table: RecordTable,
    pub alerts: Vec<FireRecord>,
    pub alerts_error: Option<String>,
    pub server: Option<ApiStatus>,
    pub throbber: ThrobberState,
    pub fence: LoadFence,
    pub actions: AppActions,
    pub events: UnboundedReceiver<LoadEvent>,
}

impl App {
    pub fn new(
        actions: AppActions,
        events: UnboundedReceiver<LoadEvent>,
        filters: FilterCriteria,
    ) -> Self {
        let options = FilterOptions::default();
        let form = FilterForm::from_criteria(&filters, &options);
        Self {
            running: true,
            screen: AppScreen::Dashboard,
            show_help: false,
            status_message: String::new(),
            filters,
            options,
            form,
            dashboard: None,
            table: RecordTable::new(),
            alerts: Vec::new(),
            alerts_error: None,
            server: None,
            throbber: ThrobberState::default(),
            fence: LoadFence::default(),
            actions,
            events,
        }
    }

    /// Kicks off every initial load.
    pub fn start(&mut self) {
        self.refresh_options();
        self.refresh_table();
        self.refresh_dashboard();
        self.refresh_alerts();
        self.refresh_status();
    }

    pub fn update(&mut self) {
        if self.is_loading() {
            self.throbber.calc_next();
        }
    }

    pub fn is_loading(&self) -> bool {
        self.fence.loading().next().is_some()
    }

    pub fn refresh_dashboard(&mut self) {
        let generation = self.fence.begin(LoadKind::Dashboard);
        self.actions.refresh_dashboard(generation);
    }

    pub fn refresh_table(&mut self) {
        let generation = self.fence.begin(LoadKind::Table);
        self.actions.refresh_table(generation, self.filters.clone());
    }

    pub fn refresh_options(&mut self) {
        let generation = self.fence.begin(LoadKind::Options);
        self.actions.refresh_options(generation);
    }

    pub fn refresh_alerts(&mut self) {
        let generation = self.fence.begin(LoadKind::Alerts);
        self.actions.refresh_alerts(generation);
    }

    pub fn refresh_status(&mut self) {
        let generation = self.fence.begin(LoadKind::Status);
        self.actions.refresh_status(generation);
    }

    pub fn refresh_all(&mut self) {
        self.refresh_table();
        self.refresh_dashboard();
        self.refresh_alerts();
        self.refresh_status();
    }

    pub fn export_csv(&mut self) {
        let generation = self.fence.begin(LoadKind::Export);
        self.status_message = "Exportando CSV...".to_string();
        self.actions.export_csv(generation, self.filters.clone());
    }

    pub fn switch_screen(&mut self, screen: AppScreen) {
        if screen == AppScreen::Filters && self.screen != AppScreen::Filters {
            self.form = FilterForm::from_criteria(&self.filters, &self.options);
        }
        self.screen = screen;
    }

    /// Validates the form and, when it is consistent, reloads the table and
    /// then the dashboard.
    pub fn apply_filters(&mut self) -> bool {
        match self.form.to_criteria(&self.filters, &self.options) {
            Ok(criteria) => {
                self.filters = criteria;
                self.form.error = None;
                self.status_message = format!("Filtros aplicados: {}", self.filters.describe());
                self.refresh_table();
                self.refresh_dashboard();
                true
            }
            Err(e) => {
                self.form.error = Some(e.to_string());
                false
            }
        }
    }

    /// Clears state and biome, puts the dates back on the last week and applies.
    pub fn reset_filters(&mut self, today: NaiveDate) {
        self.filters.reset(today);
        self.form = FilterForm::from_criteria(&self.filters, &self.options);
        self.apply_filters();
    }

    pub fn handle_load_event(&mut self, event: LoadEvent) {
        let kind = event.outcome.kind();
        if !self.fence.accept(kind, event.generation) {
            debug!(
                "dropping stale {} result #{}",
                kind.label(),
                event.generation
            );
            return;
        }

        match event.outcome {
            LoadOutcome::Dashboard(Ok(data)) => {
                self.dashboard = Some(DashboardView::new(&data, Local::now()));
                if self.status_message == LOAD_ERROR_MESSAGE || self.status_message == REFRESHING {
                    self.status_message.clear();
                }
            }
            LoadOutcome::Dashboard(Err(e)) => {
                error!("dashboard load failed: {e}");
                self.status_message = LOAD_ERROR_MESSAGE.to_string();
            }
            LoadOutcome::Table(Ok(records)) => self.table.load(records),
            LoadOutcome::Table(Err(e)) => {
                error!("table load failed: {e}");
                self.table.fail(TABLE_ERROR_MESSAGE);
            }
            LoadOutcome::Options(Ok(options)) => {
                self.options = options;
                if self.screen == AppScreen::Filters {
                    self.form.refresh_options(&self.options);
                } else {
                    self.form = FilterForm::from_criteria(&self.filters, &self.options);
                }
            }
            LoadOutcome::Options(Err(_)) => {}
            LoadOutcome::Alerts(Ok(alerts)) => {
                self.alerts = alerts;
                self.alerts_error = None;
            }
            LoadOutcome::Alerts(Err(e)) => {
                warn!("alerts load failed: {e}");
                self.alerts_error = Some(e.to_string());
            }
            LoadOutcome::Status(Ok(status)) => self.server = Some(status),
            LoadOutcome::Status(Err(e)) => warn!("status load failed: {e}"),
            LoadOutcome::Export(Ok(path)) => {
                self.status_message = format!("CSV exportado: {}", path.display());
            }
            LoadOutcome::Export(Err(e)) => {
                self.status_message = format!("Falha ao exportar CSV: {e}");
            }
        }
    }

    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.handle_load_event(event);
        }
    }
}

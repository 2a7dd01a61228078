mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::{App, AppActions};
use chrono::Local;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use focos_dashboard::{ApiClient, AppConfig, FireApi};
use log::info;
use std::sync::Arc;

const LOG_FILE: &str = "focos-dashboard.log";

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let headless = args.headless || args.json || !is_terminal();
    init_logging(&args, headless)?;

    let config = AppConfig::from_env()?;
    let filters = args.filters(Local::now().date_naive())?;
    let client = ApiClient::from_config(&config)?;
    info!("using API at {}", client.base_url());
    let api: Arc<dyn FireApi> = Arc::new(client);

    if headless {
        return event::run_headless(api.as_ref(), &filters, args.json).await;
    }

    let (actions, events) = AppActions::new(api, config.export_dir);
    let mut app = App::new(actions, events, filters);

    let mut terminal = terminal::setup()?;
    let result = event::run(&mut terminal, &mut app).await;
    terminal::cleanup(true, true);

    result
}

/// stderr in headless mode; a log file while the TUI owns the screen.
fn init_logging(args: &CliArgs, headless: bool) -> Result<()> {
    let mut builder = args.log_builder(env_logger::Env::default());
    if !headless {
        let file = std::fs::File::create(LOG_FILE)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}

mod analytics;
mod config;
mod db;
mod export;
mod input;
mod logging;
mod models;
mod run;
mod session;
mod store;
mod ui;

use anyhow::Result;
use tracing::info;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = config::Config::load()?;
    let _log_guard = logging::init(&config.log_dir)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        db = %config.db_path.display(),
        "starting finguard"
    );

    let db = db::Database::open(&config.db_path)?;
    let mut session = session::Session::load(db, &config.storage_key);

    match args.len() {
        0 | 1 => run::as_tui(&mut session),
        _ => run::as_cli(&args, &mut session),
    }
}

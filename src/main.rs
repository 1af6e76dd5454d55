mod auth;
mod budget;
mod config;
mod db;
mod error;
mod export;
mod ledger;
mod models;
mod reports;
mod run;

use anyhow::Result;

fn main() -> Result<()> {
    let config = config::Config::from_env()?;
    init_logging(&config.log_filter);

    let args: Vec<String> = std::env::args().collect();
    let db = db::Database::open(&config.db_path)?;
    tracing::debug!(path = %config.db_path.display(), "opened ledger");

    match args.len() {
        1 => run::as_shell(&db),
        2.. => run::as_cli(&args, &db),
        _ => {
            eprintln!("Usage: fintrack [command]");
            Ok(())
        }
    }
}

/// Diagnostics go to stderr so menu and report output stay clean.
fn init_logging(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

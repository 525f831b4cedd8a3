mod db;
mod error;
mod export;
mod ledger;
mod models;
mod run;
mod summary;
mod util;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_logger();
    let args: Vec<String> = std::env::args().collect();
    let result = get_db_path()
        .and_then(|path| db::Store::open(&path))
        .and_then(|store| run::as_cli(&args, &store));
    if let Err(e) = &result {
        tracing::error!("{e:#}");
    }
    result
}

/// Diagnostics go to stderr so command output stays clean. `RUST_LOG`
/// overrides the default level.
fn init_logger() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pocketbook=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn get_db_path() -> Result<std::path::PathBuf> {
    if let Some(path) = std::env::var_os("POCKETBOOK_DB") {
        return Ok(path.into());
    }
    let proj_dirs = directories::ProjectDirs::from("com", "pocketbook", "Pocketbook")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.join("pocketbook.db"))
}

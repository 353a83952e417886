//! QuickFiler - console file manager
//!
//! Main entry point. The shell here is deliberately thin: it renders
//! listings and forwards intents to the engine in filer_core.

mod shell;

use anyhow::Result;
use std::path::PathBuf;

fn main() -> Result<()> {
    // Initialize logging and panic hook first
    filer_log::init()?;

    // Load configuration
    let config = filer_core::AppConfig::load().unwrap_or_default();

    if let Err(e) = filer_log::cleanup_old_logs(config.general.log_retention_days) {
        tracing::warn!("Failed to cleanup old logs: {}", e);
    }

    tracing::info!("QuickFiler starting...");

    let start_dir = config
        .general
        .start_dir
        .clone()
        .or_else(dirs_next::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    let session = filer_core::FilerSession::new(start_dir);
    shell::run(session, &config)
}

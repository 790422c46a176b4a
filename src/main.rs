// src/main.rs
mod cli;
mod commands;
mod logging;

use clap::{CommandFactory, Parser};
use cli::{Args, is_config_operation, is_idle};
use club_standings::error::AppError;
use commands::{
    handle_config_update_command, handle_list_config_command, handle_standings_command,
    handle_sync_command,
};
use logging::setup_logging;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let args = Args::parse();

    if is_idle(&args) {
        Args::command().print_help()?;
        println!();
        return Ok(());
    }

    // Keep the guard alive until the end of main so file logs are flushed
    let (log_file_path, _guard) = setup_logging(&args).await?;
    tracing::info!("Logs are being written to: {log_file_path}");

    if args.list_config {
        return handle_list_config_command().await;
    }

    if is_config_operation(&args) {
        return handle_config_update_command(&args).await;
    }

    if args.sync {
        handle_sync_command().await?;
    }

    if let Some(season_id) = &args.standings {
        handle_standings_command(season_id, args.division.as_deref()).await?;
    }

    Ok(())
}

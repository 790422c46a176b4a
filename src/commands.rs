use crate::cli::Args;
use club_standings::config::{Config, user_prompts::prompt_for_backend_url};
use club_standings::data_fetcher::api::{HttpResultsFeed, HttpSeasonStore, SeasonStore};
use club_standings::display::{render_standings, render_summary};
use club_standings::error::AppError;
use club_standings::reconciler::{LoggingListener, Reconciler};
use club_standings::standings::{
    DivisionStandings, calculate_standings_with_diagnostics, standings_for_season,
};
use crossterm::{execute, terminal::SetTitle};
use std::io::stdout;
use tracing::{info, warn};

const TERMINAL_TITLE: &str = "Club standings";

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    execute!(stdout(), SetTitle(TERMINAL_TITLE))?;
    Config::display().await?;
    Ok(())
}

/// Handles configuration update commands (--config, --set-feed-url,
/// --set-log-file, --clear-log-file).
///
/// An empty `--config` value prompts for the backend URL.
pub async fn handle_config_update_command(args: &Args) -> Result<(), AppError> {
    let config_path = Config::get_config_path();
    let mut config = Config::load_from_path(&config_path)
        .await
        .unwrap_or_default();

    if let Some(new_backend_url) = &args.new_backend_url {
        config.backend_url = if new_backend_url.trim().is_empty() {
            prompt_for_backend_url().await?
        } else {
            new_backend_url.clone()
        };
    }

    if let Some(new_feed_url) = &args.new_feed_url {
        config.feed_url = new_feed_url.clone();
    }

    if let Some(new_log_path) = &args.new_log_file_path {
        config.log_file_path = Some(new_log_path.clone());
    } else if args.clear_log_file_path {
        config.log_file_path = None;
        println!("Custom log file path cleared. Using default location.");
    }

    config.validate()?;
    config.save().await?;
    println!("Config updated successfully!");

    Ok(())
}

/// Handles --sync: reconciles every season with the results feed and prints
/// a summary.
///
/// Partial failures (one season not saved) are reported but do not make the
/// command fail. A run that could not start at all does.
pub async fn handle_sync_command() -> Result<(), AppError> {
    let config = Config::load().await?;
    let store = HttpSeasonStore::from_config(&config)?;
    let feed = HttpResultsFeed::from_config(&config)?;

    let reconciler = Reconciler::new(store, feed).with_listener(LoggingListener);
    let result = reconciler.run().await;

    execute!(stdout(), SetTitle(TERMINAL_TITLE))?;
    render_summary(&mut stdout(), &result)?;

    // Season write failures always come with changes; errors without any
    // change mean the run never started
    if result.changes.is_empty()
        && let Some(error) = result.errors.first()
    {
        return Err(AppError::sync_aborted(error.clone()));
    }

    info!(
        "Sync done: {} updated, {} error(s)",
        result.updated_count,
        result.errors.len()
    );
    Ok(())
}

/// Handles --standings: prints the tables of one season, optionally limited
/// to a single division.
pub async fn handle_standings_command(
    season_id: &str,
    division_id: Option<&str>,
) -> Result<(), AppError> {
    let config = Config::load().await?;
    let store = HttpSeasonStore::from_config(&config)?;
    let season = store.fetch_season(season_id).await?;

    let divisions: Vec<DivisionStandings> = match division_id {
        Some(division_id) => {
            let division = season
                .division(division_id)
                .ok_or_else(|| AppError::division_not_found(season_id, division_id))?;
            vec![DivisionStandings {
                division_id: division.id.clone(),
                division_name: division.name.clone(),
                table: calculate_standings_with_diagnostics(division, season.matches()),
            }]
        }
        None => standings_for_season(&season),
    };

    for division in &divisions {
        let unparsable = division.table.unparsable().count();
        if unparsable > 0 {
            warn!(
                "Division {}: {unparsable} match(es) with unreadable scores ignored",
                division.division_id
            );
        }
    }

    execute!(stdout(), SetTitle(TERMINAL_TITLE))?;
    let label = if season.label.is_empty() {
        season.id.clone()
    } else {
        season.label.clone()
    };
    render_standings(&mut stdout(), &label, &divisions)?;
    Ok(())
}

use clap::Parser;
use clap::builder::styling::{AnsiColor, Effects, Styles};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Returns true when the arguments only touch the configuration file
pub fn is_config_operation(args: &Args) -> bool {
    args.new_backend_url.is_some()
        || args.new_feed_url.is_some()
        || args.new_log_file_path.is_some()
        || args.clear_log_file_path
}

/// Returns true when no action was requested and help should be printed
pub fn is_idle(args: &Args) -> bool {
    !args.sync && args.standings.is_none() && !args.list_config && !is_config_operation(args)
}

/// Club championship standings and results synchronization
///
/// Computes division standings from the season calendars stored in the club
/// backend, and pulls played scores from the external results feed into
/// those calendars.
///
/// Examples:
/// - `club_standings --sync` reconciles every season with the feed
/// - `club_standings --standings 2024` prints the tables of season 2024
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Reconcile every season calendar with the external results feed and
    /// save the changed calendars back to the backend.
    #[arg(short, long, help_heading = "Actions")]
    pub sync: bool,

    /// Print the standings of every division of the given season.
    #[arg(long, value_name = "SEASON_ID", help_heading = "Actions")]
    pub standings: Option<String>,

    /// Restrict --standings to a single division.
    #[arg(
        long,
        short = 'd',
        value_name = "DIVISION_ID",
        requires = "standings",
        help_heading = "Actions"
    )]
    pub division: Option<String>,

    /// Update the backend URL in config. Will prompt for a new URL if not provided.
    #[arg(
        long = "config",
        help_heading = "Configuration",
        value_name = "BACKEND_URL",
        num_args = 0..=1,
        default_missing_value = ""
    )]
    pub new_backend_url: Option<String>,

    /// Update the results feed URL in config.
    #[arg(long = "set-feed-url", value_name = "URL", help_heading = "Configuration")]
    pub new_feed_url: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", help_heading = "Configuration")]
    pub new_log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", help_heading = "Configuration")]
    pub clear_log_file_path: bool,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Also write logs to the terminal.
    #[arg(long = "debug", help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_config_flag_without_value() {
        let args = Args::try_parse_from(["club_standings", "--config"]).unwrap();
        assert_eq!(args.new_backend_url.as_deref(), Some(""));
        assert!(is_config_operation(&args));
        assert!(!is_idle(&args));
    }

    #[test]
    fn test_division_requires_standings() {
        assert!(Args::try_parse_from(["club_standings", "--division", "D1"]).is_err());

        let args =
            Args::try_parse_from(["club_standings", "--standings", "2024", "-d", "D1"]).unwrap();
        assert_eq!(args.standings.as_deref(), Some("2024"));
        assert_eq!(args.division.as_deref(), Some("D1"));
    }

    #[test]
    fn test_no_action_is_idle() {
        let args = Args::try_parse_from(["club_standings", "--debug"]).unwrap();
        assert!(is_idle(&args));
    }
}

//! Application-wide constants and configuration values
//!
//! This module centralizes the magic strings and numbers shared by the
//! standings calculator, the reconciler and the configuration layer.

/// Default timeout for HTTP requests in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Default location of the external results feed
pub const DEFAULT_FEED_URL: &str = "https://php-api-psi.vercel.app/api/matches.php";

/// Directory name used under the platform config dir
pub const APP_DIR_NAME: &str = "club_standings";

/// Default log file name
pub const LOG_FILE_NAME: &str = "club_standings.log";

/// Environment variable names that override config file values
pub mod env_vars {
    pub const BACKEND_URL: &str = "CLUB_STANDINGS_BACKEND_URL";
    pub const FEED_URL: &str = "CLUB_STANDINGS_FEED_URL";
    pub const LOG_FILE: &str = "CLUB_STANDINGS_LOG_FILE";
    pub const HTTP_TIMEOUT: &str = "CLUB_STANDINGS_HTTP_TIMEOUT";
}

/// Score codes stored in the `score` field of a match
pub mod score_codes {
    /// Home side forfeits
    pub const HOME_FORFEIT: &str = "ff-d";
    /// Away side forfeits
    pub const AWAY_FORFEIT: &str = "ff-e";
    /// General forfeit codes, the match does not count for anybody
    pub const GENERAL_FORFEITS: [&str; 3] = ["fg", "fg-d", "fg-e"];
    /// Compared case-insensitively, both as a score and inside team names
    pub const BYE: &str = "bye";
}

/// Points awarded per match outcome
pub mod points {
    pub const WIN: u32 = 3;
    pub const DRAW: u32 = 2;
    pub const LOSS: u32 = 1;
    pub const FORFEIT_WIN: u32 = 3;
    pub const FORFEIT_LOSS: u32 = 0;
}

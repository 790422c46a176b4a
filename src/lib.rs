//! Club championship standings and results synchronization library
//!
//! This library computes division standings from season calendars and keeps
//! those calendars in sync with an external results feed.
//!
//! # Examples
//!
//! ```rust,no_run
//! use club_standings::config::Config;
//! use club_standings::data_fetcher::api::{HttpResultsFeed, HttpSeasonStore};
//! use club_standings::error::AppError;
//! use club_standings::reconciler::{LoggingListener, Reconciler};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let store = HttpSeasonStore::from_config(&config)?;
//!     let feed = HttpResultsFeed::from_config(&config)?;
//!
//!     // Pull played scores from the feed into every season calendar
//!     let reconciler = Reconciler::new(store, feed).with_listener(LoggingListener);
//!     let result = reconciler.run().await;
//!
//!     println!(
//!         "{} match(es) updated, {} saved",
//!         result.updated_count,
//!         result.committed_count()
//!     );
//!     for error in &result.errors {
//!         eprintln!("{error}");
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! Standings are pure computations over already loaded data:
//!
//! ```rust
//! use club_standings::data_fetcher::models::{Division, Match, Team};
//! use club_standings::standings::calculate_standings;
//!
//! let team = |name: &str| Team {
//!     name: name.to_string(),
//!     division_id: "D1".to_string(),
//!     ..Default::default()
//! };
//! let division = Division {
//!     id: "D1".to_string(),
//!     name: "Division 1".to_string(),
//!     teams: vec![team("Club A I"), team("Club B I")],
//! };
//! let played = Match {
//!     division_id: "D1".to_string(),
//!     home: "Club A I".to_string(),
//!     away: "Club B I".to_string(),
//!     score: "10-6".to_string(),
//!     ..Default::default()
//! };
//!
//! let table = calculate_standings(&division, &[played]);
//! assert_eq!(table[0].team, "Club A I");
//! assert_eq!(table[0].points, 3);
//! assert_eq!(table[1].points, 1);
//! ```

pub mod config;
pub mod constants;
pub mod data_fetcher;
pub mod display;
pub mod error;
pub mod reconciler;
pub mod standings;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::api::{HttpResultsFeed, HttpSeasonStore, ResultsFeed, SeasonStore};
pub use data_fetcher::models::{Division, ExternalMatchRecord, Match, Score, Season, Team};
pub use error::AppError;
pub use reconciler::{Reconciler, ReconciliationResult};
pub use standings::{StandingsEntry, StandingsTable, calculate_standings, standings_for_season};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

pub mod common;
pub mod feed;
pub mod score;
pub mod season;

pub use common::{calendar_day, normalize_team_name};
pub use feed::{ExternalMatchRecord, FeedResponse};
pub use score::{Score, ScoreParseError, Side, VoidReason};
pub use season::{Division, Match, Season, SeasonStatus, Team, WireObject, is_bye_slot};

pub mod api;
pub mod models;

pub use api::{HttpResultsFeed, HttpSeasonStore, ResultsFeed, SeasonStore};
pub use models::{Division, ExternalMatchRecord, Match, Score, Season, Team};

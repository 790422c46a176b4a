//! Season standings: ranked tables per division.

pub mod calculator;
pub mod head_to_head;

pub use calculator::{
    SkipReason, SkippedMatch, StandingsEntry, StandingsTable, calculate_standings,
    calculate_standings_with_diagnostics,
};
pub use head_to_head::{Duel, HeadToHead};

use crate::data_fetcher::models::Season;

/// Table of one division inside a season
#[derive(Debug, Clone)]
pub struct DivisionStandings {
    pub division_id: String,
    pub division_name: String,
    pub table: StandingsTable,
}

/// Computes the table of every division of `season`, in the season's
/// division order.
pub fn standings_for_season(season: &Season) -> Vec<DivisionStandings> {
    season
        .divisions
        .iter()
        .map(|division| DivisionStandings {
            division_id: division.id.clone(),
            division_name: division.name.clone(),
            table: calculate_standings_with_diagnostics(division, season.matches()),
        })
        .collect()
}

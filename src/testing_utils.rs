use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

use crate::data_fetcher::api::{ResultsFeed, SeasonStore};
use crate::data_fetcher::models::{
    Division, ExternalMatchRecord, Match, Season, SeasonStatus, Team,
};
use crate::error::AppError;

/// Test utilities for creating seasons, matches and feed records
pub struct TestDataBuilder;

impl TestDataBuilder {
    /// Creates a division whose roster holds the given team names
    pub fn division(id: &str, team_names: &[&str]) -> Division {
        Division {
            id: id.to_string(),
            name: format!("Division {id}"),
            teams: team_names
                .iter()
                .map(|name| Team {
                    id: None,
                    name: name.to_string(),
                    division_id: id.to_string(),
                })
                .collect(),
        }
    }

    /// Creates a match with the given raw score. An empty `id` gives a match without id.
    pub fn scored_match(id: &str, division: &str, home: &str, away: &str, score: &str) -> Match {
        Match {
            id: (!id.is_empty()).then(|| id.to_string()),
            division_id: division.to_string(),
            round: Some(1),
            home: home.to_string(),
            away: away.to_string(),
            score: score.to_string(),
            date: "2024-01-15".to_string(),
            ..Default::default()
        }
    }

    /// Creates a feed record; team names are given as `(club, team)` pairs
    pub fn feed_record(
        match_id: &str,
        division: &str,
        date: &str,
        home: (&str, &str),
        away: (&str, &str),
        score: &str,
    ) -> ExternalMatchRecord {
        ExternalMatchRecord {
            match_id: (!match_id.is_empty()).then(|| match_id.to_string()),
            match_unique_id: None,
            date: date.to_string(),
            home_club: home.0.to_string(),
            home_team: home.1.to_string(),
            away_club: away.0.to_string(),
            away_team: away.1.to_string(),
            division_id: division.to_string(),
            score: score.to_string(),
            individual_scores: None,
        }
    }

    /// Creates an ongoing season with a calendar
    pub fn season(id: &str, divisions: Vec<Division>, matches: Vec<Match>) -> Season {
        Season {
            id: id.to_string(),
            label: format!("Season {id}"),
            status: SeasonStatus::Ongoing,
            divisions,
            calendar: Some(matches),
        }
    }
}

/// In-memory [`SeasonStore`]. Saved calendars replace the stored ones so a
/// second run sees the first run's writes.
#[derive(Debug, Default)]
pub struct MemorySeasonStore {
    seasons: Mutex<Vec<Season>>,
    saved: Mutex<Vec<(String, Vec<Match>)>>,
    failing: HashSet<String>,
}

impl MemorySeasonStore {
    pub fn new(seasons: Vec<Season>) -> Self {
        Self {
            seasons: Mutex::new(seasons),
            ..Default::default()
        }
    }

    /// Makes every write for `season_id` fail with a server error
    pub fn failing_for(mut self, season_id: &str) -> Self {
        self.failing.insert(season_id.to_string());
        self
    }

    /// Calendars written so far, in write order
    pub fn saved_calendars(&self) -> Vec<(String, Vec<Match>)> {
        self.saved.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn seasons(&self) -> Vec<Season> {
        self.seasons.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl SeasonStore for MemorySeasonStore {
    async fn fetch_seasons(&self) -> Result<Vec<Season>, AppError> {
        Ok(self.seasons())
    }

    async fn save_calendar(&self, season_id: &str, calendar: &[Match]) -> Result<(), AppError> {
        if self.failing.contains(season_id) {
            return Err(AppError::api_server_error(
                500,
                "write rejected",
                format!("memory://saisons/{season_id}"),
            ));
        }

        let mut seasons = self.seasons.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(season) = seasons.iter_mut().find(|s| s.id == season_id) {
            season.calendar = Some(calendar.to_vec());
        }
        self.saved
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((season_id.to_string(), calendar.to_vec()));
        Ok(())
    }
}

/// In-memory [`ResultsFeed`]
#[derive(Debug, Default)]
pub struct MemoryFeed {
    records: Vec<ExternalMatchRecord>,
    failure: Option<String>,
}

impl MemoryFeed {
    pub fn new(records: Vec<ExternalMatchRecord>) -> Self {
        Self {
            records,
            failure: None,
        }
    }

    /// A feed that is never reachable
    pub fn failing(message: &str) -> Self {
        Self {
            records: vec![],
            failure: Some(message.to_string()),
        }
    }
}

impl ResultsFeed for MemoryFeed {
    async fn fetch_records(&self) -> Result<Vec<ExternalMatchRecord>, AppError> {
        match &self.failure {
            Some(message) => Err(AppError::network_connection("memory://feed", message.clone())),
            None => Ok(self.records.clone()),
        }
    }
}

use super::common::{normalize_team_name, opt_string_or_number, string_or_null, string_or_number};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One match as published by the external results feed
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ExternalMatchRecord {
    #[serde(rename = "matchId", default, deserialize_with = "opt_string_or_number")]
    pub match_id: Option<String>,
    #[serde(rename = "matchUniqueId", default, deserialize_with = "opt_string_or_number")]
    pub match_unique_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_null")]
    pub date: String,
    #[serde(rename = "homeClub", default, deserialize_with = "string_or_null")]
    pub home_club: String,
    #[serde(rename = "homeTeam", default, deserialize_with = "string_or_null")]
    pub home_team: String,
    #[serde(rename = "awayClub", default, deserialize_with = "string_or_null")]
    pub away_club: String,
    #[serde(rename = "awayTeam", default, deserialize_with = "string_or_null")]
    pub away_team: String,
    #[serde(rename = "divisionId", default, deserialize_with = "string_or_number")]
    pub division_id: String,
    #[serde(default, deserialize_with = "string_or_null")]
    pub score: String,
    #[serde(rename = "scoresIndividuels", default, skip_serializing_if = "Option::is_none")]
    pub individual_scores: Option<Value>,
}

impl ExternalMatchRecord {
    /// Normalized "club team" name of the home side
    pub fn normalized_home(&self) -> String {
        normalize_team_name(&format!("{} {}", self.home_club, self.home_team))
    }

    /// Normalized "club team" name of the away side
    pub fn normalized_away(&self) -> String {
        normalize_team_name(&format!("{} {}", self.away_club, self.away_team))
    }

    pub fn has_score(&self) -> bool {
        !self.score.trim().is_empty()
    }
}

/// The feed answers either with a bare array or wrapped in `{ "data": [...] }`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FeedResponse {
    Wrapped { data: Vec<ExternalMatchRecord> },
    Bare(Vec<ExternalMatchRecord>),
}

impl FeedResponse {
    pub fn into_records(self) -> Vec<ExternalMatchRecord> {
        match self {
            FeedResponse::Wrapped { data } => data,
            FeedResponse::Bare(records) => records,
        }
    }
}

//! Pairing of local calendar matches with external feed records.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::data_fetcher::models::{ExternalMatchRecord, Match, calendar_day, normalize_team_name};

/// Which rule paired a local match with a feed record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// `matchId` or `matchUniqueId` equals the local id
    Id,
    /// Same calendar day, same division and same team pair
    Fuzzy,
}

struct IndexedRecord<'a> {
    record: &'a ExternalMatchRecord,
    day: Option<NaiveDate>,
    home: String,
    away: String,
}

/// Feed records prepared for repeated lookups: ids are hashed and team names
/// and dates are normalized once.
pub struct FeedIndex<'a> {
    records: Vec<IndexedRecord<'a>>,
    by_id: HashMap<&'a str, usize>,
}

impl<'a> FeedIndex<'a> {
    pub fn new(records: &'a [ExternalMatchRecord]) -> Self {
        let mut by_id: HashMap<&'a str, usize> = HashMap::new();
        let mut indexed = Vec::with_capacity(records.len());

        for (i, record) in records.iter().enumerate() {
            // First record wins when two share an id
            for id in [&record.match_id, &record.match_unique_id].into_iter().flatten() {
                by_id.entry(id.as_str()).or_insert(i);
            }
            indexed.push(IndexedRecord {
                record,
                day: calendar_day(&record.date),
                home: record.normalized_home(),
                away: record.normalized_away(),
            });
        }

        Self {
            records: indexed,
            by_id,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finds the feed record for `local`, trying the id rule first and the
    /// fuzzy rule only when no record carries the local id.
    pub fn find(&self, local: &Match) -> Option<(&'a ExternalMatchRecord, MatchRule)> {
        if let Some(record) = self.find_by_id(local) {
            return Some((record, MatchRule::Id));
        }
        self.find_fuzzy(local).map(|record| (record, MatchRule::Fuzzy))
    }

    fn find_by_id(&self, local: &Match) -> Option<&'a ExternalMatchRecord> {
        let id = local.id.as_deref().filter(|id| !id.is_empty())?;
        self.by_id.get(id).map(|&i| self.records[i].record)
    }

    fn find_fuzzy(&self, local: &Match) -> Option<&'a ExternalMatchRecord> {
        let day = calendar_day(&local.date)?;
        let home = normalize_team_name(&local.home);
        let away = normalize_team_name(&local.away);
        if home.is_empty() || away.is_empty() {
            return None;
        }

        self.records
            .iter()
            .find(|candidate| {
                candidate.day == Some(day)
                    && candidate.record.division_id == local.division_id
                    && ((candidate.home == home && candidate.away == away)
                        || (candidate.home == away && candidate.away == home))
            })
            .map(|candidate| candidate.record)
    }
}

use serde_json::Value;

use super::matching::MatchRule;
use super::notifications::{MatchUpdateEvent, MatchUpdates};

/// A score change detected in memory and not yet confirmed by the store
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChange {
    pub season_id: String,
    /// Match id, or a key derived from the team names
    pub match_key: String,
    pub previous_score: String,
    pub score: String,
    pub individual_scores: Option<Value>,
    pub rule: MatchRule,
}

impl PendingChange {
    pub fn event(&self) -> MatchUpdateEvent {
        MatchUpdateEvent {
            match_id: self.match_key.clone(),
            season_id: self.season_id.clone(),
            updates: MatchUpdates {
                score: self.score.clone(),
                individual_scores: self.individual_scores.clone(),
                season_id: self.season_id.clone(),
            },
        }
    }

    pub fn settle(self, outcome: ChangeOutcome) -> SettledChange {
        SettledChange {
            change: self,
            outcome,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeOutcome {
    /// The season calendar holding this change was saved
    Committed,
    /// The season write failed; the change is not stored remotely
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SettledChange {
    pub change: PendingChange,
    pub outcome: ChangeOutcome,
}

impl SettledChange {
    pub fn is_committed(&self) -> bool {
        self.outcome == ChangeOutcome::Committed
    }
}

/// An external score that was applied even though it does not decode to a
/// known result. Standings will ignore the match until it is corrected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreDiagnostic {
    pub season_id: String,
    pub match_key: String,
    pub raw_score: String,
}

/// Summary of one reconciliation run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconciliationResult {
    /// Number of matches whose score was changed, whether or not the season
    /// write succeeded afterwards
    pub updated_count: usize,
    /// Human-readable errors, in the order they happened
    pub errors: Vec<String>,
    /// Keys of local matches with no feed counterpart, without duplicates
    pub unmatched_keys: Vec<String>,
    pub changes: Vec<SettledChange>,
    pub diagnostics: Vec<ScoreDiagnostic>,
}

impl ReconciliationResult {
    /// Result of a run that could not start (season list or feed unavailable)
    pub fn aborted(error: impl Into<String>) -> Self {
        Self {
            errors: vec![error.into()],
            ..Default::default()
        }
    }

    pub fn record_unmatched(&mut self, key: String) {
        if !self.unmatched_keys.contains(&key) {
            self.unmatched_keys.push(key);
        }
    }

    pub fn committed_count(&self) -> usize {
        self.changes.iter().filter(|c| c.is_committed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.changes.len() - self.committed_count()
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(key: &str) -> PendingChange {
        PendingChange {
            season_id: "s1".to_string(),
            match_key: key.to_string(),
            previous_score: String::new(),
            score: "10-6".to_string(),
            individual_scores: None,
            rule: MatchRule::Id,
        }
    }

    #[test]
    fn test_record_unmatched_is_idempotent() {
        let mut result = ReconciliationResult::default();
        result.record_unmatched("m1".to_string());
        result.record_unmatched("m2".to_string());
        result.record_unmatched("m1".to_string());

        assert_eq!(result.unmatched_keys, vec!["m1", "m2"]);
    }

    #[test]
    fn test_counts() {
        let mut result = ReconciliationResult {
            updated_count: 3,
            ..Default::default()
        };
        result.changes.push(change("m1").settle(ChangeOutcome::Committed));
        result.changes.push(change("m2").settle(ChangeOutcome::Committed));
        result
            .changes
            .push(change("m3").settle(ChangeOutcome::Failed("boom".to_string())));

        assert_eq!(result.committed_count(), 2);
        assert_eq!(result.failed_count(), 1);
    }

    #[test]
    fn test_aborted() {
        let result = ReconciliationResult::aborted("feed down");
        assert_eq!(result.updated_count, 0);
        assert_eq!(result.errors, vec!["feed down"]);
        assert!(!result.is_clean());
    }

    #[test]
    fn test_event_from_change() {
        let event = change("m1").event();
        assert_eq!(event.match_id, "m1");
        assert_eq!(event.updates.season_id, "s1");
        assert_eq!(event.updates.score, "10-6");
    }
}

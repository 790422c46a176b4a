//! Synchronization of locally scheduled matches with the external results feed.
//!
//! A run loads every season and the feed, pairs each calendar match with a
//! feed record (see [`matching`]), and collects score changes per season.
//! Changes are applied to a copy of the season calendar; the copy is written
//! back in a single request per season and only replaces the in-memory
//! calendar once the store confirmed the write. A failed write is reported
//! for that season and the remaining seasons carry on.

pub mod matching;
pub mod notifications;
pub mod outcome;

pub use matching::{FeedIndex, MatchRule};
pub use notifications::{
    ChannelListener, LoggingListener, MatchUpdateEvent, MatchUpdateListener, MatchUpdates,
    NotificationHub, SeasonSettled,
};
pub use outcome::{
    ChangeOutcome, PendingChange, ReconciliationResult, ScoreDiagnostic, SettledChange,
};

use tracing::{debug, error, info, instrument, warn};

use crate::data_fetcher::api::{ResultsFeed, SeasonStore};
use crate::data_fetcher::models::{ExternalMatchRecord, Match, Score, Season};
use crate::error::AppError;

/// Changes found for one season, applied to a copy of its calendar
#[derive(Debug, Clone, Default)]
pub struct SeasonPlan {
    pub calendar: Vec<Match>,
    pub changes: Vec<PendingChange>,
    pub unmatched: Vec<String>,
    pub diagnostics: Vec<ScoreDiagnostic>,
}

/// Pairs every match of `calendar` with the feed and builds the updated
/// calendar. Does not touch the season itself.
///
/// A match is updated when its feed record carries a non-empty score that
/// differs from the stored one. Matches without a feed record are listed in
/// `unmatched`; matches whose record has no new score are left alone.
pub fn plan_season(season_id: &str, calendar: &[Match], index: &FeedIndex<'_>) -> SeasonPlan {
    let mut plan = SeasonPlan {
        calendar: calendar.to_vec(),
        ..Default::default()
    };

    for local in plan.calendar.iter_mut() {
        let Some((record, rule)) = index.find(local) else {
            debug!("No feed record for match {}", local.match_key());
            plan.unmatched.push(local.match_key());
            continue;
        };

        if !record.has_score() || record.score == local.score {
            continue;
        }

        let change = apply_record(season_id, local, record, rule);
        if Score::parse(&change.score).is_err() {
            warn!(
                "Feed score {:?} for match {} does not decode, standings will skip it",
                change.score, change.match_key
            );
            plan.diagnostics.push(ScoreDiagnostic {
                season_id: season_id.to_string(),
                match_key: change.match_key.clone(),
                raw_score: change.score.clone(),
            });
        }
        plan.changes.push(change);
    }

    plan
}

fn apply_record(
    season_id: &str,
    local: &mut Match,
    record: &ExternalMatchRecord,
    rule: MatchRule,
) -> PendingChange {
    debug!(
        "Match {} ({:?} rule): {:?} -> {:?}",
        local.match_key(),
        rule,
        local.score,
        record.score
    );

    let previous_score = std::mem::replace(&mut local.score, record.score.clone());
    if record.individual_scores.is_some() {
        local.individual_scores = record.individual_scores.clone();
    }

    PendingChange {
        season_id: season_id.to_string(),
        match_key: local.match_key(),
        previous_score,
        score: record.score.clone(),
        individual_scores: record.individual_scores.clone(),
        rule,
    }
}

/// Runs reconciliations against a season store and a results feed
#[derive(Debug)]
pub struct Reconciler<S, F> {
    store: S,
    feed: F,
    notifications: NotificationHub,
}

impl<S: SeasonStore, F: ResultsFeed> Reconciler<S, F> {
    pub fn new(store: S, feed: F) -> Self {
        Self {
            store,
            feed,
            notifications: NotificationHub::new(),
        }
    }

    pub fn with_listener(mut self, listener: impl MatchUpdateListener + 'static) -> Self {
        self.notifications.subscribe(listener);
        self
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationHub {
        &mut self.notifications
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Loads seasons and feed, then reconciles every season.
    ///
    /// Never fails: if the season list or the feed cannot be loaded the
    /// result carries that single error and zero updates.
    #[instrument(skip(self))]
    pub async fn run(&self) -> ReconciliationResult {
        let result = async {
            let mut seasons = self
                .store
                .fetch_seasons()
                .await
                .map_err(AppError::season_fetch)?;
            let records = self
                .feed
                .fetch_records()
                .await
                .map_err(AppError::feed_fetch)?;
            Ok::<_, AppError>(self.reconcile_seasons(&mut seasons, &records).await)
        }
        .await;

        match result {
            Ok(result) => result,
            Err(e) => {
                error!("Reconciliation aborted: {e}");
                ReconciliationResult::aborted(e.to_string())
            }
        }
    }

    /// Reconciles already loaded seasons against feed records, one season at
    /// a time. A season's calendar is replaced only after its write succeeded.
    pub async fn reconcile_seasons(
        &self,
        seasons: &mut [Season],
        records: &[ExternalMatchRecord],
    ) -> ReconciliationResult {
        let index = FeedIndex::new(records);
        let mut result = ReconciliationResult::default();

        info!(
            "Reconciling {} season(s) against {} feed record(s)",
            seasons.len(),
            index.len()
        );

        for season in seasons.iter_mut() {
            self.reconcile_season(season, &index, &mut result).await;
        }

        info!(
            "Reconciliation finished: {} updated, {} committed, {} error(s), {} unmatched",
            result.updated_count,
            result.committed_count(),
            result.errors.len(),
            result.unmatched_keys.len()
        );

        result
    }

    async fn reconcile_season(
        &self,
        season: &mut Season,
        index: &FeedIndex<'_>,
        result: &mut ReconciliationResult,
    ) {
        let Some(calendar) = season.calendar.as_deref() else {
            debug!("Season {} has no calendar, skipping", season.id);
            return;
        };

        let plan = plan_season(&season.id, calendar, index);
        for key in plan.unmatched {
            result.record_unmatched(key);
        }
        result.diagnostics.extend(plan.diagnostics);
        result.updated_count += plan.changes.len();

        if plan.changes.is_empty() {
            return;
        }

        info!(
            "Season {}: {} match(es) changed, saving calendar",
            season.id,
            plan.changes.len()
        );

        for change in &plan.changes {
            self.notifications.publish(&change.event());
        }

        let changes = plan.changes.len();
        let saved = self.store.save_calendar(&season.id, &plan.calendar).await;
        let (outcome, error) = match saved {
            Ok(()) => {
                season.calendar = Some(plan.calendar);
                (ChangeOutcome::Committed, None)
            }
            Err(e) => {
                let error = AppError::season_persist(&season.id, e.to_string()).to_string();
                warn!("{error}");
                result.errors.push(error.clone());
                (ChangeOutcome::Failed(error.clone()), Some(error))
            }
        };

        result.changes.extend(
            plan.changes
                .into_iter()
                .map(|change| change.settle(outcome.clone())),
        );

        self.notifications.publish_settled(&SeasonSettled {
            season_id: season.id.clone(),
            changes,
            error,
        });
    }
}

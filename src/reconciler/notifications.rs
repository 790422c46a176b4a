//! Change notifications published while reconciling.
//!
//! Listeners are registered on a [`NotificationHub`] that the reconciler owns.
//! Every listener is invoked synchronously, in registration order, as soon as
//! a change is detected and before its season is written back. Delivery is
//! fire-and-forget: listeners cannot fail the reconciliation.

use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

/// Fields of a match that changed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchUpdates {
    pub score: String,
    #[serde(rename = "scoresIndividuels", skip_serializing_if = "Option::is_none")]
    pub individual_scores: Option<Value>,
    #[serde(rename = "saisonId")]
    pub season_id: String,
}

/// Published once per changed match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchUpdateEvent {
    #[serde(rename = "matchId")]
    pub match_id: String,
    #[serde(rename = "saisonId")]
    pub season_id: String,
    pub updates: MatchUpdates,
}

/// Published once per season after its calendar write resolved
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonSettled {
    pub season_id: String,
    pub changes: usize,
    /// `None` when the write was confirmed
    pub error: Option<String>,
}

impl SeasonSettled {
    pub fn committed(&self) -> bool {
        self.error.is_none()
    }
}

pub trait MatchUpdateListener: Send + Sync {
    /// Called for every detected change, ahead of persistence.
    fn on_match_updated(&self, event: &MatchUpdateEvent);

    /// Called once the season holding the changes was written, or failed to be.
    fn on_season_settled(&self, _settled: &SeasonSettled) {}
}

#[derive(Default)]
pub struct NotificationHub {
    listeners: Vec<Box<dyn MatchUpdateListener>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl MatchUpdateListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn publish(&self, event: &MatchUpdateEvent) {
        debug!(
            "Publishing update of match {} (season {}) to {} listener(s)",
            event.match_id,
            event.season_id,
            self.listeners.len()
        );
        for listener in &self.listeners {
            listener.on_match_updated(event);
        }
    }

    pub fn publish_settled(&self, settled: &SeasonSettled) {
        for listener in &self.listeners {
            listener.on_season_settled(settled);
        }
    }
}

impl std::fmt::Debug for NotificationHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationHub")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Forwards events into an unbounded channel, e.g. for a live scoreboard
/// task. Events are dropped silently once the receiver is gone.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    sender: UnboundedSender<MatchUpdateEvent>,
}

impl ChannelListener {
    pub fn new(sender: UnboundedSender<MatchUpdateEvent>) -> Self {
        Self { sender }
    }
}

impl MatchUpdateListener for ChannelListener {
    fn on_match_updated(&self, event: &MatchUpdateEvent) {
        if self.sender.send(event.clone()).is_err() {
            debug!("Update receiver dropped, discarding event for match {}", event.match_id);
        }
    }
}

/// Writes every event to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingListener;

impl MatchUpdateListener for LoggingListener {
    fn on_match_updated(&self, event: &MatchUpdateEvent) {
        info!(
            "Match {} of season {}: score \"{}\"",
            event.match_id, event.season_id, event.updates.score
        );
    }

    fn on_season_settled(&self, settled: &SeasonSettled) {
        match &settled.error {
            None => info!(
                "Season {} saved ({} change(s))",
                settled.season_id, settled.changes
            ),
            Some(error) => warn!(
                "Season {} not saved, {} change(s) lost: {}",
                settled.season_id, settled.changes, error
            ),
        }
    }
}

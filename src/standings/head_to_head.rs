use std::cmp::Ordering;
use std::collections::HashMap;

/// Results of one team against one opponent. Draws are not tracked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Duel {
    pub won: u32,
    pub lost: u32,
}

/// Per-team, per-opponent tally of wins and losses, forfeits included
#[derive(Debug, Clone, Default)]
pub struct HeadToHead {
    duels: HashMap<(String, String), Duel>,
}

impl HeadToHead {
    pub fn record_win(&mut self, winner: &str, loser: &str) {
        self.duels
            .entry((winner.to_string(), loser.to_string()))
            .or_default()
            .won += 1;
        self.duels
            .entry((loser.to_string(), winner.to_string()))
            .or_default()
            .lost += 1;
    }

    pub fn duel(&self, team: &str, opponent: &str) -> Duel {
        self.duels
            .get(&(team.to_string(), opponent.to_string()))
            .copied()
            .unwrap_or_default()
    }

    /// Pairwise tie-break: `Less` when `a` beat `b` and `b` never beat `a`,
    /// `Greater` for the reverse, `Equal` otherwise.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let a_won = self.duel(a, b).won;
        let b_won = self.duel(b, a).won;

        match (a_won > 0, b_won > 0) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }
}

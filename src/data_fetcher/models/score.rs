//! Decoding of the string-encoded `score` field.
//!
//! The store and the external feed both exchange scores as plain strings that
//! mix numeric results (`"10-6"`) with forfeit and void codes. Everything in
//! the crate that needs to reason about a result decodes it once into
//! [`Score`] instead of inspecting the raw string.

use crate::constants::score_codes;
use std::fmt;
use thiserror::Error;

/// Which side of a fixture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// Why a match does not count for anybody
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoidReason {
    /// `fg`, `fg-d` or `fg-e`
    GeneralForfeit,
    /// The literal `bye` marker
    Bye,
}

/// A decoded match result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Score {
    Played { home: u32, away: u32 },
    Forfeit { by: Side },
    Void(VoidReason),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized score: {raw:?}")]
pub struct ScoreParseError {
    pub raw: String,
}

impl Score {
    /// Decodes a raw score string.
    ///
    /// Returns `Ok(None)` for an empty (or whitespace-only) score, which is how
    /// unplayed fixtures are stored.
    ///
    /// Parsing is strict: both sides must be whole numbers, so `3-`, `3-1-2`
    /// and `3.0-1` are errors rather than being read as `3-0` or `3-1`.
    pub fn parse(raw: &str) -> Result<Option<Score>, ScoreParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        if score_codes::GENERAL_FORFEITS.contains(&trimmed) {
            return Ok(Some(Score::Void(VoidReason::GeneralForfeit)));
        }
        if trimmed.eq_ignore_ascii_case(score_codes::BYE) {
            return Ok(Some(Score::Void(VoidReason::Bye)));
        }
        if trimmed == score_codes::HOME_FORFEIT {
            return Ok(Some(Score::Forfeit { by: Side::Home }));
        }
        if trimmed == score_codes::AWAY_FORFEIT {
            return Ok(Some(Score::Forfeit { by: Side::Away }));
        }

        let unrecognized = || ScoreParseError {
            raw: raw.to_string(),
        };

        let (home, away) = trimmed.split_once('-').ok_or_else(unrecognized)?;
        let home = home.trim().parse::<u32>().map_err(|_| unrecognized())?;
        let away = away.trim().parse::<u32>().map_err(|_| unrecognized())?;

        Ok(Some(Score::Played { home, away }))
    }

    /// The winning side, if the result has one
    pub fn winner(&self) -> Option<Side> {
        match *self {
            Score::Played { home, away } if home > away => Some(Side::Home),
            Score::Played { home, away } if home < away => Some(Side::Away),
            Score::Played { .. } | Score::Void(_) => None,
            Score::Forfeit { by } => Some(by.opponent()),
        }
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Score::Played { home, away } => write!(f, "{home}-{away}"),
            Score::Forfeit { by: Side::Home } => f.write_str(score_codes::HOME_FORFEIT),
            Score::Forfeit { by: Side::Away } => f.write_str(score_codes::AWAY_FORFEIT),
            Score::Void(VoidReason::GeneralForfeit) => f.write_str("fg"),
            Score::Void(VoidReason::Bye) => f.write_str(score_codes::BYE),
        }
    }
}

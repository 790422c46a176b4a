// Ranking table computation for a single division.

use std::collections::HashMap;

use serde::Serialize;

use super::head_to_head::HeadToHead;
use crate::constants::points;
use crate::data_fetcher::models::{Division, Match, Score, Side, VoidReason};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StandingsEntry {
    pub team: String,
    pub played: u32,
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub points: u32,
    /// 1-based rank
    pub position: usize,
}

impl StandingsEntry {
    fn new(team: &str) -> Self {
        Self {
            team: team.to_string(),
            ..Default::default()
        }
    }

    fn add_win(&mut self, points: u32) {
        self.played += 1;
        self.wins += 1;
        self.points += points;
    }

    fn add_draw(&mut self) {
        self.played += 1;
        self.draws += 1;
        self.points += points::DRAW;
    }

    fn add_loss(&mut self, points: u32) {
        self.played += 1;
        self.losses += 1;
        self.points += points;
    }
}

/// Why a scored match did not contribute to the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// General forfeit or `bye` score
    Void(VoidReason),
    /// One side is a bye slot
    ByeSlot,
    /// One side is not on the division roster
    UnknownTeam(String),
    /// The score could not be decoded
    Unparsable(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMatch {
    pub match_key: String,
    pub reason: SkipReason,
}

/// Ranked table plus the matches that were left out of it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StandingsTable {
    pub entries: Vec<StandingsEntry>,
    pub skipped: Vec<SkippedMatch>,
}

impl StandingsTable {
    /// Matches whose score could not be decoded
    pub fn unparsable(&self) -> impl Iterator<Item = &SkippedMatch> {
        self.skipped
            .iter()
            .filter(|s| matches!(s.reason, SkipReason::Unparsable(_)))
    }
}

/// Computes the ranked table of `division` from the season calendar.
///
/// Pure and deterministic: matches of other divisions, unscored matches and
/// matches that cannot count are ignored, and every roster team gets an entry.
pub fn calculate_standings(division: &Division, matches: &[Match]) -> Vec<StandingsEntry> {
    calculate_standings_with_diagnostics(division, matches).entries
}

/// Same as [`calculate_standings`] but also reports every scored match of the
/// division that was left out of the table and why.
pub fn calculate_standings_with_diagnostics(
    division: &Division,
    matches: &[Match],
) -> StandingsTable {
    let mut entries: Vec<StandingsEntry> = Vec::with_capacity(division.teams.len());
    let mut index: HashMap<&str, usize> = HashMap::new();
    for team in &division.teams {
        if !index.contains_key(team.name.as_str()) {
            index.insert(team.name.as_str(), entries.len());
            entries.push(StandingsEntry::new(&team.name));
        }
    }

    let mut head_to_head = HeadToHead::default();
    let mut skipped = Vec::new();
    let mut skip = |m: &Match, reason: SkipReason| {
        skipped.push(SkippedMatch {
            match_key: m.match_key(),
            reason,
        });
    };

    for m in matches
        .iter()
        .filter(|m| m.division_id == division.id && m.has_score())
    {
        let decoded = m.decoded_score();

        if let Ok(Some(Score::Void(reason))) = decoded {
            skip(m, SkipReason::Void(reason));
            continue;
        }
        if m.involves_bye() {
            skip(m, SkipReason::ByeSlot);
            continue;
        }

        let (home_idx, away_idx) = match (index.get(m.home.as_str()), index.get(m.away.as_str())) {
            (Some(&h), Some(&a)) => (h, a),
            (None, _) => {
                skip(m, SkipReason::UnknownTeam(m.home.clone()));
                continue;
            }
            (_, None) => {
                skip(m, SkipReason::UnknownTeam(m.away.clone()));
                continue;
            }
        };

        let score = match decoded {
            Ok(Some(score)) => score,
            Ok(None) => continue,
            Err(e) => {
                skip(m, SkipReason::Unparsable(e.raw));
                continue;
            }
        };

        match score {
            Score::Forfeit { by } => {
                let (loser, winner) = match by {
                    Side::Home => (home_idx, away_idx),
                    Side::Away => (away_idx, home_idx),
                };
                entries[loser].add_loss(points::FORFEIT_LOSS);
                entries[winner].add_win(points::FORFEIT_WIN);
                head_to_head.record_win(&entries[winner].team, &entries[loser].team);
            }
            Score::Played { home, away } if home == away => {
                entries[home_idx].add_draw();
                entries[away_idx].add_draw();
            }
            Score::Played { home, away } => {
                let (winner, loser) = if home > away {
                    (home_idx, away_idx)
                } else {
                    (away_idx, home_idx)
                };
                entries[winner].add_win(points::WIN);
                entries[loser].add_loss(points::LOSS);
                head_to_head.record_win(&entries[winner].team, &entries[loser].team);
            }
            Score::Void(reason) => skip(m, SkipReason::Void(reason)),
        }
    }

    rank(&mut entries, &head_to_head);

    StandingsTable { entries, skipped }
}

/// Orders entries by points, then settles equal-points runs with the pairwise
/// head-to-head rule, then numbers the positions.
///
/// The pairwise rule is not transitive for three or more tied teams. The
/// insertion pass only swaps neighbours the rule orders strictly, so roster
/// order is kept wherever it has nothing to say.
fn rank(entries: &mut [StandingsEntry], head_to_head: &HeadToHead) {
    entries.sort_by(|a, b| b.points.cmp(&a.points));

    let mut start = 0;
    while start < entries.len() {
        let points = entries[start].points;
        let end = start
            + entries[start..]
                .iter()
                .take_while(|e| e.points == points)
                .count();
        settle_tie(&mut entries[start..end], head_to_head);
        start = end;
    }

    for (i, entry) in entries.iter_mut().enumerate() {
        entry.position = i + 1;
    }
}

fn settle_tie(run: &mut [StandingsEntry], head_to_head: &HeadToHead) {
    for i in 1..run.len() {
        let mut j = i;
        while j > 0 && head_to_head.compare(&run[j - 1].team, &run[j].team).is_gt() {
            run.swap(j - 1, j);
            j -= 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    fn entry<'a>(entries: &'a [StandingsEntry], team: &str) -> &'a StandingsEntry {
        entries.iter().find(|e| e.team == team).unwrap()
    }

    fn division() -> Division {
        TestDataBuilder::division("D1", &["Club A I", "Club B II", "Club C I", "Club D III"])
    }

    #[test]
    fn test_empty_division_has_zero_rows_per_team() {
        let entries = calculate_standings(&division(), &[]);

        assert_eq!(entries.len(), 4);
        for (i, e) in entries.iter().enumerate() {
            assert_eq!((e.played, e.wins, e.draws, e.losses, e.points), (0, 0, 0, 0, 0));
            assert_eq!(e.position, i + 1);
        }
        // Roster order is kept when nothing separates the teams
        assert_eq!(entries[0].team, "Club A I");
        assert_eq!(entries[3].team, "Club D III");
    }

    #[test]
    fn test_home_win() {
        let matches = vec![TestDataBuilder::scored_match("m1", "D1", "Club A I", "Club B II", "3-1")];
        let entries = calculate_standings(&division(), &matches);

        let home = entry(&entries, "Club A I");
        assert_eq!((home.played, home.wins, home.losses, home.points), (1, 1, 0, 3));
        let away = entry(&entries, "Club B II");
        assert_eq!((away.played, away.wins, away.losses, away.points), (1, 0, 1, 1));
        assert_eq!(entries[0].team, "Club A I");
    }

    #[test]
    fn test_away_win() {
        let matches = vec![TestDataBuilder::scored_match("m1", "D1", "Club A I", "Club B II", "6-10")];
        let entries = calculate_standings(&division(), &matches);

        assert_eq!(entry(&entries, "Club A I").points, 1);
        assert_eq!(entry(&entries, "Club B II").points, 3);
        assert_eq!(entries[0].team, "Club B II");
    }

    #[test]
    fn test_draw() {
        let matches = vec![TestDataBuilder::scored_match("m1", "D1", "Club A I", "Club B II", "2-2")];
        let entries = calculate_standings(&division(), &matches);

        for team in ["Club A I", "Club B II"] {
            let e = entry(&entries, team);
            assert_eq!((e.played, e.draws, e.points), (1, 1, 2));
        }
    }

    #[test]
    fn test_home_forfeit() {
        let matches = vec![TestDataBuilder::scored_match("m1", "D1", "Club A I", "Club B II", "ff-d")];
        let entries = calculate_standings(&division(), &matches);

        let home = entry(&entries, "Club A I");
        assert_eq!((home.played, home.losses, home.points), (1, 1, 0));
        let away = entry(&entries, "Club B II");
        assert_eq!((away.played, away.wins, away.points), (1, 1, 3));
    }

    #[test]
    fn test_away_forfeit() {
        let matches = vec![TestDataBuilder::scored_match("m1", "D1", "Club A I", "Club B II", "ff-e")];
        let entries = calculate_standings(&division(), &matches);

        assert_eq!(entry(&entries, "Club A I").points, 3);
        assert_eq!(entry(&entries, "Club B II").points, 0);
        assert_eq!(entry(&entries, "Club B II").losses, 1);
    }

    #[test]
    fn test_void_matches_count_for_nobody() {
        let matches = vec![
            TestDataBuilder::scored_match("m1", "D1", "Club A I", "Club B II", "fg"),
            TestDataBuilder::scored_match("m2", "D1", "Club A I", "Club B II", "fg-d"),
            TestDataBuilder::scored_match("m3", "D1", "Club C I", "Club D III", "Bye"),
            TestDataBuilder::scored_match("m4", "D1", "Club C I", "BYE", "10-0"),
        ];
        let table = calculate_standings_with_diagnostics(&division(), &matches);

        for e in &table.entries {
            assert_eq!((e.played, e.points), (0, 0), "team {}", e.team);
        }
        assert_eq!(table.skipped.len(), 4);
        assert_eq!(table.skipped[3].reason, SkipReason::ByeSlot);
    }

    #[test]
    fn test_unparsable_score_is_skipped_but_reported() {
        let matches = vec![
            TestDataBuilder::scored_match("m1", "D1", "Club A I", "Club B II", "10-6"),
            TestDataBuilder::scored_match("m2", "D1", "Club C I", "Club D III", "reporté"),
        ];
        let table = calculate_standings_with_diagnostics(&division(), &matches);

        assert_eq!(entry(&table.entries, "Club C I").played, 0);
        let unparsable: Vec<_> = table.unparsable().collect();
        assert_eq!(unparsable.len(), 1);
        assert_eq!(unparsable[0].match_key, "m2");
        assert_eq!(unparsable[0].reason, SkipReason::Unparsable("reporté".to_string()));
    }

    #[test]
    fn test_other_divisions_and_unscored_matches_are_ignored() {
        let matches = vec![
            TestDataBuilder::scored_match("m1", "D2", "Club A I", "Club B II", "10-6"),
            TestDataBuilder::scored_match("m2", "D1", "Club A I", "Club B II", ""),
        ];
        let table = calculate_standings_with_diagnostics(&division(), &matches);

        assert!(table.entries.iter().all(|e| e.played == 0));
        assert!(table.skipped.is_empty());
    }

    #[test]
    fn test_team_outside_roster_is_skipped() {
        let matches = vec![TestDataBuilder::scored_match("m1", "D1", "Club A I", "Club Z I", "10-6")];
        let table = calculate_standings_with_diagnostics(&division(), &matches);

        assert_eq!(entry(&table.entries, "Club A I").played, 0);
        assert_eq!(
            table.skipped[0].reason,
            SkipReason::UnknownTeam("Club Z I".to_string())
        );
    }

    #[test]
    fn test_played_is_sum_of_outcomes() {
        let matches = vec![
            TestDataBuilder::scored_match("m1", "D1", "Club A I", "Club B II", "10-6"),
            TestDataBuilder::scored_match("m2", "D1", "Club C I", "Club D III", "8-8"),
            TestDataBuilder::scored_match("m3", "D1", "Club A I", "Club C I", "ff-e"),
            TestDataBuilder::scored_match("m4", "D1", "Club B II", "Club D III", "4-12"),
            TestDataBuilder::scored_match("m5", "D1", "Club D III", "Club A I", "7-9"),
        ];
        let entries = calculate_standings(&division(), &matches);

        for e in &entries {
            assert_eq!(e.played, e.wins + e.draws + e.losses, "team {}", e.team);
        }
        assert_eq!(entry(&entries, "Club A I").points, 9);
    }

    #[test]
    fn test_head_to_head_breaks_two_way_tie() {
        // B and A both end on 4 points; A beat B directly.
        let division = TestDataBuilder::division("D1", &["Club B II", "Club A I", "Club C I"]);
        let matches = vec![
            TestDataBuilder::scored_match("m1", "D1", "Club A I", "Club B II", "9-7"),
            TestDataBuilder::scored_match("m2", "D1", "Club C I", "Club A I", "10-6"),
            TestDataBuilder::scored_match("m3", "D1", "Club B II", "Club C I", "ff-e"),
        ];
        let entries = calculate_standings(&division, &matches);

        assert_eq!(entry(&entries, "Club A I").points, 4);
        assert_eq!(entry(&entries, "Club B II").points, 4);
        assert_eq!(entries[0].team, "Club A I");
        assert_eq!(entries[1].team, "Club B II");
        assert_eq!(entries[1].position, 2);
    }

    #[test]
    fn test_split_head_to_head_keeps_prior_order() {
        let division = TestDataBuilder::division("D1", &["Club B II", "Club A I"]);
        let matches = vec![
            TestDataBuilder::scored_match("m1", "D1", "Club A I", "Club B II", "9-7"),
            TestDataBuilder::scored_match("m2", "D1", "Club B II", "Club A I", "9-7"),
        ];
        let entries = calculate_standings(&division, &matches);

        assert_eq!(entries[0].team, "Club B II");
        assert_eq!(entries[1].team, "Club A I");
    }

    #[test]
    fn test_three_way_cycle_is_deterministic() {
        // A beat B, B beat C, C beat A: every team on 4 points.
        let division = TestDataBuilder::division("D1", &["Club A I", "Club B II", "Club C I"]);
        let matches = vec![
            TestDataBuilder::scored_match("m1", "D1", "Club A I", "Club B II", "9-7"),
            TestDataBuilder::scored_match("m2", "D1", "Club B II", "Club C I", "9-7"),
            TestDataBuilder::scored_match("m3", "D1", "Club C I", "Club A I", "9-7"),
        ];

        let first = calculate_standings(&division, &matches);
        let second = calculate_standings(&division, &matches);

        assert_eq!(first, second);
        assert!(first.iter().all(|e| e.points == 4));
    }

    #[test]
    fn test_duplicate_roster_names_collapse() {
        let division = TestDataBuilder::division("D1", &["Club A I", "Club A I", "Club B II"]);
        let entries = calculate_standings(&division, &[]);
        assert_eq!(entries.len(), 2);
    }
}

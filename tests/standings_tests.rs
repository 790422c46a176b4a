use club_standings::data_fetcher::models::{Season, VoidReason};
use club_standings::standings::{SkipReason, standings_for_season};
use serde_json::json;

fn fixture(id: &str, division: &str, home: &str, away: &str, score: &str) -> serde_json::Value {
    json!({
        "id": id,
        "serieId": division,
        "domicile": home,
        "exterieur": away,
        "score": score,
        "date": "2024-02-10"
    })
}

fn season() -> Season {
    serde_json::from_value(json!({
        "id": 2024,
        "label": "Championnat 2024",
        "statut": "En cours",
        "series": [
            {
                "id": 11,
                "nom": "Départementale 1",
                "equipes": [
                    { "nom": "Club A I", "serieId": 11 },
                    { "nom": "Club B I", "serieId": 11 },
                    { "nom": "Club C I", "serieId": 11 },
                    { "nom": "Club D I", "serieId": 11 }
                ]
            },
            {
                "id": 12,
                "nom": "Départementale 2",
                "equipes": [
                    { "nom": "Club E I", "serieId": 12 },
                    { "nom": "Club F I", "serieId": 12 }
                ]
            }
        ],
        "calendrier": [
            fixture("1", "11", "Club B I", "Club C I", "4-12"),
            fixture("2", "11", "Club B I", "Club A I", "9-7"),
            fixture("3", "11", "Club C I", "Club D I", "5-11"),
            fixture("4", "11", "Club A I", "BYE", "10-0"),
            fixture("5", "11", "Club D I", "Club A I", "fg"),
            fixture("6", "11", "Club A I", "Club C I", "abc"),
            fixture("7", "11", "Club A I", "Club Z I", "10-6"),
            fixture("8", "11", "Club A I", "Club D I", ""),
            fixture("9", "12", "Club E I", "Club F I", "ff-d")
        ]
    }))
    .unwrap()
}

#[test]
fn test_full_season_standings() {
    let tables = standings_for_season(&season());
    assert_eq!(tables.len(), 2);

    let d1 = &tables[0];
    assert_eq!(d1.division_name, "Départementale 1");

    let order: Vec<_> = d1
        .table
        .entries
        .iter()
        .map(|e| (e.team.as_str(), e.points, e.position))
        .collect();
    // B and C are level on points, C won their meeting
    assert_eq!(
        order,
        vec![
            ("Club C I", 4, 1),
            ("Club B I", 4, 2),
            ("Club D I", 3, 3),
            ("Club A I", 1, 4),
        ]
    );

    for entry in &d1.table.entries {
        assert_eq!(entry.played, entry.wins + entry.draws + entry.losses);
    }

    let reasons: Vec<_> = d1
        .table
        .skipped
        .iter()
        .map(|s| (s.match_key.as_str(), s.reason.clone()))
        .collect();
    assert_eq!(
        reasons,
        vec![
            ("4", SkipReason::ByeSlot),
            ("5", SkipReason::Void(VoidReason::GeneralForfeit)),
            ("6", SkipReason::Unparsable("abc".to_string())),
            ("7", SkipReason::UnknownTeam("Club Z I".to_string())),
        ]
    );
    assert_eq!(d1.table.unparsable().count(), 1);
}

#[test]
fn test_forfeit_scores_three_and_zero() {
    let tables = standings_for_season(&season());
    let d2 = &tables[1];

    let f = &d2.table.entries[0];
    assert_eq!((f.team.as_str(), f.wins, f.points), ("Club F I", 1, 3));
    let e = &d2.table.entries[1];
    assert_eq!((e.team.as_str(), e.losses, e.points), ("Club E I", 1, 0));
}

#[test]
fn test_season_without_calendar_gives_zero_tables() {
    let mut season = season();
    season.calendar = None;

    let tables = standings_for_season(&season);

    assert!(
        tables
            .iter()
            .flat_map(|t| t.table.entries.iter())
            .all(|e| e.played == 0 && e.points == 0)
    );
    assert_eq!(tables[0].table.entries[0].team, "Club A I");
}

use super::common::{lenient_u32, opt_string_or_number, string_or_null, string_or_number};
use super::score::{Score, ScoreParseError};
use crate::constants::score_codes;
use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SeasonStatus {
    #[serde(rename = "En cours")]
    Ongoing,
    #[serde(rename = "Terminée")]
    Finished,
    #[serde(rename = "Archivée")]
    Archived,
    #[serde(rename = "À venir")]
    Upcoming,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Team {
    #[serde(default, deserialize_with = "opt_string_or_number", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "nom")]
    pub name: String,
    #[serde(rename = "serieId", default, deserialize_with = "string_or_number")]
    pub division_id: String,
}

/// A single competitive group inside a season
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Division {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(rename = "nom", default)]
    pub name: String,
    #[serde(rename = "equipes", default)]
    pub teams: Vec<Team>,
}

/// A calendar entry.
///
/// Decoding keeps the JSON object exactly as the store sent it. Encoding
/// writes that object back and replaces only the fields whose typed value
/// changed, so numeric ids stay numbers and `null` stays `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Match {
    pub id: Option<String>,
    pub division_id: String,
    pub round: Option<u32>,
    pub home: String,
    pub away: String,
    pub score: String,
    pub date: String,
    pub individual_scores: Option<Value>,
    /// The object as received, including fields this crate does not interpret
    pub wire: WireObject,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WireObject {
    object: Map<String, Value>,
    decoded: MatchFields,
}

impl WireObject {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.object.get(key)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
struct MatchFields {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    id: Option<String>,
    #[serde(rename = "serieId", default, deserialize_with = "string_or_number")]
    division_id: String,
    #[serde(rename = "semaine", default, deserialize_with = "lenient_u32")]
    round: Option<u32>,
    #[serde(rename = "domicile", default, deserialize_with = "string_or_null")]
    home: String,
    #[serde(rename = "exterieur", default, deserialize_with = "string_or_null")]
    away: String,
    #[serde(default, deserialize_with = "string_or_null")]
    score: String,
    #[serde(default, deserialize_with = "string_or_null")]
    date: String,
    #[serde(rename = "scoresIndividuels", default)]
    individual_scores: Option<Value>,
}

impl<'de> Deserialize<'de> for Match {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let object = Map::<String, Value>::deserialize(deserializer)?;
        let decoded = MatchFields::deserialize(&Value::Object(object.clone()))
            .map_err(de::Error::custom)?;

        let MatchFields {
            id,
            division_id,
            round,
            home,
            away,
            score,
            date,
            individual_scores,
        } = decoded.clone();

        Ok(Match {
            id,
            division_id,
            round,
            home,
            away,
            score,
            date,
            individual_scores,
            wire: WireObject { object, decoded },
        })
    }
}

impl Serialize for Match {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.wire_object()
            .map_err(ser::Error::custom)?
            .serialize(serializer)
    }
}

impl Match {
    fn wire_object(&self) -> Result<Map<String, Value>, serde_json::Error> {
        let original = &self.wire.decoded;
        let mut object = self.wire.object.clone();

        overlay(&mut object, "id", &original.id, &self.id)?;
        overlay(&mut object, "serieId", &original.division_id, &self.division_id)?;
        overlay(&mut object, "semaine", &original.round, &self.round)?;
        overlay(&mut object, "domicile", &original.home, &self.home)?;
        overlay(&mut object, "exterieur", &original.away, &self.away)?;
        overlay(&mut object, "score", &original.score, &self.score)?;
        overlay(&mut object, "date", &original.date, &self.date)?;
        overlay(
            &mut object,
            "scoresIndividuels",
            &original.individual_scores,
            &self.individual_scores,
        )?;

        Ok(object)
    }
}

/// Writes `current` under `key` when it differs from what was decoded.
/// A value that encodes to `null` removes the key.
fn overlay<T>(
    object: &mut Map<String, Value>,
    key: &str,
    original: &T,
    current: &T,
) -> Result<(), serde_json::Error>
where
    T: PartialEq + Serialize,
{
    if original == current {
        return Ok(());
    }
    match serde_json::to_value(current)? {
        Value::Null => {
            object.remove(key);
        }
        value => {
            object.insert(key.to_string(), value);
        }
    }
    Ok(())
}

impl Match {
    /// Decodes the stored score. `Ok(None)` means the match has no result yet.
    pub fn decoded_score(&self) -> Result<Option<Score>, ScoreParseError> {
        Score::parse(&self.score)
    }

    pub fn has_score(&self) -> bool {
        !self.score.trim().is_empty()
    }

    /// Whether either side is a bye slot rather than a real team
    pub fn involves_bye(&self) -> bool {
        is_bye_slot(&self.home) || is_bye_slot(&self.away)
    }

    /// Identifier used when reporting on this match: its id, or a key built
    /// from the team names when the match has none.
    pub fn match_key(&self) -> String {
        match self.id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                let home = if self.home.is_empty() { "na" } else { &self.home };
                let away = if self.away.is_empty() { "na" } else { &self.away };
                format!("<unknown:{home} vs {away}>")
            }
        }
    }
}

pub fn is_bye_slot(team_name: &str) -> bool {
    team_name.to_lowercase().contains(score_codes::BYE)
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Season {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "statut", default)]
    pub status: SeasonStatus,
    #[serde(rename = "series", default)]
    pub divisions: Vec<Division>,
    /// `None` when the store has no calendar for this season at all
    #[serde(rename = "calendrier", default, skip_serializing_if = "Option::is_none")]
    pub calendar: Option<Vec<Match>>,
}

impl Season {
    pub fn division(&self, division_id: &str) -> Option<&Division> {
        self.divisions.iter().find(|d| d.id == division_id)
    }

    pub fn matches(&self) -> &[Match] {
        self.calendar.as_deref().unwrap_or(&[])
    }
}

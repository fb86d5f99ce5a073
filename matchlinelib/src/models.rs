//! Typed shapes for event-API responses.
//!
//! The API adds season-specific score fields to several shapes, so those
//! are modelled as a fixed typed prefix plus an open extension map
//! (`#[serde(flatten)] extra`) rather than as closed structs. The generic
//! query/render engine never sees these types; they back the typed CLI
//! report and the server's row shaping.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Match phase within a tournament.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TournamentLevel {
    None,
    Practice,
    Qualification,
    Playoff,
}

impl TournamentLevel {
    /// The phases a full-event query fans out to, in schedule order.
    pub const ALL: [TournamentLevel; 3] = [
        TournamentLevel::Practice,
        TournamentLevel::Qualification,
        TournamentLevel::Playoff,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TournamentLevel::None => "None",
            TournamentLevel::Practice => "Practice",
            TournamentLevel::Qualification => "Qualification",
            TournamentLevel::Playoff => "Playoff",
        }
    }
}

impl std::str::FromStr for TournamentLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(TournamentLevel::None),
            "practice" => Ok(TournamentLevel::Practice),
            "qualification" | "qual" => Ok(TournamentLevel::Qualification),
            "playoff" => Ok(TournamentLevel::Playoff),
            _ => Err(format!("unknown tournament level: {}", s)),
        }
    }
}

/// Season summary: game name, kickoff, counts, plus championship entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    pub game_name: String,
    pub kickoff: String,
    pub event_count: u32,
    pub team_count: u32,
    pub rookie_start: u32,
    #[serde(default)]
    pub frc_championships: Vec<ChampionshipEvent>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Reduced event record as it appears inside a season summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionshipEvent {
    pub name: String,
    pub start_date: String,
    pub location: String,
}

/// A competition event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub stateprov: String,
    #[serde(default)]
    pub country: String,
    pub date_start: String,
    pub date_end: String,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One scheduled match.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledMatch {
    pub description: String,
    pub start_time: String,
    pub match_number: u32,
    #[serde(default)]
    pub field: String,
    pub tournament_level: TournamentLevel,
    pub teams: Vec<MatchTeam>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One played match with final scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub description: String,
    pub match_number: u32,
    pub tournament_level: TournamentLevel,
    pub actual_start_time: String,
    pub post_result_time: String,
    pub score_red_final: i64,
    pub score_red_foul: i64,
    pub score_red_auto: i64,
    pub score_blue_final: i64,
    pub score_blue_foul: i64,
    pub score_blue_auto: i64,
    pub teams: Vec<MatchTeam>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// A team's station assignment within one match.
///
/// `surrogate` appears on schedule records, `dq` on result records; each
/// defaults to false on the shape that lacks it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchTeam {
    pub team_number: u32,
    pub station: String,
    #[serde(default)]
    pub surrogate: bool,
    #[serde(default)]
    pub dq: bool,
}

impl MatchTeam {
    /// Compact team tag: `*` marks a surrogate, `!` a disqualification,
    /// optionally prefixed with the station name.
    pub fn display(&self, include_station: bool) -> String {
        let mut out = String::new();
        if include_station {
            out.push_str(&spaced_station(&self.station));
            out.push_str(": ");
        }
        if self.surrogate {
            out.push('*');
        }
        if self.dq {
            out.push('!');
        }
        out.push_str(&self.team_number.to_string());
        out
    }
}

/// "Red1" → "Red 1"
fn spaced_station(station: &str) -> String {
    match station.find(|c: char| c.is_ascii_digit()) {
        Some(i) => format!("{} {}", &station[..i], &station[i..]),
        None => station.to_string(),
    }
}

/// Red and Blue team tags in station order, each padded to `width`.
pub fn order_alliances(teams: &[MatchTeam], width: usize) -> (Vec<String>, Vec<String>) {
    fn side(teams: &[MatchTeam], prefix: &str, width: usize) -> Vec<String> {
        let mut picked: Vec<&MatchTeam> = teams
            .iter()
            .filter(|t| t.station.starts_with(prefix))
            .collect();
        picked.sort_by(|a, b| a.station.cmp(&b.station));
        picked
            .iter()
            .map(|t| {
                let tag = if t.surrogate {
                    format!("*{}", t.team_number)
                } else {
                    t.team_number.to_string()
                };
                format!("{:>width$}", tag, width = width)
            })
            .collect()
    }
    (side(teams, "Red", width), side(teams, "Blue", width))
}

//! Async client for the remote event API.
//!
//! Responses arrive as an envelope object holding one named array
//! (`Events`, `Schedule`, `MatchScores`, `Matches`). The `*_raw` accessors
//! return those arrays as `Vec<Value>` so the generic query/render engine
//! stays schema-less; the typed accessors deserialize into the shapes in
//! [`crate::models`] for the schedule report and server rows.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::MatchlineError;
use crate::models::{Event, MatchResult, ScheduledMatch, Season, TournamentLevel};
use crate::Result;

/// Selects whose matches to fetch for a schedule/scores/results query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelSelect {
    /// Practice + Qualification + Playoff, concatenated in that order
    All,
    /// One tournament level
    Level(TournamentLevel),
    /// Every match involving one team
    Team(u32),
    /// One team within one tournament level
    TeamAtLevel(u32, TournamentLevel),
}

impl LevelSelect {
    /// Parse a CLI/server argument: a number is a team, `all` fans out,
    /// anything else must be a tournament level. `12/Playoff` style pairs
    /// select a team within a level.
    pub fn parse(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(LevelSelect::All);
        }
        if let Some((team, level)) = s.split_once(|c: char| " ,;/-".contains(c)) {
            let team = team
                .parse::<u32>()
                .map_err(|_| MatchlineError::Config(format!("not a team number: {}", team)))?;
            let level = level
                .parse::<TournamentLevel>()
                .map_err(MatchlineError::Config)?;
            return Ok(LevelSelect::TeamAtLevel(team, level));
        }
        if s.bytes().all(|b| b.is_ascii_digit()) {
            let team = s
                .parse::<u32>()
                .map_err(|_| MatchlineError::Config(format!("not a team number: {}", s)))?;
            return Ok(LevelSelect::Team(team));
        }
        Ok(LevelSelect::Level(
            s.parse::<TournamentLevel>().map_err(MatchlineError::Config)?,
        ))
    }

    /// Query string for a single fetch; `All` has no single query and is
    /// fanned out by the caller.
    fn query(&self) -> Option<String> {
        match self {
            LevelSelect::All => None,
            LevelSelect::Level(level) => Some(format!("tournamentLevel={}", level.as_str())),
            LevelSelect::Team(team) => Some(format!("teamNumber={}", team)),
            LevelSelect::TeamAtLevel(team, level) => Some(format!(
                "tournamentLevel={}&teamNumber={}",
                level.as_str(),
                team
            )),
        }
    }
}

/// Filters for an events query; empty fields are omitted from the URL.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    pub event_code: Option<String>,
    pub team_number: Option<u32>,
    pub district_code: Option<String>,
    pub exclude_district: bool,
    pub week_number: Option<u32>,
    pub tournament_type: Option<String>,
}

impl EventQuery {
    pub fn for_event(code: impl Into<String>) -> Self {
        EventQuery {
            event_code: Some(code.into()),
            ..Default::default()
        }
    }

    pub fn for_team(team: u32) -> Self {
        EventQuery {
            team_number: Some(team),
            ..Default::default()
        }
    }

    fn query(&self) -> String {
        let mut parts = Vec::new();
        if let Some(code) = &self.event_code {
            parts.push(format!("eventCode={}", code));
        }
        if let Some(team) = self.team_number {
            parts.push(format!("teamNumber={}", team));
        }
        if let Some(district) = &self.district_code {
            parts.push(format!("districtCode={}", district));
        }
        if self.exclude_district {
            parts.push("excludeDistrict=true".to_string());
        }
        if let Some(week) = self.week_number {
            parts.push(format!("weekNumber={}", week));
        }
        if let Some(kind) = &self.tournament_type {
            parts.push(format!("tournamentType={}", kind));
        }
        parts.join("&")
    }
}

/// Build the request path for a match-list endpoint.
fn match_path(endpoint: &str, event_code: &str, select: &LevelSelect) -> String {
    match select.query() {
        Some(query) => format!("{}/{}?{}", endpoint, event_code, query),
        None => format!("{}/{}", endpoint, event_code),
    }
}

/// Pull the named array out of a response envelope.
fn envelope_array(mut response: Value, field: &str, url: &str) -> Result<Vec<Value>> {
    match response.get_mut(field).map(Value::take) {
        Some(Value::Array(items)) => Ok(items),
        _ => Err(MatchlineError::Decode {
            url: url.to_string(),
            message: format!("response has no '{}' array", field),
        }),
    }
}

/// HTTP client for the event API.
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn url(&self, year: i32, path: &str) -> String {
        if path.is_empty() {
            format!("{}/{}", self.config.base_url, year)
        } else {
            format!("{}/{}/{}", self.config.base_url, year, path)
        }
    }

    /// Fetch an arbitrary API path under `year` as raw JSON.
    pub async fn fetch_raw(&self, year: i32, path: &str) -> Result<Value> {
        let url = self.url(year, path);
        debug!(%url, "event API request");
        let response = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .header("Authorization", format!("Basic {}", self.config.token))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MatchlineError::ApiStatus {
                status: status.as_u16(),
                url,
            });
        }
        response.json::<Value>().await.map_err(|e| MatchlineError::Decode {
            url,
            message: e.to_string(),
        })
    }

    /// Fetch one named envelope array for every level `select` covers.
    async fn fetch_matches(
        &self,
        endpoint: &str,
        field: &str,
        year: i32,
        event_code: &str,
        select: &LevelSelect,
    ) -> Result<Vec<Value>> {
        if *select == LevelSelect::All {
            let mut all = Vec::new();
            for level in TournamentLevel::ALL {
                let path = match_path(endpoint, event_code, &LevelSelect::Level(level));
                let response = self.fetch_raw(year, &path).await?;
                all.extend(envelope_array(response, field, &path)?);
            }
            return Ok(all);
        }
        let path = match_path(endpoint, event_code, select);
        let response = self.fetch_raw(year, &path).await?;
        envelope_array(response, field, &path)
    }

    fn decode_records<T: DeserializeOwned>(records: Vec<Value>, context: &str) -> Result<Vec<T>> {
        records
            .into_iter()
            .map(|record| {
                serde_json::from_value(record).map_err(|e| MatchlineError::Decode {
                    url: context.to_string(),
                    message: e.to_string(),
                })
            })
            .collect()
    }

    /// Season summary for `year`.
    pub async fn season(&self, year: i32) -> Result<Season> {
        let url = self.url(year, "");
        let raw = self.fetch_raw(year, "").await?;
        serde_json::from_value(raw).map_err(|e| MatchlineError::Decode {
            url,
            message: e.to_string(),
        })
    }

    /// Season summary as a raw record, for the generic renderers.
    pub async fn season_raw(&self, year: i32) -> Result<Value> {
        self.fetch_raw(year, "").await
    }

    pub async fn events_raw(&self, year: i32, query: &EventQuery) -> Result<Vec<Value>> {
        let qs = query.query();
        let path = if qs.is_empty() {
            "events".to_string()
        } else {
            format!("events?{}", qs)
        };
        let response = self.fetch_raw(year, &path).await?;
        envelope_array(response, "Events", &path)
    }

    pub async fn events(&self, year: i32, query: &EventQuery) -> Result<Vec<Event>> {
        let records = self.events_raw(year, query).await?;
        Self::decode_records(records, "events")
    }

    /// The single event with `code`, if the API knows it.
    pub async fn event(&self, year: i32, code: &str) -> Result<Option<Event>> {
        let mut events = self.events(year, &EventQuery::for_event(code)).await?;
        Ok(if events.is_empty() {
            None
        } else {
            Some(events.remove(0))
        })
    }

    pub async fn schedule_raw(
        &self,
        year: i32,
        event_code: &str,
        select: &LevelSelect,
    ) -> Result<Vec<Value>> {
        self.fetch_matches("schedule", "Schedule", year, event_code, select)
            .await
    }

    pub async fn schedule(
        &self,
        year: i32,
        event_code: &str,
        select: &LevelSelect,
    ) -> Result<Vec<ScheduledMatch>> {
        let records = self.schedule_raw(year, event_code, select).await?;
        Self::decode_records(records, "schedule")
    }

    /// Match scores stay raw: their shape varies by season beyond the
    /// typed prefix, and only the generic renderers consume them.
    pub async fn scores_raw(
        &self,
        year: i32,
        event_code: &str,
        select: &LevelSelect,
    ) -> Result<Vec<Value>> {
        self.fetch_matches("scores", "MatchScores", year, event_code, select)
            .await
    }

    pub async fn results_raw(
        &self,
        year: i32,
        event_code: &str,
        select: &LevelSelect,
    ) -> Result<Vec<Value>> {
        self.fetch_matches("matches", "Matches", year, event_code, select)
            .await
    }

    pub async fn results(
        &self,
        year: i32,
        event_code: &str,
        select: &LevelSelect,
    ) -> Result<Vec<MatchResult>> {
        let records = self.results_raw(year, event_code, select).await?;
        Self::decode_records(records, "matches")
    }
}

//! Event-API configuration.

use chrono::Datelike;

use crate::error::MatchlineError;
use crate::Result;

/// Default API root; override with `MATCHLINE_API_URL`.
pub const DEFAULT_API_URL: &str = "https://frc-api.firstinspires.org/v3.0";

/// Connection and identity settings for the event API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// API root URL, without trailing slash
    pub base_url: String,
    /// Basic-auth token sent on every request
    pub token: String,
    /// Season year used when a command does not specify one
    pub default_year: i32,
    /// The user's own team number, if configured
    pub user_team: Option<u32>,
    /// The user's district code, if configured
    pub user_district: Option<String>,
}

impl ApiConfig {
    /// Build a config with just a token, defaulting everything else.
    pub fn new(token: impl Into<String>) -> Self {
        ApiConfig {
            base_url: DEFAULT_API_URL.to_string(),
            token: token.into(),
            default_year: current_year(),
            user_team: None,
            user_district: None,
        }
    }

    /// Read configuration from the environment.
    ///
    /// `MATCHLINE_API_TOKEN` is required; `MATCHLINE_API_URL`,
    /// `MATCHLINE_TEAM` and `MATCHLINE_DISTRICT` are optional. Loading a
    /// dotenv file is the binary's job, not the library's.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var("MATCHLINE_API_TOKEN")
            .map_err(|_| MatchlineError::Config("MATCHLINE_API_TOKEN is not set".to_string()))?;
        let mut config = ApiConfig::new(token);
        if let Ok(url) = std::env::var("MATCHLINE_API_URL") {
            config.base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(team) = std::env::var("MATCHLINE_TEAM") {
            let parsed = team.parse::<u32>().map_err(|_| {
                MatchlineError::Config(format!("MATCHLINE_TEAM is not a team number: {}", team))
            })?;
            config.user_team = Some(parsed);
        }
        if let Ok(district) = std::env::var("MATCHLINE_DISTRICT") {
            config.user_district = Some(district);
        }
        Ok(config)
    }
}

/// The season year for "now".
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

//! HTTP front-end: the same schedule/scores/results queries as HTML pages.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;
use tracing::info;

use matchlinelib::models::{MatchResult, MatchTeam, ScheduledMatch, TournamentLevel};
use matchlinelib::render::html_table;
use matchlinelib::{ApiClient, LevelSelect, MatchlineError};

use crate::assets::AssetCache;
use crate::query::QueryOptions;

#[derive(Clone)]
pub struct AppState {
    pub client: Arc<ApiClient>,
    pub assets: Arc<AssetCache>,
}

/// Start the server on `port`, serving static files from `assets_root`.
pub async fn run(client: ApiClient, port: u16, assets_root: PathBuf) -> anyhow::Result<()> {
    let state = AppState {
        client: Arc::new(client),
        assets: Arc::new(AssetCache::new(assets_root)),
    };
    let app = router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(%addr, "starting server");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/favicon.ico", get(favicon))
        .route("/static/*path", get(static_asset))
        .route("/:kind/:event", get(matches_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// URL query parameters shared by the three match-list pages.
#[derive(Debug, Deserialize, Default)]
struct MatchParams {
    year: Option<i32>,
    team: Option<u32>,
    level: Option<String>,
    /// sort keys, leading +/- on the first flips the whole comparison
    sort: Option<String>,
    /// comma-separated dotted paths to include as columns
    props: Option<String>,
    /// comma-separated top-level keys to exclude
    xp: Option<String>,
}

impl MatchParams {
    fn select(&self) -> Result<LevelSelect, String> {
        let level = match &self.level {
            Some(s) => Some(s.parse::<TournamentLevel>()?),
            None => None,
        };
        Ok(match (self.team, level) {
            (Some(team), Some(level)) => LevelSelect::TeamAtLevel(team, level),
            (Some(team), None) => LevelSelect::Team(team),
            (None, Some(level)) => LevelSelect::Level(level),
            (None, None) => LevelSelect::All,
        })
    }
}

async fn index(State(state): State<AppState>) -> Response {
    let year = state.client.config().default_year;
    let body = format!(
        "<header><h1>matchline</h1></header>\n\
         <p>Match data for the {year} season.</p>\n\
         <ul>\n\
         \t<li><code>/schedule/&lt;event&gt;</code></li>\n\
         \t<li><code>/results/&lt;event&gt;</code></li>\n\
         \t<li><code>/scores/&lt;event&gt;</code></li>\n\
         </ul>\n\
         <p>Query parameters: <code>year</code>, <code>team</code>, <code>level</code>, \
         <code>sort</code>, <code>props</code>, <code>xp</code>.</p>"
    );
    page(&state, "matchline", &body).await
}

async fn favicon(State(state): State<AppState>) -> Response {
    serve_asset(&state, "favicon.ico").await
}

async fn static_asset(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Response {
    info!(%path, "serving static file");
    serve_asset(&state, &path).await
}

async fn serve_asset(state: &AppState, name: &str) -> Response {
    match state.assets.get(name).await {
        Ok(asset) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, asset.content_type.to_string()),
                (header::ETAG, format!("\"{}\"", asset.sha256)),
            ],
            asset.content.clone(),
        )
            .into_response(),
        Err(_) => (
            StatusCode::NOT_FOUND,
            format!("404 Not Found: {}", name),
        )
            .into_response(),
    }
}

async fn matches_page(
    State(state): State<AppState>,
    Path((kind, event_code)): Path<(String, String)>,
    Query(params): Query<MatchParams>,
) -> Response {
    if !matches!(kind.as_str(), "schedule" | "results" | "scores") {
        return (StatusCode::NOT_FOUND, format!("404 Not Found: /{}", kind)).into_response();
    }
    let year = params.year.unwrap_or(state.client.config().default_year);
    let select = match params.select() {
        Ok(select) => select,
        Err(message) => return error_page(&state, StatusCode::BAD_REQUEST, &message).await,
    };
    let options = match QueryOptions::parse(
        params.props.as_deref(),
        params.xp.as_deref(),
        params.sort.as_deref(),
    ) {
        Ok(options) => options,
        Err(e) => return error_page(&state, StatusCode::BAD_REQUEST, &e.to_string()).await,
    };

    let rows = match fetch_rows(&state.client, &kind, year, &event_code, &select).await {
        Ok(rows) => rows,
        Err(e) => return upstream_error_page(&state, year, &event_code, &e).await,
    };
    let rows = match options.apply(rows) {
        Ok(rows) => rows,
        Err(e) => return error_page(&state, StatusCode::BAD_REQUEST, &e.to_string()).await,
    };

    let title = format!("{} {} {}", year, event_code, kind);
    let body = format!(
        "<header><h1>{} {} {}</h1></header>\n{}",
        year,
        event_code,
        kind,
        html_table(&rows, None)
    );
    page(&state, &title, &body).await
}

/// Fetch one page's records, flattened to display rows where a typed
/// shape exists. Scores stay raw: their fields vary by season.
async fn fetch_rows(
    client: &ApiClient,
    kind: &str,
    year: i32,
    event_code: &str,
    select: &LevelSelect,
) -> matchlinelib::Result<Vec<Value>> {
    match kind {
        "schedule" => Ok(client
            .schedule(year, event_code, select)
            .await?
            .iter()
            .map(schedule_row)
            .collect()),
        "results" => Ok(client
            .results(year, event_code, select)
            .await?
            .iter()
            .map(result_row)
            .collect()),
        _ => client.scores_raw(year, event_code, select).await,
    }
}

fn station(teams: &[MatchTeam], name: &str) -> String {
    teams
        .iter()
        .find(|t| t.station == name)
        .map(|t| t.display(false))
        .unwrap_or_default()
}

/// One schedule row with per-station team columns.
fn schedule_row(m: &ScheduledMatch) -> Value {
    json!({
        "description": m.description,
        "level": m.tournament_level.as_str(),
        "matchNumber": m.match_number,
        "startTime": m.start_time,
        "field": m.field,
        "red1": station(&m.teams, "Red1"),
        "red2": station(&m.teams, "Red2"),
        "red3": station(&m.teams, "Red3"),
        "blue1": station(&m.teams, "Blue1"),
        "blue2": station(&m.teams, "Blue2"),
        "blue3": station(&m.teams, "Blue3"),
    })
}

/// One result row: stations plus the final/auto/foul score breakdown.
fn result_row(m: &MatchResult) -> Value {
    json!({
        "description": m.description,
        "level": m.tournament_level.as_str(),
        "matchNumber": m.match_number,
        "startTime": m.actual_start_time,
        "resultsPosted": m.post_result_time,
        "red1": station(&m.teams, "Red1"),
        "red2": station(&m.teams, "Red2"),
        "red3": station(&m.teams, "Red3"),
        "blue1": station(&m.teams, "Blue1"),
        "blue2": station(&m.teams, "Blue2"),
        "blue3": station(&m.teams, "Blue3"),
        "redScore": m.score_red_final,
        "redAutoScore": m.score_red_auto,
        "redFoulScore": m.score_red_foul,
        "blueScore": m.score_blue_final,
        "blueAutoScore": m.score_blue_auto,
        "blueFoulScore": m.score_blue_foul,
    })
}

/// Wrap a body in the fixed page shell, inlining the default stylesheet
/// when the asset exists.
async fn page(state: &AppState, title: &str, body: &str) -> Response {
    let styles = state
        .assets
        .get_text("styles/default.css")
        .await
        .unwrap_or_default();
    let html = format!(
        "<!DOCTYPE html>\n<html>\n\t<head>\n\t\t<title>{}</title>\n\t<style>\n{}\n</style>\n\t</head>\n\t<body>\n{}\n\t</body>\n</html>",
        title, styles, body
    );
    Html(html).into_response()
}

async fn error_page(state: &AppState, status: StatusCode, message: &str) -> Response {
    let body = format!("<header><h1>{}</h1></header>\n<p>{}</p>", status, message);
    let mut response = page(state, "matchline error", &body).await;
    *response.status_mut() = status;
    response
}

async fn upstream_error_page(
    state: &AppState,
    year: i32,
    event_code: &str,
    error: &MatchlineError,
) -> Response {
    let status = match error {
        MatchlineError::ApiStatus { status: 404, .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_GATEWAY,
    };
    let message = format!(
        "Error fetching event {} {}: {}<br/>\nTry checking the year, the event code, and the API token.",
        year, event_code, error
    );
    error_page(state, status, &message).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_match_params_select() {
        let params = MatchParams {
            team: Some(254),
            level: Some("Playoff".into()),
            ..Default::default()
        };
        assert_eq!(
            params.select().unwrap(),
            LevelSelect::TeamAtLevel(254, TournamentLevel::Playoff)
        );
        assert_eq!(MatchParams::default().select().unwrap(), LevelSelect::All);
        let bad = MatchParams {
            level: Some("finals".into()),
            ..Default::default()
        };
        assert!(bad.select().is_err());
    }

    #[test]
    fn test_schedule_row_flattens_stations() {
        let m = ScheduledMatch {
            description: "Qualification 1".into(),
            start_time: "2024-04-18T09:00:00Z".into(),
            match_number: 1,
            field: "Primary".into(),
            tournament_level: TournamentLevel::Qualification,
            teams: vec![
                MatchTeam { team_number: 254, station: "Red1".into(), surrogate: true, dq: false },
                MatchTeam { team_number: 118, station: "Blue1".into(), surrogate: false, dq: false },
            ],
            extra: BTreeMap::new(),
        };
        let row = schedule_row(&m);
        assert_eq!(row["red1"], json!("*254"));
        assert_eq!(row["blue1"], json!("118"));
        assert_eq!(row["red2"], json!(""));
        assert_eq!(row["level"], json!("Qualification"));
    }
}

//! Terminal output for query results and the schedule report.

use anyhow::Result;
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use console::Style;
use matchlinelib::models::{order_alliances, Event, ScheduledMatch};
use matchlinelib::ordering::{sort_records, KeySelector, SortCriteria};
use matchlinelib::render::{format_date_range, html_table, render_list, render_table};
use matchlinelib::{LevelSelect, Path};
use serde_json::Value;

/// Output format for record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Box-drawing table
    Text,
    /// HTML `<table>` fragment
    Html,
    /// Pretty-printed JSON
    Json,
}

/// Render a (already sorted/projected) collection in the chosen format.
pub fn render_records(records: &[Value], format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => render_table(records, None),
        OutputFormat::Html => html_table(records, None),
        OutputFormat::Json => serde_json::to_string_pretty(records)?,
    })
}

/// Render a single record (season summary) in the chosen format.
pub fn render_record(record: &Value, properties: Option<&[String]>, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => render_list(record, properties),
        OutputFormat::Html => matchlinelib::render::html_list(record),
        OutputFormat::Json => serde_json::to_string_pretty(record)?,
    })
}

/// Order a season summary's championship entries by start date, then
/// name. The API lists them in registration order, which reads randomly.
pub fn sort_championships(season: &mut Value) {
    if let Some(Value::Array(items)) = season.get_mut("frcChampionships") {
        let keys = vec![
            KeySelector::Extractor(Box::new(|c: &Value| {
                // normalize so date order survives string comparison
                match c["startDate"].as_str().and_then(parse_date) {
                    Some(date) => Value::String(date.format("%Y-%m-%d").to_string()),
                    None => c["startDate"].clone(),
                }
            })),
            KeySelector::Path(Path::key("name")),
        ];
        sort_records(items, &SortCriteria::Keys(keys));
    }
}

/// Width of one printed team tag in the report's alliance brackets.
const TEAM_WIDTH: usize = 6;

/// The human-facing schedule report: event header, date range, then one
/// line per match with Red and Blue alliances.
pub fn schedule_report(
    year: i32,
    event: &Event,
    select: &LevelSelect,
    mut matches: Vec<ScheduledMatch>,
) -> String {
    let header = Style::new().bold();
    let dim = Style::new().dim();

    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        header.apply_to(format!("> Season {} | {}", year, event.code))
    ));
    out.push_str(&format!("{}\n", event.name));
    out.push_str(&format!(
        "{}, {}, {} | {}\n",
        event.city,
        event.stateprov,
        event.country,
        event_date_range(event)
    ));
    out.push_str(&format!("{}\n", scope_line(&event.code, select)));

    if matches.is_empty() {
        out.push_str("No matches.\n");
        return out;
    }

    fix_unknown_start_times(year, event, &mut matches);
    matches.sort_by(|a, b| a.start_time.cmp(&b.start_time));

    out.push_str(&format!("Total matches: {}\n", matches.len()));
    out.push_str(&format!("{}\n", "=".repeat(109)));
    for m in &matches {
        let (red, blue) = order_alliances(&m.teams, TEAM_WIDTH);
        // pad before styling so ANSI codes don't skew the column width
        let when = format!("{:<21}", start_time_text(&m.start_time));
        out.push_str(&format!(
            "{:<17} @ {} - Red [ {} ] vs Blue [ {} ]\n",
            m.description,
            dim.apply_to(when),
            red.join(", "),
            blue.join(", ")
        ));
    }
    out
}

fn scope_line(event_code: &str, select: &LevelSelect) -> String {
    match select {
        LevelSelect::All => format!("Schedule for {}", event_code),
        LevelSelect::Level(level) => format!("Schedule for {} round {}", event_code, level.as_str()),
        LevelSelect::Team(team) => format!("Schedule for {} team {}", event_code, team),
        LevelSelect::TeamAtLevel(team, level) => format!(
            "Schedule for {} round {} team {}",
            event_code,
            level.as_str(),
            team
        ),
    }
}

fn event_date_range(event: &Event) -> String {
    match (parse_date(&event.date_start), parse_date(&event.date_end)) {
        (Some(start), Some(end)) => format_date_range(start, end),
        _ => format!("{} - {}", event.date_start, event.date_end),
    }
}

/// Dates arrive as `2024-04-17` or `2024-04-17T00:00:00`; the calendar
/// date prefix is all the report needs.
fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.get(..10)?, "%Y-%m-%d").ok()
}

fn start_time_text(start_time: &str) -> String {
    match DateTime::parse_from_rfc3339(start_time) {
        Ok(dt) => dt.with_timezone(&Utc).format("%a %b %d %H:%M").to_string(),
        Err(_) => start_time.to_string(),
    }
}

/// Matches without a published start time come back epoch-dated. Pin them
/// to the event's last day instead so they sort after the known times.
fn fix_unknown_start_times(year: i32, event: &Event, matches: &mut [ScheduledMatch]) {
    for m in matches {
        let start_year = DateTime::parse_from_rfc3339(&m.start_time)
            .map(|dt| dt.year())
            .unwrap_or(0);
        if start_year != year {
            if let Some(end) = parse_date(&event.date_end) {
                m.start_time = format!("{}T23:59:59Z", end.format("%Y-%m-%d"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matchlinelib::models::{MatchTeam, TournamentLevel};
    use std::collections::BTreeMap;

    fn event() -> Event {
        Event {
            code: "CMPTX".into(),
            name: "Einstein Field".into(),
            venue: "GRB".into(),
            city: "Houston".into(),
            stateprov: "TX".into(),
            country: "USA".into(),
            date_start: "2024-04-17".into(),
            date_end: "2024-04-20".into(),
            extra: BTreeMap::new(),
        }
    }

    fn scheduled(number: u32, start_time: &str) -> ScheduledMatch {
        ScheduledMatch {
            description: format!("Qualification {}", number),
            start_time: start_time.into(),
            match_number: number,
            field: "Primary".into(),
            tournament_level: TournamentLevel::Qualification,
            teams: vec![
                MatchTeam { team_number: 254, station: "Red1".into(), surrogate: false, dq: false },
                MatchTeam { team_number: 118, station: "Blue1".into(), surrogate: false, dq: false },
            ],
            extra: BTreeMap::new(),
        }
    }

    #[test]
    fn test_report_sorts_by_start_time() {
        let matches = vec![
            scheduled(2, "2024-04-18T10:00:00Z"),
            scheduled(1, "2024-04-18T09:00:00Z"),
        ];
        let report = schedule_report(2024, &event(), &LevelSelect::All, matches);
        let q1 = report.find("Qualification 1 ").unwrap();
        let q2 = report.find("Qualification 2 ").unwrap();
        assert!(q1 < q2);
        assert!(report.contains("Total matches: 2"));
    }

    #[test]
    fn test_report_header_and_scope() {
        let report = schedule_report(
            2024,
            &event(),
            &LevelSelect::Team(254),
            vec![scheduled(1, "2024-04-18T09:00:00Z")],
        );
        assert!(report.contains("> Season 2024 | CMPTX"));
        assert!(report.contains("Houston, TX, USA"));
        assert!(report.contains("Wednesday, April 17, 2024 - Saturday, April 20, 2024"));
        assert!(report.contains("Schedule for CMPTX team 254"));
        assert!(report.contains("Red [    254 ] vs Blue [    118 ]"));
    }

    #[test]
    fn test_empty_schedule() {
        let report = schedule_report(2024, &event(), &LevelSelect::All, vec![]);
        assert!(report.contains("No matches."));
    }

    #[test]
    fn test_championships_sorted_by_date_then_name() {
        let mut season = serde_json::json!({
            "gameName": "Crescendo",
            "frcChampionships": [
                { "name": "FIRST Championship", "startDate": "2024-04-17T00:00:00", "location": "Houston" },
                { "name": "Einstein", "startDate": "2024-04-10T00:00:00", "location": "Houston" },
                { "name": "Curie", "startDate": "2024-04-10T00:00:00", "location": "Houston" },
            ]
        });
        sort_championships(&mut season);
        let names: Vec<&str> = season["frcChampionships"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Curie", "Einstein", "FIRST Championship"]);
    }

    #[test]
    fn test_championships_absent_is_a_no_op() {
        let mut season = serde_json::json!({ "gameName": "Crescendo" });
        sort_championships(&mut season);
        assert_eq!(season, serde_json::json!({ "gameName": "Crescendo" }));
    }

    #[test]
    fn test_epoch_start_times_pinned_to_event_end() {
        let matches = vec![
            scheduled(1, "1970-01-01T00:00:00Z"),
            scheduled(2, "2024-04-18T09:00:00Z"),
        ];
        let report = schedule_report(2024, &event(), &LevelSelect::All, matches);
        // the unknown time sorts after the known one, on the event's last day
        let q1 = report.find("Qualification 1 ").unwrap();
        let q2 = report.find("Qualification 2 ").unwrap();
        assert!(q2 < q1);
        assert!(report.contains("Apr 20 23:59"));
    }
}

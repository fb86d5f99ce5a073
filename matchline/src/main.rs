//! # matchline
//!
//! Command-line client and web front-end for robotics-competition event
//! data: season summaries, event listings, match schedules, scores and
//! results, with generic sort/projection over any of them.
//!
//! ## Usage
//!
//! ```bash
//! # Season summary
//! matchline season
//!
//! # Events for the season, or for one team
//! matchline events
//! matchline events --team 254
//!
//! # Schedule report for an event
//! matchline schedule CMPTX
//! matchline schedule CMPTX qual
//!
//! # Qualification results, sorted and trimmed
//! matchline results CMPTX qual -s -scoreRedFinal -p matchNumber,scoreRedFinal
//!
//! # Raw API access
//! matchline get events?eventCode=CMPTX
//!
//! # Web front-end
//! matchline serve --port 3000
//! ```
//!
//! Configuration comes from the environment (or a `.env` file):
//! `MATCHLINE_API_TOKEN` is required, `MATCHLINE_API_URL`,
//! `MATCHLINE_TEAM` and `MATCHLINE_DISTRICT` are optional.

mod assets;
mod query;
mod render;
mod server;

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use matchlinelib::{ApiClient, ApiConfig, EventQuery, LevelSelect};
use tracing_subscriber::EnvFilter;

use crate::query::QueryOptions;
use crate::render::{
    render_record, render_records, schedule_report, sort_championships, OutputFormat,
};

#[derive(Parser)]
#[command(name = "matchline", version, about = "Event data from the competition API")]
struct Cli {
    /// Season year (defaults to the current season)
    #[arg(long, global = true)]
    year: Option<i32>,

    #[command(subcommand)]
    command: Commands,
}

/// Sort/projection/format flags shared by the record-listing commands.
#[derive(Args)]
struct QueryArgs {
    /// Comma-separated property paths to show, in order
    #[arg(short = 'p', long)]
    props: Option<String>,

    /// Comma-separated top-level properties to hide
    #[arg(short = 'x', long)]
    exclude: Option<String>,

    /// Comma-separated sort keys; a leading - on the first reverses
    #[arg(short = 's', long)]
    sort: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// List events for the season
    Events {
        /// Ignore the configured district filter
        #[arg(long)]
        all: bool,

        /// Only events this team attends
        #[arg(long)]
        team: Option<u32>,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Season summary
    Season {
        #[command(flatten)]
        query: QueryArgs,
    },

    /// Match schedule for an event
    Schedule {
        /// Event code, e.g. CMPTX
        event: String,

        /// Tournament level, team number, or `all`
        #[arg(default_value = "all")]
        level: String,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Match scores for an event
    Scores {
        /// Event code, e.g. CMPTX
        event: String,

        /// Tournament level, team number, or `all`
        #[arg(default_value = "all")]
        level: String,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Match results for an event
    Results {
        /// Event code, e.g. CMPTX
        event: String,

        /// Tournament level, team number, or `all`
        #[arg(default_value = "all")]
        level: String,

        #[command(flatten)]
        query: QueryArgs,
    },

    /// Fetch an arbitrary API path as JSON
    Get {
        /// Path under the season root, e.g. `events?eventCode=CMPTX`
        path: String,
    },

    /// Serve the web front-end
    Serve {
        /// Port to listen on
        #[arg(long, default_value_t = 3000)]
        port: u16,

        /// Directory of static assets
        #[arg(long, default_value = "static")]
        assets: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // quiet by default; the server announces requests at info
    let default_filter = match cli.command {
        Commands::Serve { .. } => "matchline=info,matchlinelib=info,tower_http=info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    let config = ApiConfig::from_env().context("configuration error")?;
    let year = cli.year.unwrap_or(config.default_year);
    let client = ApiClient::new(config);

    match cli.command {
        Commands::Events { all, team, query } => events(&client, year, all, team, &query).await,
        Commands::Season { query } => season(&client, year, &query).await,
        Commands::Schedule { event, level, query } => {
            schedule(&client, year, &event, &level, &query).await
        }
        Commands::Scores { event, level, query } => {
            matches(&client, "scores", year, &event, &level, &query).await
        }
        Commands::Results { event, level, query } => {
            matches(&client, "results", year, &event, &level, &query).await
        }
        Commands::Get { path } => {
            let raw = client.fetch_raw(year, &path).await?;
            println!("{}", serde_json::to_string_pretty(&raw)?);
            Ok(())
        }
        Commands::Serve { port, assets } => server::run(client, port, assets).await,
    }
}

impl QueryArgs {
    fn options(&self) -> Result<QueryOptions> {
        QueryOptions::parse(
            self.props.as_deref(),
            self.exclude.as_deref(),
            self.sort.as_deref(),
        )
    }

    /// True when the command gave no generic query flags at all, so a
    /// typed report can be shown instead of the raw table.
    fn is_default(&self) -> bool {
        self.props.is_none()
            && self.exclude.is_none()
            && self.sort.is_none()
            && self.format == OutputFormat::Text
    }
}

async fn events(
    client: &ApiClient,
    year: i32,
    all: bool,
    team: Option<u32>,
    args: &QueryArgs,
) -> Result<()> {
    let mut filter = EventQuery::default();
    if let Some(team) = team {
        filter.team_number = Some(team);
    } else if !all {
        filter.district_code = client.config().user_district.clone();
    }
    let records = client.events_raw(year, &filter).await?;
    let records = args.options()?.apply(records)?;
    println!("{}", render_records(&records, args.format)?);
    Ok(())
}

async fn season(client: &ApiClient, year: i32, args: &QueryArgs) -> Result<()> {
    let mut record = client.season_raw(year).await?;
    sort_championships(&mut record);
    let options = args.options()?;
    println!(
        "{}",
        render_record(&record, options.props.as_deref(), args.format)?
    );
    Ok(())
}

async fn schedule(
    client: &ApiClient,
    year: i32,
    event_code: &str,
    level: &str,
    args: &QueryArgs,
) -> Result<()> {
    let select = LevelSelect::parse(level)?;

    if args.is_default() {
        let event = match client.event(year, event_code).await? {
            Some(event) => event,
            None => bail!("no event {} in {}", event_code, year),
        };
        let matches = client.schedule(year, event_code, &select).await?;
        print!("{}", schedule_report(year, &event, &select, matches));
        return Ok(());
    }

    let records = client.schedule_raw(year, event_code, &select).await?;
    let records = args.options()?.apply(records)?;
    println!("{}", render_records(&records, args.format)?);
    Ok(())
}

/// Shared handler for the scores and results listings.
async fn matches(
    client: &ApiClient,
    endpoint: &str,
    year: i32,
    event_code: &str,
    level: &str,
    args: &QueryArgs,
) -> Result<()> {
    let select = LevelSelect::parse(level)?;
    let records = if endpoint == "scores" {
        client.scores_raw(year, event_code, &select).await?
    } else {
        client.results_raw(year, event_code, &select).await?
    };
    let records = args.options()?.apply(records)?;
    println!("{}", render_records(&records, args.format)?);
    Ok(())
}

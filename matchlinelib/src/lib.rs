//! # matchlinelib
//!
//! A schema-less query, sort and rendering engine for robotics-competition
//! event data, plus the client for the remote event API that produces it.
//!
//! ## Overview
//!
//! The event API returns loosely-typed JSON records whose key sets vary by
//! season and endpoint. Rather than chase those schemas, this library
//! operates on records structurally:
//!
//! - **Paths**: address any nested field by dotted path (`teams.0.station`)
//!   with get/set/delete/has semantics and a consistent traversal-failure
//!   rule
//! - **Ordering**: sort heterogeneous records by multi-key criteria, with
//!   a deterministic total order across mismatched value types
//! - **Projection**: derive records keeping (or dropping) a chosen set of
//!   fields
//! - **Rendering**: turn any record or collection into an indented list, a
//!   box-drawing table, or an HTML fragment, without knowing its shape
//!
//! ## Example
//!
//! ```rust
//! use matchlinelib::ordering::{sort_records, SortCriteria, SortSpec};
//! use matchlinelib::render::render_table;
//! use serde_json::json;
//!
//! let mut matches = vec![
//!     json!({ "matchNumber": 1, "startTime": "2024-01-01T10:00:00Z" }),
//!     json!({ "matchNumber": 2, "startTime": "2024-01-01T09:00:00Z" }),
//! ];
//! let spec = SortSpec::parse("startTime").unwrap();
//! sort_records(&mut matches, &SortCriteria::Spec(spec));
//! let table = render_table(&matches, None);
//! assert!(table.contains("Match Number"));
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod label;
pub mod models;
pub mod ordering;
pub mod path;
pub mod project;
pub mod render;

pub use client::{ApiClient, EventQuery, LevelSelect};
pub use config::{current_year, ApiConfig};
pub use error::MatchlineError;
pub use label::id_to_word;
pub use models::{
    ChampionshipEvent, Event, MatchResult, MatchTeam, ScheduledMatch, Season, TournamentLevel,
};
pub use ordering::{compare, sort_records, sorted_records, KeySelector, SortCriteria, SortSpec};
pub use path::{Path, Segment};
pub use project::{project, project_paths};
pub use render::{format_date_range, html_list, html_table, render_list, render_table};

/// Result type for matchlinelib operations
pub type Result<T> = std::result::Result<T, MatchlineError>;

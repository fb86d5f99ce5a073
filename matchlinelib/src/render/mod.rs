//! Structured rendering: records and collections to displayable text or
//! HTML fragments.
//!
//! Two output families over the same schema-less input:
//!
//! - **List rendering**: a record or sequence as an indented nested list
//!   ([`render_list`]) or an HTML definition list ([`html_list`]).
//! - **Table rendering**: a homogeneous-ish collection as an aligned
//!   box-drawing table ([`render_table`]) or an HTML `<table>`
//!   ([`html_table`]).
//!
//! Column headers and list keys go through the label formatter; cell
//! values resolve structurally, so callers never declare a schema. The
//! text paths run scalar leaves through the leaf formatter (timestamps
//! prettified); the HTML table emits raw stringified values (see
//! DESIGN.md for that asymmetry).

pub mod html;
pub mod leaf;
pub mod list;
pub mod table;

pub use html::{html_list, html_table};
pub use leaf::{format_date_range, leaf_text};
pub use list::render_list;
pub use table::render_table;

//! Report rendering for case summaries and demand packages.
//!
//! Markdown is the canonical text form; HTML output wraps or converts the
//! markdown into a self-contained page (no external assets), and JSON is the
//! serde serialization of the underlying value objects. Rendering never feeds
//! back into scoring.

pub mod letter;
pub mod summary;

pub use letter::{demand_letter_html, demand_letter_markdown};
pub use summary::{summary_html, summary_json, summary_markdown};

//! In-memory search core
//!
//! Two components, both pure and stateless-between-calls:
//!
//! - [`engine`] - the collection-level keyword scan producing
//!   [`crate::models::SearchResult`]s with per-field match classification
//! - [`highlight`] - occurrence counting and next/previous navigation for a
//!   single displayed conversation, plus the span splitter the renderer uses
//!
//! Neither component performs I/O or holds shared state; callers own all
//! navigation state and discard stale results when a newer search lands.

pub mod engine;
pub mod highlight;

pub use engine::search;
pub use highlight::{HighlightNavigator, HighlightSpan, MatchState, highlight_spans};

//! Editor features — high-level APIs for hover and definition handlers.
//!
//! This is the boundary between the resolution engine and editor glue.
//! The functions here take data in and return data out; no editor types
//! appear, conversion happens on the caller's side.
//!
//! The recommended entry point is [`AnalysisHost`]: construct it once per
//! session with a [`ModelProvider`], take [`Analysis`] snapshots per
//! request, and call [`AnalysisHost::invalidate`] when the source tree
//! changes.

mod analysis;
mod goto;
mod hover;

pub use analysis::{Analysis, AnalysisHost, ModelProvider};
pub use goto::{Location, goto_definition};
pub use hover::{HoverResult, hover};

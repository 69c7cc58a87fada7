//! # taglink-base
//!
//! Core library for resolving `{@link package!Export:modifier#member}`
//! cross-reference tags into the exact declaration they name, across a
//! multi-package workspace.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide     → editor features (hover, goto-definition, analysis host)
//!   ↓
//! model   → program model + resolution engine
//!   ↓
//! project → workspace discovery and build-config aggregation
//!   ↓
//! tag     → {@link} tag grammar
//!   ↓
//! base    → primitives (FileId, TextRange, LineCol, LineIndex)
//! ```
//!
//! The type-checked program model is a supplied capability: a host feeds
//! [`model::FileModel`]s into an [`ide::AnalysisHost`] through a
//! [`ide::ModelProvider`], and every resolution runs against that snapshot.

/// Foundation types: FileId, spans, line/column conversion
pub mod base;

/// Editor features: hover, goto-definition, session host
pub mod ide;

/// Program model and the resolution engine
pub mod model;

/// Workspace root and build-configuration discovery
pub mod project;

/// The `{@link}` tag grammar
pub mod tag;

// Re-export commonly needed items
pub use base::{FileId, LineCol, LineIndex, TextRange, TextSize};
pub use ide::{Analysis, AnalysisHost, ModelProvider};
pub use model::{
    DeclBody, DeclKind, Declaration, FileModel, FileSet, Member, Program, ResolveError,
    ResolvedLocation, Resolver, Symbol,
};
pub use project::{Workspace, WorkspaceError};
pub use tag::{ParsedLink, parse_link, tag_at_offset};

//! The program model and the resolution engine.
//!
//! Everything here is a read-only view for the duration of one resolution
//! call: the host builds a [`Program`] once per session (see
//! [`crate::ide::AnalysisHost`]) and the [`Resolver`] walks it without
//! mutating anything.

mod decl;
mod file_set;
pub mod manifest;
mod program;
mod resolve;

pub use decl::{
    DeclBody, DeclKind, Declaration, Member, Symbol, escape_leading_underscores,
};
pub use file_set::FileSet;
pub use program::{FileModel, Program};
pub use resolve::{ResolveError, ResolvedLocation, Resolver};

//! Goto-definition — mapping a resolved span to file + line/column.
//!
//! This is the location-mapping boundary: spans stay as character offsets
//! throughout resolution and only become line/column pairs here, using the
//! target file's own offset index.

use std::path::PathBuf;

use tracing::debug;

use crate::base::{LineCol, TextSize};
use crate::model::{Program, ResolvedLocation, Resolver};
use crate::tag::tag_at_offset;

/// A navigable location in the workspace.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Location {
    pub path: PathBuf,
    pub start: LineCol,
    pub end: LineCol,
}

/// Answer a definition request at `offset` inside `text`.
///
/// Lookup misses return `None`; the caller navigates nowhere.
pub fn goto_definition(program: &Program, text: &str, offset: TextSize) -> Option<Location> {
    let (_, tag) = tag_at_offset(text, offset)?;

    match Resolver::new(program).resolve(tag) {
        Ok(resolved) => to_location(program, &resolved),
        Err(err) => {
            debug!(%err, "definition resolution missed");
            None
        }
    }
}

/// Map a resolved span into the target file's line/column space.
pub fn to_location(program: &Program, resolved: &ResolvedLocation) -> Option<Location> {
    let file = program.file(resolved.file)?;
    let index = file.line_index();
    Some(Location {
        path: file.path().to_owned(),
        start: index.line_col(resolved.range.start()),
        end: index.line_col(resolved.range.end()),
    })
}

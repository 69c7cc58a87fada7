//! Hover — the resolved symbol's name for the tag under the cursor.

use smol_str::SmolStr;
use tracing::debug;

use crate::base::{TextRange, TextSize};
use crate::model::{Program, Resolver};
use crate::tag::{parse_link, tag_at_offset};

/// A hover answer: what the tag resolves to and where the tag sits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HoverResult {
    /// The resolved declaration's name.
    pub name: SmolStr,
    /// The span of the tag in the hovered document.
    pub range: TextRange,
}

/// Answer a hover request at `offset` inside `text`.
///
/// Only package-level references (a package segment starting with `@` or
/// containing `/`) are resolved here; bare local links are deferred to the
/// editor's own resolution by returning `None`. Lookup misses also return
/// `None` — the caller shows nothing, never an error.
pub fn hover(program: &Program, text: &str, offset: TextSize) -> Option<HoverResult> {
    let (range, tag) = tag_at_offset(text, offset)?;
    let link = parse_link(tag)?;

    if !link.package.starts_with('@') && !link.package.contains('/') {
        debug!(package = %link.package, "local link, deferring to editor resolution");
        return None;
    }

    match Resolver::new(program).resolve(tag) {
        Ok(resolved) => Some(HoverResult {
            name: resolved.name,
            range,
        }),
        Err(err) => {
            debug!(%err, "hover resolution missed");
            None
        }
    }
}

//! The `{@link}` tag grammar.
//!
//! Grammar (bit-exact): `{@link PKG(!EXPORT)?(#MEMBER)?(:MODIFIER)?(#MEMBER2)?}`
//! where `PKG` matches `[\w@/.-]+` and the other fields match `[\w]+`.
//!
//! Parsing is a pure function of the input text: the same tag always yields
//! a structurally equal [`ParsedLink`], and malformed text yields `None`,
//! never an error. The tag may sit anywhere inside the input; surrounding
//! prose is ignored.
//!
//! The grammar has two member slots, one before and one after the modifier.
//! The parser captures both; which one resolution consults is governed by
//! [`ParsedLink::member_for_lookup`], so the precedence rule is an explicit,
//! tested behavior rather than a side effect of capture order.

use smol_str::SmolStr;

use crate::base::{TextRange, TextSize};

const TAG_OPEN: &str = "{@link";

/// The structured fields of one `{@link}` tag.
///
/// Only the package name is always present; every other field is optional.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedLink {
    /// The package segment (`one`, `@scope/pkg`, ...).
    pub package: SmolStr,
    /// The `!export` segment.
    pub export: Option<SmolStr>,
    /// The `#member` slot appearing before any modifier.
    pub member: Option<SmolStr>,
    /// The `:modifier` kind selector.
    pub modifier: Option<SmolStr>,
    /// The `#member` slot appearing after the modifier.
    pub member_after_modifier: Option<SmolStr>,
}

impl ParsedLink {
    /// The member slot resolution actually consults.
    ///
    /// When a modifier is present the post-modifier slot wins and the
    /// pre-modifier slot is ignored entirely; without a modifier the
    /// pre-modifier slot is used.
    pub fn member_for_lookup(&self) -> Option<&SmolStr> {
        if self.modifier.is_some() {
            self.member_after_modifier.as_ref()
        } else {
            self.member.as_ref()
        }
    }
}

/// Parse the first `{@link ...}` tag found in `text`.
///
/// Returns `None` when no tag matches the grammar.
pub fn parse_link(text: &str) -> Option<ParsedLink> {
    text.match_indices(TAG_OPEN)
        .find_map(|(idx, _)| parse_at(&text[idx..]).map(|(link, _)| link))
}

/// Find the tag whose span contains `offset`, for hover/definition requests.
///
/// Returns the tag's range within `text` together with the tag text itself.
pub fn tag_at_offset(text: &str, offset: TextSize) -> Option<(TextRange, &str)> {
    let offset = u32::from(offset) as usize;
    for (idx, _) in text.match_indices(TAG_OPEN) {
        if let Some((_, len)) = parse_at(&text[idx..]) {
            let end = idx + len;
            if offset >= idx && offset <= end {
                let range = TextRange::new(TextSize::from(idx as u32), TextSize::from(end as u32));
                return Some((range, &text[idx..end]));
            }
        }
    }
    None
}

/// Parse a tag starting exactly at the beginning of `text`.
///
/// On success also returns the number of bytes the tag occupies.
fn parse_at(text: &str) -> Option<(ParsedLink, usize)> {
    let mut cur = Cursor::new(text);

    if !cur.eat_str(TAG_OPEN) || !cur.eat_whitespace() {
        return None;
    }

    let package = cur.eat_while(is_package_char);
    if package.is_empty() {
        return None;
    }
    let package = SmolStr::new(package);

    let export = field(&mut cur, '!')?;
    let member = field(&mut cur, '#')?;
    let modifier = field(&mut cur, ':')?;
    let member_after_modifier = field(&mut cur, '#')?;

    if !cur.eat_char('}') {
        return None;
    }

    Some((
        ParsedLink {
            package,
            export,
            member,
            modifier,
            member_after_modifier,
        },
        cur.pos,
    ))
}

/// An optional `<marker><word>` segment.
///
/// Absent marker is fine (`Some(None)`); a marker followed by no word
/// characters breaks the whole tag (`None`).
fn field(cur: &mut Cursor<'_>, marker: char) -> Option<Option<SmolStr>> {
    if !cur.eat_char(marker) {
        return Some(None);
    }
    let run = cur.eat_while(is_word_char);
    if run.is_empty() {
        return None;
    }
    Some(Some(SmolStr::new(run)))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_package_char(c: char) -> bool {
    is_word_char(c) || matches!(c, '@' | '/' | '.' | '-')
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn eat_str(&mut self, prefix: &str) -> bool {
        if self.rest().starts_with(prefix) {
            self.pos += prefix.len();
            true
        } else {
            false
        }
    }

    fn eat_char(&mut self, expected: char) -> bool {
        if self.rest().starts_with(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consume at least one whitespace character.
    fn eat_whitespace(&mut self) -> bool {
        !self.eat_while(char::is_whitespace).is_empty()
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        for (idx, c) in self.rest().char_indices() {
            if !pred(c) {
                self.pos = start + idx;
                return &self.text[start..self.pos];
            }
        }
        self.pos = self.text.len();
        &self.text[start..]
    }
}

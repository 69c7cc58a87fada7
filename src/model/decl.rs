//! Declarations, symbols, and member tables.
//!
//! A [`Symbol`] is a named export together with every declaration that
//! contributes to it. Under declaration merging one exported name can denote
//! several independent declarations of different kinds (a class and a
//! same-named namespace, an interface and a class, ...), which is why
//! `declarations` is a list and why the `:modifier` tag segment exists.
//!
//! [`Declaration`] is a tagged variant: the kind is an explicit
//! [`DeclKind`], and the body shape is an explicit [`DeclBody`] — a
//! declaration is either member-bearing (class/interface-like) or
//! local-bearing (namespace-like), never both. The member resolver
//! dispatches exhaustively on that shape instead of probing for whichever
//! table happens to be present.

use smol_str::SmolStr;

use crate::base::{FileId, TextRange};
use rustc_hash::FxHashMap;

/// The kind of a single declaration, selectable via a `:modifier` segment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Class,
    Namespace,
    Interface,
    TypeAlias,
    Function,
    Enum,
    /// Anything the modifier grammar cannot name (variables, re-exports, ...).
    Other,
}

impl DeclKind {
    /// Map a tag modifier string onto a declaration kind.
    ///
    /// The enumeration is fixed; unrecognized modifiers select nothing.
    pub fn from_modifier(modifier: &str) -> Option<Self> {
        match modifier {
            "class" => Some(Self::Class),
            "namespace" => Some(Self::Namespace),
            "interface" => Some(Self::Interface),
            "type" => Some(Self::TypeAlias),
            "function" => Some(Self::Function),
            "enum" => Some(Self::Enum),
            _ => None,
        }
    }
}

/// A named member or local of a declaration.
///
/// Carries its own span and file, so a member hit resolves to the member
/// itself, not to its parent declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub name: SmolStr,
    pub span: TextRange,
    pub file: FileId,
}

impl Member {
    pub fn new(name: impl Into<SmolStr>, span: TextRange, file: FileId) -> Self {
        Self {
            name: name.into(),
            span,
            file,
        }
    }
}

/// The body shape of a declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclBody {
    /// Member-bearing bodies (classes, interfaces, enums): an ordered member
    /// list searched by exact name text.
    Members(Vec<Member>),
    /// Local-bearing bodies (namespaces, and the empty scope of type aliases
    /// and functions): a table keyed by escaped name.
    Locals(FxHashMap<SmolStr, Member>),
}

impl Default for DeclBody {
    fn default() -> Self {
        Self::empty_locals()
    }
}

impl DeclBody {
    /// An empty local table, the body of scope-only declarations.
    pub fn empty_locals() -> Self {
        Self::Locals(FxHashMap::default())
    }

    /// Build a local table from named members, keying by escaped name.
    pub fn locals(entries: impl IntoIterator<Item = Member>) -> Self {
        Self::Locals(
            entries
                .into_iter()
                .map(|m| (escape_leading_underscores(&m.name), m))
                .collect(),
        )
    }
}

/// One declaration contributing to an exported symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: SmolStr,
    pub span: TextRange,
    pub file: FileId,
    pub body: DeclBody,
}

impl Declaration {
    pub fn new(
        kind: DeclKind,
        name: impl Into<SmolStr>,
        span: TextRange,
        file: FileId,
        body: DeclBody,
    ) -> Self {
        Self {
            kind,
            name: name.into(),
            span,
            file,
            body,
        }
    }
}

/// A named top-level export and all declarations merged under that name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    name: SmolStr,
    /// Declarations in the order the program model reports them. The order
    /// carries no meaning beyond first-match-wins during disambiguation.
    declarations: Vec<Declaration>,
    /// Member table keyed by escaped name; populated for class-shaped
    /// exports, empty otherwise.
    members: FxHashMap<SmolStr, Member>,
    /// Index of the value declaration used for modifier-less resolution.
    value_decl: usize,
}

impl Symbol {
    pub fn new(name: impl Into<SmolStr>, declarations: Vec<Declaration>) -> Self {
        Self {
            name: name.into(),
            declarations,
            members: FxHashMap::default(),
            value_decl: 0,
        }
    }

    /// Mark which declaration is the symbol's value declaration.
    ///
    /// Defaults to the first; for a class+namespace merge the class is the
    /// value declaration regardless of report order.
    pub fn with_value_decl(mut self, index: usize) -> Self {
        debug_assert!(index < self.declarations.len());
        self.value_decl = index;
        self
    }

    /// Attach the symbol-level member table (class-shaped exports).
    pub fn with_members(mut self, members: impl IntoIterator<Item = Member>) -> Self {
        self.members = members
            .into_iter()
            .map(|m| (escape_leading_underscores(&m.name), m))
            .collect();
        self
    }

    pub fn name(&self) -> &SmolStr {
        &self.name
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn value_declaration(&self) -> &Declaration {
        &self.declarations[self.value_decl]
    }

    /// Look up a symbol-level member by escaped name.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.get(&escape_leading_underscores(name))
    }

    /// First declaration of the given kind, if any.
    pub fn declaration_of_kind(&self, kind: DeclKind) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.kind == kind)
    }
}

/// Escape an identifier the way symbol tables key their entries.
///
/// Names starting with two underscores gain a third, so user-written
/// `__proto`-style identifiers cannot collide with internal names.
pub fn escape_leading_underscores(name: &str) -> SmolStr {
    if name.starts_with("__") {
        SmolStr::new(format!("_{name}"))
    } else {
        SmolStr::new(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::TextSize;
    use rstest::rstest;

    fn range(start: u32, end: u32) -> TextRange {
        TextRange::new(TextSize::from(start), TextSize::from(end))
    }

    #[rstest]
    #[case("class", Some(DeclKind::Class))]
    #[case("namespace", Some(DeclKind::Namespace))]
    #[case("interface", Some(DeclKind::Interface))]
    #[case("type", Some(DeclKind::TypeAlias))]
    #[case("function", Some(DeclKind::Function))]
    #[case("enum", Some(DeclKind::Enum))]
    #[case("Class", None)]
    #[case("module", None)]
    #[case("", None)]
    fn modifier_mapping(#[case] modifier: &str, #[case] expected: Option<DeclKind>) {
        assert_eq!(DeclKind::from_modifier(modifier), expected);
    }

    #[test]
    fn test_escape_leading_underscores() {
        assert_eq!(escape_leading_underscores("plain"), "plain");
        assert_eq!(escape_leading_underscores("_one"), "_one");
        assert_eq!(escape_leading_underscores("__two"), "___two");
        assert_eq!(escape_leading_underscores("__"), "___");
    }

    #[test]
    fn default_body_is_an_empty_local_table() {
        assert_eq!(DeclBody::default(), DeclBody::empty_locals());
        assert!(matches!(DeclBody::default(), DeclBody::Locals(ref t) if t.is_empty()));
    }

    #[test]
    fn symbol_member_lookup_uses_escaped_names() {
        let file = FileId::new(0);
        let class = Declaration::new(
            DeclKind::Class,
            "Thing",
            range(0, 50),
            file,
            DeclBody::Members(vec![]),
        );
        let symbol = Symbol::new("Thing", vec![class]).with_members([
            Member::new("plain", range(10, 20), file),
            Member::new("__secret", range(25, 40), file),
        ]);

        assert!(symbol.member("plain").is_some());
        assert!(symbol.member("__secret").is_some());
        assert!(symbol.member("missing").is_none());
    }

    #[test]
    fn declaration_of_kind_takes_first_match() {
        let file = FileId::new(0);
        let decls = vec![
            Declaration::new(
                DeclKind::Class,
                "X",
                range(0, 10),
                file,
                DeclBody::Members(vec![]),
            ),
            Declaration::new(
                DeclKind::Namespace,
                "X",
                range(20, 30),
                file,
                DeclBody::empty_locals(),
            ),
            Declaration::new(
                DeclKind::Namespace,
                "X",
                range(40, 50),
                file,
                DeclBody::empty_locals(),
            ),
        ];
        let symbol = Symbol::new("X", decls);

        let ns = symbol.declaration_of_kind(DeclKind::Namespace).unwrap();
        assert_eq!(ns.span, range(20, 30));
        assert!(symbol.declaration_of_kind(DeclKind::Enum).is_none());
    }

    #[test]
    fn value_declaration_defaults_to_first() {
        let file = FileId::new(0);
        let decls = vec![
            Declaration::new(
                DeclKind::TypeAlias,
                "T",
                range(0, 10),
                file,
                DeclBody::empty_locals(),
            ),
            Declaration::new(
                DeclKind::Namespace,
                "T",
                range(20, 30),
                file,
                DeclBody::empty_locals(),
            ),
        ];
        let symbol = Symbol::new("T", decls.clone());
        assert_eq!(symbol.value_declaration().span, range(0, 10));

        let symbol = Symbol::new("T", decls).with_value_decl(1);
        assert_eq!(symbol.value_declaration().span, range(20, 30));
    }
}

//! Tag resolution — from parsed `{@link}` fields to a declaration span.
//!
//! The pipeline runs in stages, any of which can miss:
//!
//! 1. parse the tag grammar,
//! 2. scan program files for the named package's export (first match wins),
//! 3. optionally disambiguate merged declarations via the `:modifier`,
//! 4. optionally drill into a member or local,
//! 5. hand the final span back as a [`ResolvedLocation`].
//!
//! Every failure collapses into one [`ResolveError`] carrying an explicit
//! kind, so callers can tell "nothing to show" from "session
//! misconfigured" without inspecting error types.

use smol_str::SmolStr;
use tracing::{debug, warn};

use crate::base::{FileId, TextRange};
use crate::project::WorkspaceError;
use crate::tag::parse_link;

use super::decl::{DeclBody, DeclKind, Declaration, Symbol, escape_leading_underscores};
use super::manifest;
use super::program::Program;

/// Terminal output of the engine: the declaration (or member) a tag names.
///
/// Spans stay as character offsets here; they are mapped to line/column
/// only at the editor boundary.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedLocation {
    pub name: SmolStr,
    pub range: TextRange,
    pub file: FileId,
}

/// Why a resolution produced nothing.
///
/// All variants except [`ResolveError::Environment`] are per-tag lookup
/// misses that the caller should render as "show nothing". `Environment`
/// means the session itself is broken (no workspace, no build config) and
/// is worth surfacing as a setup problem.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("tag does not match the {{@link}} grammar")]
    GrammarMismatch,
    #[error("tag names package `{package}` but no export")]
    MissingExport { package: SmolStr },
    #[error("no package named `{0}` in the workspace")]
    PackageNotFound(SmolStr),
    #[error("package `{package}` has no export named `{export}`")]
    ExportNotFound { package: SmolStr, export: SmolStr },
    #[error("export `{export}` has no `{modifier}` declaration")]
    ModifierMismatch { export: SmolStr, modifier: SmolStr },
    #[error("member `{member}` not found in `{parent}`")]
    MemberNotFound { parent: SmolStr, member: SmolStr },
    #[error(transparent)]
    Environment(#[from] WorkspaceError),
}

impl ResolveError {
    /// True for per-tag misses, false for session-level faults.
    pub fn is_lookup_miss(&self) -> bool {
        !matches!(self, Self::Environment(_))
    }
}

/// Resolves tags against one program snapshot.
pub struct Resolver<'a> {
    program: &'a Program,
}

impl<'a> Resolver<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self { program }
    }

    /// Resolve a raw tag to the declaration it names.
    ///
    /// Total over tag text: malformed or unresolvable tags come back as
    /// lookup-miss errors, never panics.
    pub fn resolve(&self, tag: &str) -> Result<ResolvedLocation, ResolveError> {
        let link = parse_link(tag).ok_or(ResolveError::GrammarMismatch)?;
        debug!(package = %link.package, "resolving tag");

        let Some(export) = link.export.clone() else {
            return Err(ResolveError::MissingExport {
                package: link.package,
            });
        };

        let symbol = self.find_export(&link.package, &export)?;

        if let Some(modifier) = &link.modifier {
            let decl = Self::disambiguate(symbol, modifier)?;
            debug!(%modifier, name = %decl.name, "modifier selected declaration");
            return Self::resolve_in_declaration(decl, link.member_for_lookup());
        }

        match link.member_for_lookup() {
            Some(member) => {
                let found = symbol.member(member).ok_or_else(|| {
                    warn!(%member, export = %symbol.name(), "member not found");
                    ResolveError::MemberNotFound {
                        parent: symbol.name().clone(),
                        member: member.clone(),
                    }
                })?;
                Ok(ResolvedLocation {
                    name: found.name.clone(),
                    range: found.span,
                    file: found.file,
                })
            }
            None => {
                let decl = symbol.value_declaration();
                Ok(ResolvedLocation {
                    name: symbol.name().clone(),
                    range: decl.span,
                    file: decl.file,
                })
            }
        }
    }

    /// Scan program files for the named export inside the named package.
    ///
    /// Files are visited in model-reported order; the first file whose
    /// enclosing manifest matches AND whose export table has the name wins.
    /// A matching package without the export does not stop the scan — in a
    /// monorepo with stale duplicate manifests a later file may still
    /// match. First-match-wins is a documented simplicity trade-off, not
    /// best-match.
    fn find_export(&self, package: &str, export: &str) -> Result<&'a Symbol, ResolveError> {
        let mut package_seen = false;

        for file in self.program.files() {
            if file.is_declaration_only() || !file.has_exports() {
                continue;
            }

            let Some(declared) = manifest::package_name(file.path()) else {
                debug!(path = %file.path().display(), "no manifest found, skipping");
                continue;
            };
            if declared != package {
                debug!(%declared, wanted = %package, "package name mismatch");
                continue;
            }

            package_seen = true;
            if let Some(symbol) = file.export(export) {
                debug!(%export, path = %file.path().display(), "matched export");
                return Ok(symbol);
            }
        }

        if package_seen {
            Err(ResolveError::ExportNotFound {
                package: SmolStr::new(package),
                export: SmolStr::new(export),
            })
        } else {
            Err(ResolveError::PackageNotFound(SmolStr::new(package)))
        }
    }

    /// Pick the merged declaration a modifier names.
    ///
    /// Declarations are scanned in reported order; an unrecognized modifier
    /// string and a missing kind are the same miss.
    fn disambiguate<'s>(
        symbol: &'s Symbol,
        modifier: &SmolStr,
    ) -> Result<&'s Declaration, ResolveError> {
        DeclKind::from_modifier(modifier)
            .and_then(|kind| symbol.declaration_of_kind(kind))
            .ok_or_else(|| {
                warn!(%modifier, export = %symbol.name(), "no declaration for modifier");
                ResolveError::ModifierMismatch {
                    export: symbol.name().clone(),
                    modifier: modifier.clone(),
                }
            })
    }

    /// Resolve within a kind-selected declaration.
    ///
    /// Member-bearing bodies are searched by exact name text; local-bearing
    /// bodies by escaped name. Without a member request the declaration
    /// itself is the result.
    fn resolve_in_declaration(
        decl: &Declaration,
        member: Option<&SmolStr>,
    ) -> Result<ResolvedLocation, ResolveError> {
        let Some(member) = member else {
            return Ok(ResolvedLocation {
                name: decl.name.clone(),
                range: decl.span,
                file: decl.file,
            });
        };

        let found = match &decl.body {
            DeclBody::Members(members) => members.iter().find(|m| m.name == *member),
            DeclBody::Locals(locals) => locals.get(&escape_leading_underscores(member)),
        };

        found
            .map(|m| ResolvedLocation {
                name: m.name.clone(),
                range: m.span,
                file: m.file,
            })
            .ok_or_else(|| {
                warn!(%member, parent = %decl.name, "member not found in declaration");
                ResolveError::MemberNotFound {
                    parent: decl.name.clone(),
                    member: member.clone(),
                }
            })
    }
}

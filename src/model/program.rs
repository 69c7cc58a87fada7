//! The program model: analyzed source files and their export tables.
//!
//! The engine never builds this itself — a host supplies it (see
//! [`crate::ide::ModelProvider`]) and the resolver treats it as a read-only
//! snapshot for the duration of every resolution call.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::{FileId, LineIndex};

use super::decl::{Symbol, escape_leading_underscores};

/// The analyzed model of one source file.
pub struct FileModel {
    file: FileId,
    path: PathBuf,
    declaration_only: bool,
    /// Top-level export table keyed by escaped name.
    exports: FxHashMap<SmolStr, Symbol>,
    line_index: LineIndex,
}

impl FileModel {
    /// Build a file model over the file's source text.
    ///
    /// The text is only needed to derive the offset→line/column index; it is
    /// not retained.
    pub fn new(file: FileId, path: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            file,
            path: path.into(),
            declaration_only: false,
            exports: FxHashMap::default(),
            line_index: LineIndex::new(text),
        }
    }

    /// Mark this file as ambient/declaration-only; such files are never
    /// package candidates.
    pub fn declaration_only(mut self, yes: bool) -> Self {
        self.declaration_only = yes;
        self
    }

    /// Register a top-level export.
    pub fn add_export(&mut self, symbol: Symbol) {
        self.exports
            .insert(escape_leading_underscores(symbol.name()), symbol);
    }

    pub fn with_exports(mut self, exports: impl IntoIterator<Item = Symbol>) -> Self {
        for symbol in exports {
            self.add_export(symbol);
        }
        self
    }

    pub fn id(&self) -> FileId {
        self.file
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_declaration_only(&self) -> bool {
        self.declaration_only
    }

    pub fn has_exports(&self) -> bool {
        !self.exports.is_empty()
    }

    /// Look up a top-level export by (escaped) name.
    pub fn export(&self, name: &str) -> Option<&Symbol> {
        self.exports.get(&escape_leading_underscores(name))
    }

    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }
}

/// The deduplicated, ordered set of analyzed source files.
///
/// Iteration order is the order the model reported the files in, which is
/// what gives the export scan its first-match-wins behavior.
#[derive(Default)]
pub struct Program {
    files: IndexMap<FileId, FileModel>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file model. Re-adding a file replaces its model but keeps its
    /// original position in the scan order.
    pub fn add_file(&mut self, model: FileModel) {
        self.files.insert(model.id(), model);
    }

    pub fn file(&self, id: FileId) -> Option<&FileModel> {
        self.files.get(&id)
    }

    /// Iterate files in model-reported order.
    pub fn files(&self) -> impl Iterator<Item = &FileModel> {
        self.files.values()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

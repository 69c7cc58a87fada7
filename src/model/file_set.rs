//! File set management for tracking source files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::RwLock;

use crate::base::FileId;

/// Assigns stable [`FileId`]s to paths and tracks file contents.
///
/// Providers use this to mint ids while loading a workspace; the rest of
/// the engine only ever sees the handles. Thread-safe via internal locking.
#[derive(Debug, Default)]
pub struct FileSet {
    inner: RwLock<FileSetInner>,
}

#[derive(Debug, Default)]
struct FileSetInner {
    path_to_id: IndexMap<PathBuf, FileId>,
    id_to_path: IndexMap<FileId, PathBuf>,
    contents: IndexMap<FileId, Arc<str>>,
    next_id: u32,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the FileId for a path.
    ///
    /// The same path always yields the same id.
    pub fn file_id(&self, path: &Path) -> FileId {
        // Fast path: read lock
        {
            let inner = self.inner.read();
            if let Some(&id) = inner.path_to_id.get(path) {
                return id;
            }
        }

        let mut inner = self.inner.write();

        // Double-check after acquiring write lock
        if let Some(&id) = inner.path_to_id.get(path) {
            return id;
        }

        let id = FileId::new(inner.next_id);
        inner.next_id += 1;
        inner.path_to_id.insert(path.to_owned(), id);
        inner.id_to_path.insert(id, path.to_owned());
        id
    }

    /// Get the path for a FileId.
    pub fn path(&self, file: FileId) -> Option<PathBuf> {
        self.inner.read().id_to_path.get(&file).cloned()
    }

    /// Set the contents of a file.
    pub fn set_contents(&self, file: FileId, contents: impl Into<Arc<str>>) {
        self.inner.write().contents.insert(file, contents.into());
    }

    /// Get the contents of a file.
    pub fn contents(&self, file: FileId) -> Option<Arc<str>> {
        self.inner.read().contents.get(&file).cloned()
    }

    /// All known ids, in assignment order.
    pub fn files(&self) -> Vec<FileId> {
        self.inner.read().id_to_path.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().path_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stable_id_assignment() {
        let files = FileSet::new();

        let a = files.file_id(Path::new("/ws/one/src/index.ts"));
        let b = files.file_id(Path::new("/ws/two/src/index.ts"));
        let a_again = files.file_id(Path::new("/ws/one/src/index.ts"));

        assert_ne!(a, b);
        assert_eq!(a, a_again);
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_contents_round_trip() {
        let files = FileSet::new();
        let id = files.file_id(Path::new("/ws/index.ts"));

        assert!(files.contents(id).is_none());
        files.set_contents(id, "export class Quarterback {}");
        assert_eq!(
            files.contents(id).as_deref(),
            Some("export class Quarterback {}")
        );
    }

    #[test]
    fn test_path_lookup() {
        let files = FileSet::new();
        let path = Path::new("/ws/index.ts");
        let id = files.file_id(path);

        assert_eq!(files.path(id).as_deref(), Some(path));
        assert!(files.path(FileId::new(99)).is_none());
    }
}

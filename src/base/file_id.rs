//! File identifiers for tracking source files.

use std::fmt;

/// An interned identifier for a source file.
///
/// `FileId` is a lightweight handle (a single u32) identifying one file in
/// the workspace. The path it stands for lives in a
/// [`FileSet`](crate::model::FileSet); everything else in the engine passes
/// the handle around, so comparisons and hashing stay O(1).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FileId(u32);

impl FileId {
    /// Create a FileId from a raw index.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_id_equality() {
        assert_eq!(FileId::new(3), FileId::new(3));
        assert_ne!(FileId::new(3), FileId::new(4));
    }

    #[test]
    fn test_file_id_in_set() {
        use std::collections::HashSet;

        let set: HashSet<_> = [FileId::new(0), FileId::new(1), FileId::new(0)]
            .into_iter()
            .collect();
        assert_eq!(set.len(), 2);
    }
}

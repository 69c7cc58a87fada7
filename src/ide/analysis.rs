//! The session context: a lazily built, explicitly invalidated program.
//!
//! One [`AnalysisHost`] lives for the session. The program model is built
//! on first use and then shared read-only by every request — no locking is
//! needed after construction because no writer exists. Edits to source
//! files are invisible until [`AnalysisHost::invalidate`] forces a
//! rebuild; hosts should call it from their file-watch notifications.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::base::TextSize;
use crate::model::{Program, ResolveError, ResolvedLocation, Resolver};
use crate::project::WorkspaceError;

use super::goto::{Location, goto_definition};
use super::hover::{HoverResult, hover};

/// Supplies the analyzed program model.
///
/// The engine treats model construction as an external capability: the
/// provider typically discovers a [`Workspace`](crate::project::Workspace)
/// and loads a [`FileModel`](crate::model::FileModel) per source file.
pub trait ModelProvider: Send + Sync {
    fn build(&self) -> Result<Program, WorkspaceError>;
}

impl<F> ModelProvider for F
where
    F: Fn() -> Result<Program, WorkspaceError> + Send + Sync,
{
    fn build(&self) -> Result<Program, WorkspaceError> {
        self()
    }
}

/// Owns the cached program model for one session.
pub struct AnalysisHost {
    provider: Box<dyn ModelProvider>,
    program: RwLock<Option<Arc<Program>>>,
}

impl AnalysisHost {
    pub fn new(provider: impl ModelProvider + 'static) -> Self {
        Self {
            provider: Box::new(provider),
            program: RwLock::new(None),
        }
    }

    /// The current program, building it on first use.
    ///
    /// Build failures are environment faults and surface as such; they are
    /// not cached, so a later call retries.
    pub fn program(&self) -> Result<Arc<Program>, WorkspaceError> {
        if let Some(program) = self.program.read().clone() {
            return Ok(program);
        }

        let mut slot = self.program.write();
        // Another request may have built it while we waited for the lock.
        if let Some(program) = slot.clone() {
            return Ok(program);
        }

        debug!("building program model");
        let built = Arc::new(self.provider.build()?);
        debug!(files = built.len(), "program model ready");
        *slot = Some(Arc::clone(&built));
        Ok(built)
    }

    /// Drop the cached program so the next request rebuilds it.
    ///
    /// Call this from source-tree change notifications.
    pub fn invalidate(&self) {
        debug!("invalidating cached program model");
        *self.program.write() = None;
    }

    /// Take a read-only snapshot for one request.
    pub fn analysis(&self) -> Result<Analysis, WorkspaceError> {
        Ok(Analysis {
            program: self.program()?,
        })
    }
}

/// A read-only snapshot of the program, serving one request.
pub struct Analysis {
    program: Arc<Program>,
}

impl Analysis {
    /// Wrap an already-built program, bypassing a host. Useful for tests
    /// and for embedders that manage the model themselves.
    pub fn new(program: Arc<Program>) -> Self {
        Self { program }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Resolve a raw tag to the declaration it names.
    pub fn resolve(&self, tag: &str) -> Result<ResolvedLocation, ResolveError> {
        Resolver::new(&self.program).resolve(tag)
    }

    /// Hover request: the resolved symbol's name for the tag under the
    /// cursor, if any.
    pub fn hover(&self, text: &str, offset: TextSize) -> Option<HoverResult> {
        hover(&self.program, text, offset)
    }

    /// Definition request: the declaration's file and line/column span for
    /// the tag under the cursor, if any.
    pub fn goto_definition(&self, text: &str, offset: TextSize) -> Option<Location> {
        goto_definition(&self.program, text, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingProvider {
        builds: Arc<AtomicUsize>,
    }

    impl ModelProvider for CountingProvider {
        fn build(&self) -> Result<Program, WorkspaceError> {
            self.builds.fetch_add(1, Ordering::SeqCst);
            Ok(Program::new())
        }
    }

    #[test]
    fn builds_lazily_and_reuses_the_model() {
        let builds = Arc::new(AtomicUsize::new(0));
        let host = AnalysisHost::new(CountingProvider {
            builds: Arc::clone(&builds),
        });

        assert_eq!(builds.load(Ordering::SeqCst), 0);
        host.analysis().unwrap();
        host.analysis().unwrap();
        host.analysis().unwrap();
        assert_eq!(builds.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn invalidate_forces_a_rebuild() {
        let builds = Arc::new(AtomicUsize::new(0));
        let host = AnalysisHost::new(CountingProvider {
            builds: Arc::clone(&builds),
        });

        host.analysis().unwrap();
        host.invalidate();
        host.analysis().unwrap();
        assert_eq!(builds.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn build_failures_are_not_cached() {
        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let host = AnalysisHost::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(WorkspaceError::NoWorkspaceRoot("/nowhere".into()))
        });

        assert!(host.analysis().is_err());
        assert!(host.analysis().is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }
}

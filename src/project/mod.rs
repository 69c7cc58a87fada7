//! Workspace discovery and build-configuration aggregation.

mod workspace;

pub use workspace::{Workspace, WorkspaceError};

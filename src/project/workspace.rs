//! Workspace discovery — the fatal environment channel.
//!
//! Before any tag can resolve, the session needs a workspace root and a
//! build configuration naming the source files to analyze. Failures here
//! are [`WorkspaceError`]s and abort the whole resolution attempt; they are
//! one-time setup problems, not per-tag misses.
//!
//! The configuration may reference sub-projects. Each referenced project's
//! own file list is pulled in and the union is deduplicated while
//! preserving first-seen order, so the aggregated list is the
//! model-reported order the export scan later relies on.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use serde::Deserialize;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// The build configuration file that defines a project.
pub const CONFIG_FILE: &str = "tsconfig.json";

/// A session-fatal environment failure.
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("no workspace root detected at {0}")]
    NoWorkspaceRoot(PathBuf),
    #[error("no build configuration found under {0}")]
    NoBuildConfig(PathBuf),
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid build configuration {path}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BuildConfig {
    files: Option<Vec<String>>,
    references: Vec<ProjectReference>,
}

#[derive(Debug, Deserialize)]
struct ProjectReference {
    path: String,
}

/// A discovered workspace: its root and the aggregated source file list.
#[derive(Debug)]
pub struct Workspace {
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl Workspace {
    /// Discover the workspace rooted at `root`.
    ///
    /// The root must be an existing directory containing a build
    /// configuration. Referenced sub-projects with missing or unreadable
    /// configurations are logged and skipped, matching the tolerance the
    /// rest of the engine shows for per-file problems.
    pub fn discover(root: impl Into<PathBuf>) -> Result<Self, WorkspaceError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(WorkspaceError::NoWorkspaceRoot(root));
        }

        let config_path = root.join(CONFIG_FILE);
        if !config_path.is_file() {
            return Err(WorkspaceError::NoBuildConfig(root));
        }

        let config = read_config(&config_path)?;
        let mut files: IndexSet<PathBuf> = IndexSet::new();
        files.extend(project_files(&root, &config));

        for reference in &config.references {
            let ref_dir = root.join(&reference.path);
            let ref_config_path = ref_dir.join(CONFIG_FILE);
            if !ref_config_path.is_file() {
                warn!(path = %ref_config_path.display(), "referenced configuration not found, skipping");
                continue;
            }
            match read_config(&ref_config_path) {
                Ok(ref_config) => {
                    debug!(path = %ref_config_path.display(), "aggregating referenced project");
                    files.extend(project_files(&ref_dir, &ref_config));
                }
                Err(err) => {
                    warn!(path = %ref_config_path.display(), %err, "skipping unreadable referenced configuration");
                }
            }
        }

        Ok(Self {
            root,
            files: files.into_iter().collect(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The deduplicated source files, in aggregation order.
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}

fn read_config(path: &Path) -> Result<BuildConfig, WorkspaceError> {
    let contents = fs::read_to_string(path).map_err(|source| WorkspaceError::Io {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| WorkspaceError::InvalidConfig {
        path: path.to_owned(),
        source,
    })
}

/// The source files one configuration contributes.
///
/// An explicit `files` list wins; otherwise the project directory is
/// scanned for `.ts` sources, skipping dependency trees.
fn project_files(dir: &Path, config: &BuildConfig) -> Vec<PathBuf> {
    match &config.files {
        Some(files) => files.iter().map(|f| dir.join(f)).collect(),
        None => scan_sources(dir),
    }
}

fn scan_sources(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != "node_modules")
        .filter_map(|entry| entry.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == "ts"))
        .map(|e| e.into_path())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn missing_root_is_fatal() {
        let err = Workspace::discover("/definitely/not/a/dir").unwrap_err();
        assert!(matches!(err, WorkspaceError::NoWorkspaceRoot(_)));
    }

    #[test]
    fn missing_config_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let err = Workspace::discover(tmp.path()).unwrap_err();
        assert!(matches!(err, WorkspaceError::NoBuildConfig(_)));
    }

    #[test]
    fn malformed_config_is_fatal() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "{ nope").unwrap();
        let err = Workspace::discover(tmp.path()).unwrap_err();
        assert!(matches!(err, WorkspaceError::InvalidConfig { .. }));
    }

    #[test]
    fn aggregates_referenced_projects_in_order() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"{
                "files": ["src/main.ts"],
                "references": [
                    { "path": "packages/one" },
                    { "path": "packages/two" },
                    { "path": "packages/ghost" }
                ]
            }"#,
        )
        .unwrap();
        touch(&tmp.path().join("src/main.ts"));

        for pkg in ["one", "two"] {
            let dir = tmp.path().join("packages").join(pkg);
            fs::create_dir_all(&dir).unwrap();
            fs::write(
                dir.join(CONFIG_FILE),
                r#"{ "files": ["src/index.ts"] }"#,
            )
            .unwrap();
            touch(&dir.join("src/index.ts"));
        }
        // "ghost" has no config at all; it must be skipped, not fatal.

        let ws = Workspace::discover(tmp.path()).unwrap();
        let files: Vec<_> = ws
            .files()
            .iter()
            .map(|p| p.strip_prefix(tmp.path()).unwrap().to_owned())
            .collect();
        assert_eq!(
            files,
            vec![
                PathBuf::from("src/main.ts"),
                PathBuf::from("packages/one/src/index.ts"),
                PathBuf::from("packages/two/src/index.ts"),
            ]
        );
    }

    #[test]
    fn deduplicates_shared_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"{
                "files": ["shared.ts", "shared.ts"],
                "references": [{ "path": "." }]
            }"#,
        )
        .unwrap();
        touch(&tmp.path().join("shared.ts"));

        let ws = Workspace::discover(tmp.path()).unwrap();
        assert_eq!(ws.files().len(), 1);
    }

    #[test]
    fn configless_file_list_scans_sources() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), "{}").unwrap();
        touch(&tmp.path().join("src/a.ts"));
        touch(&tmp.path().join("src/b.ts"));
        touch(&tmp.path().join("src/readme.md"));
        touch(&tmp.path().join("node_modules/dep/index.ts"));

        let ws = Workspace::discover(tmp.path()).unwrap();
        let names: Vec<_> = ws
            .files()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.ts", "b.ts"]);
    }
}

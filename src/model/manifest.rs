//! Package manifests — mapping a source file to its owning package.
//!
//! A package's identity is the `name` field of the nearest `package.json`
//! above the file. Identity is recomputed on every call rather than cached,
//! so a resolution always sees what is on disk right now.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use smol_str::SmolStr;
use tracing::warn;

/// The manifest file that declares a package boundary.
pub const MANIFEST_FILE: &str = "package.json";

#[derive(Deserialize)]
struct Manifest {
    name: Option<String>,
}

/// Find the nearest manifest at or above `start`.
///
/// Walks parent directories until a manifest file is found or the
/// filesystem root is reached.
pub fn find_manifest(start: &Path) -> Option<PathBuf> {
    let mut dir = start;
    loop {
        let candidate = dir.join(MANIFEST_FILE);
        if candidate.is_file() {
            return Some(candidate);
        }
        dir = dir.parent()?;
    }
}

/// The declared package name owning `source_path`.
///
/// Unreadable or malformed manifests, and manifests without a `name`
/// field, count as not-found: the caller skips the file as a package
/// candidate instead of failing the resolution.
pub fn package_name(source_path: &Path) -> Option<SmolStr> {
    let dir = source_path.parent()?;
    let manifest_path = find_manifest(dir)?;

    let contents = match fs::read_to_string(&manifest_path) {
        Ok(contents) => contents,
        Err(err) => {
            warn!(path = %manifest_path.display(), %err, "could not read manifest");
            return None;
        }
    };

    let manifest: Manifest = match serde_json::from_str(&contents) {
        Ok(manifest) => manifest,
        Err(err) => {
            warn!(path = %manifest_path.display(), %err, "could not parse manifest");
            return None;
        }
    };

    manifest.name.map(SmolStr::new)
}

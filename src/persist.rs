//! Writing generated artifacts to a build directory.
//!
//! This is the part of the surrounding pipeline the CLI stands in for; the
//! plugin itself never touches the filesystem.

use crate::error::Result;
use crate::fingerprint::Fingerprint;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Outcome of comparing an existing artifact with a fresh build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactStatus {
    UpToDate,
    Stale { on_disk: Fingerprint },
    Missing,
}

/// Write `contents` to `out_dir/relative`, creating parent directories.
pub async fn write_artifact(out_dir: &Path, relative: &str, contents: &str) -> Result<PathBuf> {
    let target = out_dir.join(relative);
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    tokio::fs::write(&target, contents)
        .await
        .with_context(|| format!("Failed to write {}", target.display()))?;
    tracing::debug!("Persisted {} ({} bytes)", target.display(), contents.len());
    Ok(target)
}

/// Compare the artifact at `out_dir/relative` against `expected`.
pub async fn check_artifact(
    out_dir: &Path,
    relative: &str,
    expected: Fingerprint,
) -> Result<ArtifactStatus> {
    let target = out_dir.join(relative);
    match tokio::fs::read(&target).await {
        Ok(bytes) => {
            let on_disk = Fingerprint::of(&bytes);
            if on_disk == expected {
                Ok(ArtifactStatus::UpToDate)
            } else {
                Ok(ArtifactStatus::Stale { on_disk })
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ArtifactStatus::Missing),
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", target.display())),
    }
}

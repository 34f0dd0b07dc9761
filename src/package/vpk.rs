//! Stages a VPK directory layout from a decompiled APK and hands it to the
//! external packaging tool

use crate::package::error::{PackageError, Result};
use crate::package::param::ParamSfo;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Decompiled subtree → location inside the staging layout
pub const STAGED_TREES: &[(&str, &str)] = &[
    ("assets", "sce_sys/livearea/contents"),
    ("res", "res"),
];

pub const PARAM_SFO_PATH: &str = "sce_sys/param.sfo";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingReport {
    pub copied_files: usize,
    pub staged: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
}

/// Copy the packaged subtrees of `decompiled` into `staging`.
///
/// A missing subtree is skipped; staging fails only if none is present.
pub fn stage_layout(decompiled: &Path, staging: &Path) -> Result<StagingReport> {
    let mut report = StagingReport::default();

    for &(source, target) in STAGED_TREES {
        let source_dir = decompiled.join(source);
        if !source_dir.is_dir() {
            warn!("Skipping {:?}: directory not present", source_dir);
            report.skipped.push(source);
            continue;
        }

        let copied = copy_tree(&source_dir, &staging.join(target))?;
        debug!("Staged {} files from {:?}", copied, source_dir);
        report.copied_files += copied;
        report.staged.push(source);
    }

    if report.staged.is_empty() {
        return Err(PackageError::NothingToPackage {
            path: decompiled.to_path_buf(),
        });
    }

    Ok(report)
}

fn copy_tree(source: &Path, target: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(source) {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| std::io::Error::other(format!("Path error: {e}")))?;
        let destination = target.join(relative);

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&destination)?;
        } else {
            if let Some(parent) = destination.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &destination)?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Locate the VPK tool: an existing file path, or a bare name looked up on `PATH`
pub fn resolve_tool(tool: &Path) -> Result<PathBuf> {
    if tool.is_file() {
        return Ok(tool.to_path_buf());
    }
    if tool.components().count() == 1 {
        if let Ok(found) = which::which(tool) {
            debug!("Resolved VPK tool {:?} to {:?}", tool, found);
            return Ok(found);
        }
    }
    Err(PackageError::ToolNotFound {
        path: tool.to_path_buf(),
    })
}

/// Builds a VPK with an external tool such as the Vita SDK's `vita-pack-vpk`
#[derive(Debug, Clone)]
pub struct VpkPackager {
    vpk_tool: PathBuf,
    metadata: ParamSfo,
    staging_parent: Option<PathBuf>,
}

impl VpkPackager {
    pub fn new(vpk_tool: impl Into<PathBuf>) -> Self {
        Self {
            vpk_tool: vpk_tool.into(),
            metadata: ParamSfo::default(),
            staging_parent: None,
        }
    }

    pub fn metadata(mut self, metadata: ParamSfo) -> Self {
        self.metadata = metadata;
        self
    }

    /// Create the staging directory under `dir` instead of the system temp dir
    pub fn staging_parent(mut self, dir: impl Into<PathBuf>) -> Self {
        self.staging_parent = Some(dir.into());
        self
    }

    pub fn vpk_tool(&self) -> &Path {
        &self.vpk_tool
    }

    /// Stage `decompiled` and run the VPK tool to produce `output`.
    ///
    /// The staging directory is removed when this returns, whether or not
    /// packaging succeeded. Returns the absolute path of the VPK.
    pub async fn package(&self, decompiled: &Path, output: &Path) -> Result<PathBuf> {
        let vpk_tool = resolve_tool(&self.vpk_tool)?;
        if !decompiled.is_dir() {
            return Err(PackageError::SourceNotFound {
                path: decompiled.to_path_buf(),
            });
        }
        self.metadata.validate()?;

        let output = if output.is_absolute() {
            output.to_path_buf()
        } else {
            std::env::current_dir()?.join(output)
        };
        if let Some(parent) = output.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut builder = tempfile::Builder::new();
        builder.prefix("vpk-staging-");
        let staging = match &self.staging_parent {
            Some(parent) => builder.tempdir_in(parent)?,
            None => builder.tempdir()?,
        };
        info!("Staging {:?} in {:?}", decompiled, staging.path());

        let source = decompiled.to_path_buf();
        let staging_path = staging.path().to_path_buf();
        let report = tokio::task::spawn_blocking(move || stage_layout(&source, &staging_path))
            .await
            .map_err(std::io::Error::other)??;
        info!(
            "Staged {} files ({} skipped subtrees)",
            report.copied_files,
            report.skipped.len()
        );

        let param_path = staging.path().join(PARAM_SFO_PATH);
        if let Some(parent) = param_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&param_path, self.metadata.render()).await?;

        let mut cmd = Command::new(&vpk_tool);
        cmd.arg(&output)
            .arg(".")
            .current_dir(staging.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        debug!("Executing VPK tool with command: {:?}", cmd);

        let result = cmd.output().await.map_err(|source| PackageError::SpawnFailed {
            program: vpk_tool.display().to_string(),
            source,
        })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr).trim().to_string();
            warn!("VPK tool failed: {}", stderr);
            return Err(PackageError::ToolFailed {
                code: result.status.code(),
                stderr,
            });
        }

        if !output.is_file() {
            return Err(PackageError::OutputMissing { path: output });
        }

        info!("VPK file {:?} created successfully", output);
        Ok(output)
    }
}

//! Read-only view over an apktool output tree

use crate::classifier::error::{ClassifyError, Result};
use once_cell::unsync::OnceCell;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const MANIFEST_FILE: &str = "AndroidManifest.xml";
pub const LIB_DIR: &str = "lib";

/// A decompiled application tree as laid out by apktool
///
/// The manifest is read at most once per value and only when a rule asks
/// for it. Library presence is checked against the filesystem on demand.
#[derive(Debug)]
pub struct DecompiledApp {
    root: PathBuf,
    manifest: OnceCell<Option<String>>,
}

impl DecompiledApp {
    /// Open a decompiled tree, failing if the root is not an existing directory
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(ClassifyError::PathNotFound { path: root });
        }

        Ok(Self {
            root,
            manifest: OnceCell::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(MANIFEST_FILE)
    }

    pub fn lib_dir(&self) -> PathBuf {
        self.root.join(LIB_DIR)
    }

    /// Manifest text, `None` when the tree carries no manifest
    pub fn manifest(&self) -> Result<Option<&str>> {
        let manifest = self.manifest.get_or_try_init(|| {
            let path = self.manifest_path();
            match std::fs::read_to_string(&path) {
                Ok(content) => {
                    debug!("Read manifest {:?} ({} bytes)", path, content.len());
                    Ok(Some(content))
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    debug!("No manifest at {:?}", path);
                    Ok(None)
                }
                Err(source) => Err(ClassifyError::ManifestUnreadable { path, source }),
            }
        })?;

        Ok(manifest.as_deref())
    }

    /// Whether `lib/<abi>` is a directory
    pub fn has_abi_dir(&self, abi: &str) -> bool {
        self.lib_dir().join(abi).is_dir()
    }

    /// Whether `lib/<name>` exists, ignoring ABI subfolders
    pub fn has_library(&self, name: &str) -> bool {
        self.lib_dir().join(name).exists()
    }

    /// Whether `lib/<abi>/<name>` exists
    pub fn has_abi_library(&self, abi: &str, name: &str) -> bool {
        self.lib_dir().join(abi).join(name).exists()
    }

    /// Whether a directory exists directly under the tree root
    pub fn has_dir(&self, name: &str) -> bool {
        self.root.join(name).is_dir()
    }
}

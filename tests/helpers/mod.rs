//! Fixture builders shared by the integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;
use vita_port_check::classifier::{classify, DecompiledApp};
use vita_port_check::types::Verdict;

/// Manifest declaring the given packed GLES version, e.g. `0x00020000`
pub fn manifest_with_gles(version: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8" standalone="no"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android" package="com.example.game">
    <uses-feature android:glEsVersion="{version}" android:required="true"/>
    <application android:label="@string/app_name"/>
</manifest>
"#
    )
}

/// Builder for an apktool-style output tree in a temporary directory
pub struct AppTree {
    temp_dir: TempDir,
}

impl Default for AppTree {
    fn default() -> Self {
        Self::new()
    }
}

impl AppTree {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temporary directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn dir(self, relative_path: &str) -> Self {
        std::fs::create_dir_all(self.path().join(relative_path))
            .expect("Failed to create test directory");
        self
    }

    pub fn file(self, relative_path: &str, content: &[u8]) -> Self {
        let path = self.path().join(relative_path);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&path, content).expect("Failed to write test file");
        self
    }

    /// Create `lib/<abi>/`
    pub fn abi(self, abi: &str) -> Self {
        self.dir(&format!("lib/{abi}"))
    }

    /// Create `lib/<name>` outside any ABI folder
    pub fn lib(self, name: &str) -> Self {
        self.file(&format!("lib/{name}"), b"\x7fELF")
    }

    /// Create `lib/<abi>/<name>`
    pub fn abi_lib(self, abi: &str, name: &str) -> Self {
        self.file(&format!("lib/{abi}/{name}"), b"\x7fELF")
    }

    pub fn manifest(self, content: &str) -> Self {
        self.file("AndroidManifest.xml", content.as_bytes())
    }

    pub fn gles(self, version: &str) -> Self {
        self.manifest(&manifest_with_gles(version))
    }

    pub fn open(&self) -> DecompiledApp {
        DecompiledApp::open(self.path()).expect("Failed to open decompiled tree")
    }

    pub fn classify(&self) -> Verdict {
        classify(&self.open()).expect("Classification failed")
    }
}

/// Write an executable shell script into `dir`
#[cfg(unix)]
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("Failed to write script");
    let permissions = std::fs::Permissions::from_mode(0o755);
    std::fs::set_permissions(&path, permissions).expect("Failed to make script executable");
    path
}

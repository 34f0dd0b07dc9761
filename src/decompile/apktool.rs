//! Drives `java -jar apktool.jar d` and streams its console output

use crate::decompile::error::{DecompileError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Output directory apktool is pointed at when the caller does not pick one
pub fn default_output_dir(apk: &Path) -> PathBuf {
    let stem = apk
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app".to_string());
    PathBuf::from(format!("decompiled_{stem}_apk"))
}

/// Lossy text of one output line without its `\r\n` / `\n` terminator
fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}

/// apktool wrapper
#[derive(Debug, Clone)]
pub struct ApktoolDecompiler {
    java: PathBuf,
    apktool_jar: PathBuf,
    work_dir: PathBuf,
    force: bool,
}

impl ApktoolDecompiler {
    /// Create a decompiler using the `java` found on `PATH`
    pub fn new(apktool_jar: impl Into<PathBuf>) -> Result<Self> {
        let java = which::which("java").map_err(|e| DecompileError::JavaNotFound {
            reason: e.to_string(),
        })?;
        Ok(Self::with_java(java, apktool_jar))
    }

    pub fn with_java(java: impl Into<PathBuf>, apktool_jar: impl Into<PathBuf>) -> Self {
        Self {
            java: java.into(),
            apktool_jar: apktool_jar.into(),
            work_dir: PathBuf::from("."),
            force: false,
        }
    }

    /// Directory relative output paths are resolved against.
    ///
    /// A relative work dir is itself relative to the current directory.
    pub fn work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    /// Overwrite an existing output directory (`apktool d -f`)
    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn java(&self) -> &Path {
        &self.java
    }

    pub fn apktool_jar(&self) -> &Path {
        &self.apktool_jar
    }

    /// Where `decompile` will write for the given APK and optional override
    pub fn resolve_output(&self, apk: &Path, output: Option<&Path>) -> PathBuf {
        let output = output
            .map(Path::to_path_buf)
            .unwrap_or_else(|| default_output_dir(apk));
        if output.is_absolute() {
            output
        } else {
            self.work_dir.join(output)
        }
    }

    /// Arguments passed to `java`
    pub fn command_args(&self, apk: &Path, output: &Path) -> Vec<OsString> {
        self.args_with_jar(&self.apktool_jar, apk, output)
    }

    fn args_with_jar(&self, apktool_jar: &Path, apk: &Path, output: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-jar".into(),
            apktool_jar.into(),
            "d".into(),
            apk.into(),
            "-o".into(),
            output.into(),
        ];
        if self.force {
            args.push("-f".into());
        }
        args
    }

    /// Decompile `apk`, passing every stdout/stderr line to `on_line` as it
    /// arrives. Returns the directory apktool wrote to.
    pub async fn decompile<F>(
        &self,
        apk: &Path,
        output: Option<&Path>,
        mut on_line: F,
    ) -> Result<PathBuf>
    where
        F: FnMut(&str),
    {
        if !apk.is_file() {
            return Err(DecompileError::ApkNotFound {
                path: apk.to_path_buf(),
            });
        }
        if !self.apktool_jar.is_file() {
            return Err(DecompileError::ApktoolNotFound {
                path: self.apktool_jar.clone(),
            });
        }

        // apktool only ever sees absolute paths
        let apk = std::path::absolute(apk)?;
        let output = std::path::absolute(self.resolve_output(&apk, output))?;
        let apktool_jar = std::path::absolute(&self.apktool_jar)?;
        info!("Decompiling {:?} into {:?}", apk, output);

        let mut cmd = Command::new(&self.java);
        cmd.args(self.args_with_jar(&apktool_jar, &apk, &output))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(windows)]
        cmd.creation_flags(CREATE_NO_WINDOW);

        debug!("Executing apktool with command: {:?}", cmd);

        let mut child = cmd.spawn().map_err(|source| DecompileError::SpawnFailed {
            program: self.java.display().to_string(),
            source,
        })?;

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            return Err(std::io::Error::other("apktool output was not captured").into());
        };
        // Raw segments: apktool may print file names that are not UTF-8
        let mut stdout = BufReader::new(stdout).split(b'\n');
        let mut stderr = BufReader::new(stderr).split(b'\n');
        let mut stdout_open = true;
        let mut stderr_open = true;

        while stdout_open || stderr_open {
            tokio::select! {
                line = stdout.next_segment(), if stdout_open => match line? {
                    Some(line) => on_line(&decode_line(&line)),
                    None => stdout_open = false,
                },
                line = stderr.next_segment(), if stderr_open => match line? {
                    Some(line) => on_line(&decode_line(&line)),
                    None => stderr_open = false,
                },
            }
        }

        let status = child.wait().await?;
        if !status.success() {
            warn!("apktool failed for {:?}: {}", apk, status);
            return Err(DecompileError::ToolFailed {
                code: status.code(),
            });
        }

        info!("Decompiled {:?} into {:?}", apk, output);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_dir() {
        assert_eq!(
            default_output_dir(Path::new("/games/Some Game.apk")),
            PathBuf::from("decompiled_Some Game_apk")
        );
    }

    #[test]
    fn test_resolve_output_relative_and_absolute() {
        let decompiler = ApktoolDecompiler::with_java("java", "apktool.jar").work_dir("/work");

        assert_eq!(
            decompiler.resolve_output(Path::new("game.apk"), None),
            PathBuf::from("/work/decompiled_game_apk")
        );
        assert_eq!(
            decompiler.resolve_output(Path::new("game.apk"), Some(Path::new("/out/game"))),
            PathBuf::from("/out/game")
        );
    }

    #[test]
    fn test_command_args() {
        let decompiler = ApktoolDecompiler::with_java("java", "/tools/apktool.jar");
        let args = decompiler.command_args(Path::new("game.apk"), Path::new("out"));
        assert_eq!(
            args,
            vec!["-jar", "/tools/apktool.jar", "d", "game.apk", "-o", "out"]
                .into_iter()
                .map(OsString::from)
                .collect::<Vec<_>>()
        );

        let forced = decompiler.force(true);
        let args = forced.command_args(Path::new("game.apk"), Path::new("out"));
        assert_eq!(args.last(), Some(&OsString::from("-f")));
    }

    #[test]
    fn test_decode_line() {
        assert_eq!(decode_line(b"I: Baksmaling classes.dex...\r"), "I: Baksmaling classes.dex...");
        assert_eq!(decode_line(b"I: Decoding caf\xe9.png"), "I: Decoding caf\u{fffd}.png");
    }

    #[tokio::test]
    async fn test_missing_apk() {
        let decompiler = ApktoolDecompiler::with_java("java", "apktool.jar");
        let result = decompiler
            .decompile(Path::new("/definitely/not/here.apk"), None, |_| {})
            .await;

        assert!(matches!(result, Err(DecompileError::ApkNotFound { .. })));
    }
}

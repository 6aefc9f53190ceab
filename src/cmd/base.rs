// ============================================================================
// src/cmd/base.rs – Allowlisted external command runner (for system utilities)
// ============================================================================

use anyhow::{anyhow, Context, Result};
use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

/// Safe wrapper for external process execution. The orchestrator only ever
/// spawns `bash` and `sudo` from fixed locations; nothing is resolved via
/// `$PATH`. Execution is fully blocking: the update waits for however long
/// the package manager or clone takes, with no timeout and no cancellation.
#[derive(Debug, Clone)]
pub struct Cmd {
    pub path: String,
}

impl Cmd {
    /// Create a new allowlisted command runner.
    pub fn new_allowlisted<S: Into<String>>(path: S) -> Result<Self> {
        let path_str = path.into();
        // Security measure: restrict to known binaries
        let allowed = [
            "/bin/bash",
            "/usr/bin/bash",
            "/bin/sudo",
            "/usr/bin/sudo",
        ];
        if !allowed.contains(&path_str.as_str()) {
            return Err(anyhow!("Command '{}' not in allowlist", path_str));
        }

        Ok(Self { path: path_str })
    }

    /// Run the command with `args`, optionally feeding `input` on stdin.
    /// Stdout and stderr are inherited so the operator sees the external
    /// tools' own progress output. Returns the exit status (-1 when the
    /// child died to a signal).
    pub fn run(&self, args: &[&str], input: Option<&[u8]>) -> Result<i32> {
        let mut cmd = Command::new(&self.path);
        cmd.args(args);
        cmd.stdin(if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        });

        let mut child = cmd
            .spawn()
            .with_context(|| format!("spawn {}", self.path))?;

        if let Some(bytes) = input {
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(bytes).context("writing stdin")?;
            }
        }

        let status = child
            .wait()
            .with_context(|| format!("wait for {}", self.path))?;
        Ok(status.code().unwrap_or(-1))
    }
}

/// First existing candidate path, for the usual "where does this distro
/// keep it" lookups.
pub fn find_binary(candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .copied()
        .find(|p| Path::new(p).exists())
        .map(|p| p.to_string())
}

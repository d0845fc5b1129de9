// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Step outputs and failure annotations for CI runners.
//!
//! ```text
//! GITHUB_OUTPUT=/path  --> append "name=value\n" to /path
//! (unset)              --> print  "name=value" on stdout
//!
//! GITHUB_ACTIONS=true  --> "::error::message" annotation on failure
//! ```


use anyhow::Context;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Output names set by a run.
pub const BACKUP_OUTPUT: &str = "backup";
pub const PATH_OUTPUT: &str = "path";

/// Destination of step outputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputSink {
    /// Append `name=value` lines to a runner-provided file.
    File(PathBuf),
    /// Print `name=value` lines on stdout.
    Stdout,
}

impl OutputSink {
    /// Sink chosen from the `GITHUB_OUTPUT` environment variable.
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var_os("GITHUB_OUTPUT")
            .filter(|path| !path.is_empty())
            .map_or(Self::Stdout, |path| Self::File(PathBuf::from(path)))
    }

    /// Record one output value.
    ///
    /// # Errors
    ///
    /// Returns an error if the output file cannot be opened or written.
    pub fn set_output(&self, name: &str, value: &str) -> Result<()> {
        let line = format_output(name, value);
        match self {
            Self::File(path) => append_line(path, &line),
            Self::Stdout => {
                println!("{line}");
                Ok(())
            }
        }
    }
}

/// `name=value`, or a heredoc block when the value spans lines.
#[must_use]
pub fn format_output(name: &str, value: &str) -> String {
    if value.contains('\n') {
        let delimiter = heredoc_delimiter(value);
        format!("{name}<<{delimiter}\n{value}\n{delimiter}")
    } else {
        format!("{name}={value}")
    }
}

/// First of `ARGO_ENV_EOF`, `ARGO_ENV_EOF_1`, ... that no line of `value` equals.
fn heredoc_delimiter(value: &str) -> String {
    let taken = |candidate: &str| value.lines().any(|line| line.trim_end_matches('\r') == candidate);
    let mut delimiter = String::from("ARGO_ENV_EOF");
    let mut suffix = 0_u32;
    while taken(&delimiter) {
        suffix += 1;
        delimiter = format!("ARGO_ENV_EOF_{suffix}");
    }
    delimiter
}

fn append_line(path: &Path, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open output file {}", path.display()))?;
    writeln!(file, "{line}")
        .with_context(|| format!("failed to write output file {}", path.display()))
}

/// Whether the process runs as a GitHub Actions step.
#[must_use]
pub fn running_in_actions() -> bool {
    std::env::var("GITHUB_ACTIONS").is_ok_and(|v| v == "true")
}

/// Error annotation line understood by the runner.
#[must_use]
pub fn error_annotation(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{escaped}")
}

/// Print a failure annotation when running under GitHub Actions.
pub fn annotate_error(message: &str) {
    if running_in_actions() {
        println!("{}", error_annotation(message));
    }
}

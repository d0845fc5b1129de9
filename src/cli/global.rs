// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options available for all commands.
//!
//! # Option Precedence
//!
//! ```text
//! --inputs FILE        ← TOML input files (can repeat)
//! --no-env             ← Ignore INPUT_* env vars
//! --set NAME=VALUE     ← Direct input override
//! --manifest-path FILE ← manifest_path override
//! --backup-path FILE   ← Where the original manifest is copied
//! --log-level N        ← Console verbosity (0-5)
//! --file-log-level     ← File verbosity (overrides --log-level)
//!
//! Precedence: command options > --manifest-path > --set > INPUT_* > --inputs
//! ```

use clap::Args;
use std::path::PathBuf;

use crate::config::MANIFEST_PATH;
use crate::logging::Verbosity;

/// Default location of the pre-edit backup copy.
pub const DEFAULT_BACKUP_PATH: &str = ".manifest.bak.yaml";

/// Global options available for all commands.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to a TOML file of input values.
    /// Can be specified multiple times.
    #[arg(short = 'i', long = "inputs", value_name = "FILE", action = clap::ArgAction::Append)]
    pub input_files: Vec<PathBuf>,

    /// Sets an input, such as 'image_tag=sha-1234'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "NAME=VALUE", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Ignores INPUT_* environment variables.
    #[arg(long = "no-env")]
    pub no_env: bool,

    /// Manifest to edit (the `manifest_path` input).
    #[arg(short = 'm', long = "manifest-path", value_name = "FILE")]
    pub manifest_path: Option<PathBuf>,

    /// Where the original manifest is copied before an edit.
    #[arg(long = "backup-path", value_name = "FILE", default_value = DEFAULT_BACKUP_PATH)]
    pub backup_path: PathBuf,

    /// Console log level (0=off, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=i64::from(Verbosity::MAX_LEVEL))
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=i64::from(Verbosity::MAX_LEVEL))
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl GlobalOptions {
    /// Converts command-line options to input overrides, in application order.
    #[must_use]
    pub fn to_input_overrides(&self) -> Vec<String> {
        let mut overrides = self.options.clone();

        if let Some(ref path) = self.manifest_path {
            overrides.push(format!("{}={}", MANIFEST_PATH.name, path.display()));
        }

        overrides
    }
}

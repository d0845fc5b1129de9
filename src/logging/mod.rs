// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Diagnostics for a pipeline step.
//!
//! ```text
//! --log-level N / RUNNER_DEBUG=1 --> Verbosity --> stderr layer
//! --log-file F, --file-log-level --> Verbosity --> file layer (non_blocking)
//! ```
//!
//! Both layers only see events from this crate. stdout carries step outputs
//! and command results, so nothing here writes to it.

use anyhow::Context;
use bon::Builder;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::Result;

/// How much the tool reports, from `--log-level 0` to `--log-level 5`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Off,
    Error,
    Warn,
    /// Completed edits.
    #[default]
    Info,
    /// Resolved inputs, edit options and manifest content.
    Debug,
    Trace,
}

impl Verbosity {
    /// Highest accepted `--log-level`.
    pub const MAX_LEVEL: u8 = 5;

    /// Verbosity for a numeric level, `None` above [`Self::MAX_LEVEL`].
    #[must_use]
    pub const fn from_level(level: u8) -> Option<Self> {
        Some(match level {
            0 => Self::Off,
            1 => Self::Error,
            2 => Self::Warn,
            3 => Self::Info,
            4 => Self::Debug,
            5 => Self::Trace,
            _ => return None,
        })
    }

    /// Default console verbosity given the value of `RUNNER_DEBUG`.
    ///
    /// Re-running a job with step debugging sets `RUNNER_DEBUG=1`.
    #[must_use]
    pub fn for_runner(runner_debug: Option<&str>) -> Self {
        if runner_debug == Some("1") {
            Self::Debug
        } else {
            Self::Info
        }
    }

    /// `EnvFilter` directive scoped to this crate.
    #[must_use]
    pub const fn directive(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Error => "argo_env=error",
            Self::Warn => "argo_env=warn",
            Self::Info => "argo_env=info",
            Self::Debug => "argo_env=debug",
            Self::Trace => "argo_env=trace",
        }
    }
}

/// Where and how much to log.
#[derive(Debug, Clone, Default, Builder)]
pub struct LogSettings {
    #[builder(default)]
    pub console: Verbosity,
    #[builder(into)]
    pub file: Option<PathBuf>,
    /// Verbosity of the file layer; follows `console` when unset.
    pub file_verbosity: Option<Verbosity>,
}

/// Flushes the log file when dropped.
#[must_use = "dropping the guard stops file logging"]
pub struct LogGuard(Option<WorkerGuard>);

/// Install the global subscriber.
///
/// # Errors
///
/// Returns an error if the log file or its directory cannot be created.
pub fn init(settings: &LogSettings) -> Result<LogGuard> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_filter(EnvFilter::new(settings.console.directive()));

    let (file, guard) = match &settings.file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(create_log_file(path)?);
            let verbosity = settings.file_verbosity.unwrap_or(settings.console);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(EnvFilter::new(verbosity.directive()));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry().with(console).with(file).init();
    Ok(LogGuard(guard))
}

fn create_log_file(path: &Path) -> Result<std::fs::File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    std::fs::File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))
}

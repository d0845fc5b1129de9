// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for argo-env using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! argo-env [global options] <command>
//! run
//! put [entry options]
//! delete --env --key
//! get --env --key
//! list
//! inputs
//! version
//! ```

pub mod entry;
pub mod global;


use crate::cli::entry::{DeleteArgs, GetArgs, PutArgs};
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// ArgoCD manifest environment editor
///
/// Adds, updates and removes entries of the `environments` list of a
/// deployment manifest.
#[derive(Debug, Parser)]
#[command(
    name = "argo-env",
    author,
    version,
    about = "ArgoCD manifest environment editor",
    long_about = "argo-env Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Edits the `environments` list of an ArgoCD deployment manifest.\n\n\
                  As a pipeline step, `argo-env run` reads its inputs from INPUT_*\n\
                  environment variables. `argo-env put` and `argo-env delete` take\n\
                  the same inputs as options.",
    after_help = "INPUTS:\n\n\
                  Every command resolves named inputs (action, manifest_path, env,\n\
                  key, image_tag, ...). Sources, lowest priority first: files given\n\
                  with --inputs, INPUT_* environment variables (unless --no-env),\n\
                  --set NAME=VALUE, then the options of the command itself."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Applies the edit named by the `action` input.
    Run,

    /// Adds or updates an environment entry.
    Put(PutArgs),

    /// Removes an environment entry.
    Delete(DeleteArgs),

    /// Prints one environment entry.
    Get(GetArgs),

    /// Lists the environment entries.
    List,

    /// Lists the resolved inputs and their sources.
    Inputs,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

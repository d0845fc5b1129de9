// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> input overrides --> InputLoader --> Inputs --> cmd::run_* handlers
//!   run/put/delete (edit), get/list (show), inputs
//! ```

pub mod edit;
pub mod inputs;
pub mod show;


use crate::cli::global::GlobalOptions;
use crate::config::loader::{DEFAULT_ENV_PREFIX, InputLoader};
use crate::error::InputError;

/// Loader for the global options plus command-specific overrides.
///
/// # Errors
///
/// Returns [`InputError::Malformed`] if a `--set` value has no `=`.
pub fn input_loader(
    global: &GlobalOptions,
    command_overrides: &[(&str, String)],
) -> Result<InputLoader, InputError> {
    let mut loader = global
        .input_files
        .iter()
        .fold(InputLoader::new(), InputLoader::add_toml_file);

    if !global.no_env {
        loader = loader.with_env_prefix(DEFAULT_ENV_PREFIX);
    }

    loader = loader.set_all(global.to_input_overrides())?;
    command_overrides
        .iter()
        .try_fold(loader, |loader, (name, value)| loader.set(name, value))
}

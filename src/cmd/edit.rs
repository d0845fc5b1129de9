// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Edit command (`run`, `put`, `delete`).
//!
//! ```text
//! Inputs --> ActionInputs (validate, no I/O yet)
//!        --> read manifest
//!        --> write backup      --> output `backup`
//!        --> put_env / delete_env
//!        --> write manifest    --> output `path`
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{ActionInputs, Edit, Inputs};
use crate::error::{ArgoEnvError, Result};
use crate::manifest::Manifest;
use crate::manifest::edit::{delete_env, put_env};
use crate::outputs::{BACKUP_OUTPUT, OutputSink, PATH_OUTPUT};

/// Apply the edit described by `inputs` and return the written manifest path.
///
/// The target manifest is only written after the edit succeeds; the backup is
/// written as soon as the original has been read.
///
/// # Errors
///
/// Returns an error if an input is missing or invalid, the manifest cannot be
/// read or written, or the edit is refused.
pub fn run_edit_command(inputs: &Inputs, backup_path: &Path, sink: &OutputSink) -> Result<PathBuf> {
    let ActionInputs {
        manifest_path,
        options,
        edit,
    } = ActionInputs::from_inputs(inputs).map_err(ArgoEnvError::from)?;

    debug!(input = ?edit, "resolved inputs");
    debug!(options = %options, "edit options");

    let original = Manifest::read(&manifest_path).map_err(ArgoEnvError::from)?;
    original.write(backup_path).map_err(ArgoEnvError::from)?;
    debug!(content = %original.to_json(), "manifest content");
    sink.set_output(BACKUP_OUTPUT, &backup_path.display().to_string())?;

    let result = match &edit {
        Edit::Put(candidate) => put_env(candidate, &original, &options),
        Edit::Delete(target) => delete_env(target, &original, &options),
    }
    .map_err(ArgoEnvError::from)?;

    result.write(&manifest_path).map_err(ArgoEnvError::from)?;
    match &edit {
        Edit::Put(candidate) => info!(id = %candidate.id(), path = %manifest_path.display(), "updated manifest environments"),
        Edit::Delete(target) => info!(id = %target, path = %manifest_path.display(), "deleted manifest environment"),
    }
    debug!(content = %result.to_json(), "manifest after {}", edit.action());

    sink.set_output(PATH_OUTPUT, &manifest_path.display().to_string())?;
    Ok(manifest_path)
}

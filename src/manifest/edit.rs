// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment list lookups and edits.
//!
//! ```text
//! put_env(candidate)                 delete_env(target)
//!   exists && !enable_update           !exists
//!     --> AlreadyExists                  --> NotFound
//!   clone                              protection && permanent
//!     exists --> replace in place        --> Protected
//!     else   --> append                clone, remove at index
//! ```
//!
//! Edits never touch the input manifest; they return a modified clone.

use serde_yaml::Value;
use tracing::debug;

use super::Manifest;
use super::environment::{EnvKey, Environment, field};
use crate::config::types::Lifecycle;
use crate::error::{ManifestError, ManifestResult};

/// Policy switches for a single edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOptions {
    /// Allow `put` to replace an existing entry.
    pub enable_update: bool,
    /// Refuse to `delete` entries whose lifecycle is `permanent`.
    pub enable_permanent_protection: bool,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            enable_update: true,
            enable_permanent_protection: true,
        }
    }
}

impl std::fmt::Display for EditOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let update = if self.enable_update { "ENABLE_UPDATE" } else { "DISABLE_UPDATE" };
        let protect = if self.enable_permanent_protection {
            "ENABLE_PER_PROTECT"
        } else {
            "DISABLE_PER_PROTECT"
        };
        write!(f, "{update} / {protect}")
    }
}

/// Whether the list holds an entry for `(env, key)`.
#[must_use]
pub fn exists_env(env: &str, key: &str, manifest: &Manifest) -> bool {
    get_env_index_of(env, key, manifest).is_some()
}

/// First entry for `(env, key)`.
///
/// # Errors
///
/// Returns [`ManifestError::NotFound`] if no entry matches.
pub fn get_env<'a>(env: &str, key: &str, manifest: &'a Manifest) -> ManifestResult<&'a Value> {
    get_env_index_of(env, key, manifest)
        .map(|index| &manifest.environments()[index])
        .ok_or_else(|| not_found(env, key))
}

/// Position of the first entry for `(env, key)`.
#[must_use]
pub fn get_env_index_of(env: &str, key: &str, manifest: &Manifest) -> Option<usize> {
    let target = EnvKey::new(env, key);
    manifest
        .environments()
        .iter()
        .position(|entry| target.matches(entry))
}

/// Insert or replace the entry for the candidate's `(env, key)`.
///
/// A replaced entry keeps its position; a new entry is appended.
///
/// # Errors
///
/// Returns [`ManifestError::AlreadyExists`] if the entry exists and
/// `enable_update` is off.
pub fn put_env(
    candidate: &Environment,
    manifest: &Manifest,
    options: &EditOptions,
) -> ManifestResult<Manifest> {
    let existing = get_env_index_of(&candidate.env, &candidate.key, manifest);

    if existing.is_some() && !options.enable_update {
        debug!(manifest = %manifest.to_json(), "put rejected");
        return Err(ManifestError::AlreadyExists {
            env: candidate.env.clone(),
            key: candidate.key.clone(),
        });
    }

    let entry = candidate.to_value()?;
    Ok(manifest.with_environments(|environments| match existing {
        Some(index) => {
            debug!(id = %candidate.id(), index, "replacing environment");
            environments[index] = entry;
        }
        None => {
            debug!(id = %candidate.id(), "appending environment");
            environments.push(entry);
        }
    }))
}

/// Remove the entry for `(target.env, target.key)`.
///
/// # Errors
///
/// Returns [`ManifestError::NotFound`] if no entry matches, or
/// [`ManifestError::Protected`] if the entry is permanent and
/// `enable_permanent_protection` is on.
pub fn delete_env(
    target: &EnvKey,
    manifest: &Manifest,
    options: &EditOptions,
) -> ManifestResult<Manifest> {
    let Some(index) = get_env_index_of(&target.env, &target.key, manifest) else {
        debug!(manifest = %manifest.to_json(), "delete target missing");
        return Err(not_found(&target.env, &target.key));
    };

    let entry = &manifest.environments()[index];
    if options.enable_permanent_protection
        && field(entry, "lifecycle") == Some(Lifecycle::Permanent.as_str())
    {
        debug!(manifest = %manifest.to_json(), "delete rejected");
        return Err(ManifestError::Protected {
            env: target.env.clone(),
            key: target.key.clone(),
        });
    }

    debug!(id = %target, index, "removing environment");
    Ok(manifest.with_environments(|environments| {
        environments.remove(index);
    }))
}

fn not_found(env: &str, key: &str) -> ManifestError {
    ManifestError::NotFound {
        env: env.to_string(),
        key: key.to_string(),
    }
}

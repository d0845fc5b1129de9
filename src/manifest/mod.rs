// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Deployment manifest document.
//!
//! ```text
//! read(path) --> failsafe::from_str --> Manifest
//!                                                   |
//!                        edit::put_env / delete_env (clone)
//!                                                   |
//!                                                   v
//!                                   write(path) (key order kept)
//! ```
//!
//! # Failsafe Scalars
//!
//! ```text
//! key: 183        --> "183"
//! tag: 1.10       --> "1.10"
//! enabled: true   --> "true"
//! marker: ~       --> "~"
//! activeService:  --> null
//! !tagged value   --> read error
//! ```
//!
//! Everything except the `environments` sequence is carried through untouched.

pub mod edit;
pub mod environment;
mod failsafe;

#[cfg(test)]
mod tests;

use serde_yaml::{Mapping, Value};
use std::path::Path;

use crate::error::{ManifestError, ManifestResult};

/// Root key of the environment list.
pub const ENVIRONMENTS_KEY: &str = "environments";

/// An ArgoCD deployment manifest.
///
/// The root is always a mapping whose scalars are all strings, and whose
/// `environments` field is absent, null, or a sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    root: Mapping,
}

impl Manifest {
    /// Read and parse a manifest file.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Read`] if the file cannot be read, is empty, is
    /// not valid YAML, or does not have the manifest shape.
    pub fn read<P: AsRef<Path>>(path: P) -> ManifestResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ManifestError::read(path.display().to_string(), e.to_string()))?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse a manifest from YAML text. `origin` names the source in errors.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError::Read`] if the content is empty, is not valid
    /// YAML, or does not have the manifest shape.
    pub fn parse(content: &str, origin: &str) -> ManifestResult<Self> {
        if content.trim().is_empty() {
            return Err(ManifestError::read(origin, "document is empty"));
        }
        let value =
            failsafe::from_str(content).map_err(|e| ManifestError::read(origin, e.to_string()))?;
        let root = match value {
            Value::Mapping(root) => root,
            Value::Null => return Err(ManifestError::read(origin, "document is empty")),
            _ => return Err(ManifestError::read(origin, "document root is not a mapping")),
        };

        match root.get(ENVIRONMENTS_KEY) {
            None | Some(Value::Null | Value::Sequence(_)) => Ok(Self { root }),
            Some(_) => Err(ManifestError::read(
                origin,
                "`environments` is not a sequence",
            )),
        }
    }

    /// Write the manifest as YAML, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> ManifestResult<()> {
        let path = path.as_ref();
        let content = self.to_yaml()?;
        std::fs::write(path, content).map_err(|source| ManifestError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    /// Serialize the manifest to YAML text in encounter order.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be serialized.
    pub fn to_yaml(&self) -> ManifestResult<String> {
        Ok(serde_yaml::to_string(&self.root)?)
    }

    /// Compact JSON rendering for debug logs.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.root).unwrap_or_else(|e| format!("<unprintable: {e}>"))
    }

    /// Root mapping of the document.
    #[must_use]
    pub const fn as_mapping(&self) -> &Mapping {
        &self.root
    }

    /// Entries of the environment list; empty when the field is missing or null.
    #[must_use]
    pub fn environments(&self) -> &[Value] {
        match self.root.get(ENVIRONMENTS_KEY) {
            Some(Value::Sequence(entries)) => entries,
            _ => &[],
        }
    }

    /// Copy of the manifest with `edit` applied to its environment list.
    ///
    /// A missing `environments` field is appended as the last root key; an
    /// existing one, null included, keeps its position.
    pub(crate) fn with_environments(&self, edit: impl FnOnce(&mut Vec<Value>)) -> Self {
        let mut entries = self.environments().to_vec();
        edit(&mut entries);
        let mut root = self.root.clone();
        root.insert(
            Value::String(ENVIRONMENTS_KEY.to_string()),
            Value::Sequence(entries),
        );
        Self { root }
    }
}

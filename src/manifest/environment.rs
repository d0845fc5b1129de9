// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment entries of the manifest list.
//!
//! ```text
//! - env: dev                 <-+
//!   key: "183"               <-+- EnvKey (identity)
//!   lifecycle: temporary
//!   action_type: pull_request
//!   action_labels: { worker_number, commit_message, commit_sha }
//!   image: { tag }
//!   deployment: { strategy }
//! ```

use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::config::types::{ActionType, DeploymentStrategy, Lifecycle};
use crate::error::ManifestResult;

/// Composite identity of an environment entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnvKey {
    pub env: String,
    pub key: String,
}

impl EnvKey {
    pub fn new(env: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            env: env.into(),
            key: key.into(),
        }
    }

    /// Whether a raw list entry carries this identity.
    ///
    /// Entries that are not mappings, or lack a string `env`/`key`, never match.
    #[must_use]
    pub fn matches(&self, entry: &Value) -> bool {
        field(entry, "env") == Some(self.env.as_str()) && field(entry, "key") == Some(self.key.as_str())
    }
}

impl std::fmt::Display for EnvKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.env, self.key)
    }
}

/// String field of a raw list entry.
pub(crate) fn field<'a>(entry: &'a Value, name: &str) -> Option<&'a str> {
    entry.get(name).and_then(Value::as_str)
}

/// CI run metadata recorded on an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionLabels {
    pub worker_number: String,
    pub commit_message: String,
    pub commit_sha: String,
}

/// Container image of an entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSpec {
    pub tag: String,
}

/// Rollout settings of an entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentSpec {
    pub strategy: DeploymentStrategy,
}

/// A complete environment entry, as written by `put`.
///
/// Field order is the order written to the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct Environment {
    #[builder(into)]
    pub env: String,
    #[builder(into)]
    pub key: String,
    #[builder(default)]
    pub lifecycle: Lifecycle,
    pub action_type: ActionType,
    #[builder(default)]
    pub action_labels: ActionLabels,
    #[builder(default)]
    pub image: ImageSpec,
    #[builder(default)]
    pub deployment: DeploymentSpec,
}

impl Environment {
    /// Identity of this entry.
    #[must_use]
    pub fn id(&self) -> EnvKey {
        EnvKey::new(&self.env, &self.key)
    }

    /// YAML form of the entry, as stored in the list.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_value(&self) -> ManifestResult<Value> {
        Ok(serde_yaml::to_value(self)?)
    }
}

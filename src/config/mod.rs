// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Named inputs of a run.
//!
//! # Input Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. declared defaults
//! 2. --inputs FILE (TOML, repeatable)
//! 3. INPUT_* env vars
//! 4. --set NAME=VALUE
//! 5. command arguments
//! ```
//!
//! # Resolution
//!
//! ```text
//! value.trim() == ""  --> required? Missing : default?
//! restricted && !listed --> Invalid
//! ```
//!
//! Resolved values are validated into [`ActionInputs`] before any file is touched.

pub mod loader;
pub mod types;


use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::InputError;
use crate::manifest::edit::EditOptions;
use crate::manifest::environment::{
    ActionLabels, DeploymentSpec, EnvKey, Environment, ImageSpec,
};

use types::{Action, ActionType, DeploymentStrategy, Lifecycle};

const BOOLEAN: &[&str] = &["true", "false"];

/// Declaration of one named input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSpec {
    pub name: &'static str,
    pub required: bool,
    /// Accepted values; empty means unrestricted.
    pub restricted: &'static [&'static str],
    pub default: Option<&'static str>,
}

impl InputSpec {
    #[must_use]
    pub const fn required(name: &'static str) -> Self {
        Self {
            name,
            required: true,
            restricted: &[],
            default: None,
        }
    }

    #[must_use]
    pub const fn optional(name: &'static str, default: &'static str) -> Self {
        Self {
            name,
            required: false,
            restricted: &[],
            default: Some(default),
        }
    }

    #[must_use]
    pub const fn restricted(self, values: &'static [&'static str]) -> Self {
        Self {
            restricted: values,
            ..self
        }
    }
}

pub const ACTION: InputSpec = InputSpec::required("action").restricted(Action::NAMES);
pub const MANIFEST_PATH: InputSpec = InputSpec::required("manifest_path");
pub const ENABLE_UPDATE: InputSpec = InputSpec::optional("enable_update", "true").restricted(BOOLEAN);
pub const ENABLE_PERMANENT_PROTECTION: InputSpec =
    InputSpec::optional("enable_permanent_protection", "true").restricted(BOOLEAN);
pub const ENV: InputSpec = InputSpec::required("env");
pub const KEY: InputSpec = InputSpec::required("key");
pub const LIFECYCLE: InputSpec =
    InputSpec::optional("lifecycle", "temporary").restricted(Lifecycle::NAMES);
pub const ACTION_TYPE: InputSpec = InputSpec::required("action_type").restricted(ActionType::NAMES);
pub const ACTION_WORKER_NUMBER: InputSpec = InputSpec::required("action_worker_number");
pub const ACTION_COMMIT_MESSAGE: InputSpec = InputSpec::optional("action_commit_message", "");
pub const ACTION_COMMIT_SHA: InputSpec = InputSpec::optional("action_commit_sha", "");
pub const IMAGE_TAG: InputSpec = InputSpec::required("image_tag");
pub const DEPLOYMENT_STRATEGY: InputSpec =
    InputSpec::optional("deployment_strategy", "none").restricted(DeploymentStrategy::NAMES);

/// Every declared input, in resolution order.
pub const ALL_INPUTS: &[InputSpec] = &[
    ACTION,
    MANIFEST_PATH,
    ENABLE_UPDATE,
    ENABLE_PERMANENT_PROTECTION,
    ENV,
    KEY,
    LIFECYCLE,
    ACTION_TYPE,
    ACTION_WORKER_NUMBER,
    ACTION_COMMIT_MESSAGE,
    ACTION_COMMIT_SHA,
    IMAGE_TAG,
    DEPLOYMENT_STRATEGY,
];

/// Flat, case-insensitive map of raw input values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs {
    values: BTreeMap<String, String>,
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for Inputs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.as_ref().to_ascii_lowercase(), v.into()))
                .collect(),
        }
    }
}

impl Inputs {
    /// Raw value as supplied, before trimming or defaults.
    #[must_use]
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.values
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Resolve one input against its declaration.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Missing`] for an empty required input and
    /// [`InputError::Invalid`] for a value outside the declared enumeration.
    pub fn get(&self, spec: &InputSpec) -> Result<String, InputError> {
        let value = self.raw(spec.name).map_or("", str::trim);

        if value.is_empty() {
            if spec.required {
                return Err(InputError::Missing {
                    name: spec.name.to_string(),
                });
            }
            if let Some(default) = spec.default {
                return Ok(default.to_string());
            }
        }

        if !spec.restricted.is_empty() && !spec.restricted.contains(&value) {
            return Err(InputError::Invalid {
                name: spec.name.to_string(),
                value: value.to_string(),
            });
        }

        Ok(value.to_string())
    }

    /// Resolve and parse one input.
    ///
    /// # Errors
    ///
    /// Returns the resolution error, or [`InputError::Invalid`] if the value
    /// does not parse.
    pub fn parse<T: FromStr>(&self, spec: &InputSpec) -> Result<T, InputError> {
        let value = self.get(spec)?;
        value.parse().map_err(|_| InputError::Invalid {
            name: spec.name.to_string(),
            value,
        })
    }

    /// Resolve a `true`/`false` input.
    ///
    /// # Errors
    ///
    /// Returns the resolution error of the input.
    pub fn flag(&self, spec: &InputSpec) -> Result<bool, InputError> {
        Ok(self.get(spec)? == "true")
    }

    /// Iterate raw values in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Edit requested by the inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Put(Environment),
    Delete(EnvKey),
}

impl Edit {
    #[must_use]
    pub const fn action(&self) -> Action {
        match self {
            Self::Put(_) => Action::Put,
            Self::Delete(_) => Action::Delete,
        }
    }
}

/// Validated inputs of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionInputs {
    pub manifest_path: PathBuf,
    pub options: EditOptions,
    pub edit: Edit,
}

impl ActionInputs {
    /// Validate the raw inputs of a run.
    ///
    /// `delete` only needs `env` and `key`; `put` needs a full entry.
    ///
    /// # Errors
    ///
    /// Returns the first input that is missing or invalid.
    pub fn from_inputs(inputs: &Inputs) -> Result<Self, InputError> {
        let action: Action = inputs.parse(&ACTION)?;
        let manifest_path = PathBuf::from(inputs.get(&MANIFEST_PATH)?);
        let options = EditOptions {
            enable_update: inputs.flag(&ENABLE_UPDATE)?,
            enable_permanent_protection: inputs.flag(&ENABLE_PERMANENT_PROTECTION)?,
        };

        let edit = match action {
            Action::Put => Edit::Put(environment_from_inputs(inputs)?),
            Action::Delete => Edit::Delete(target_from_inputs(inputs)?),
        };

        Ok(Self {
            manifest_path,
            options,
            edit,
        })
    }
}

/// The `(env, key)` pair named by the inputs.
///
/// # Errors
///
/// Returns an error if `env` or `key` is missing.
pub fn target_from_inputs(inputs: &Inputs) -> Result<EnvKey, InputError> {
    Ok(EnvKey::new(inputs.get(&ENV)?, inputs.get(&KEY)?))
}

/// The full entry described by the inputs.
///
/// # Errors
///
/// Returns the first entry input that is missing or invalid.
pub fn environment_from_inputs(inputs: &Inputs) -> Result<Environment, InputError> {
    Ok(Environment {
        env: inputs.get(&ENV)?,
        key: inputs.get(&KEY)?,
        lifecycle: inputs.parse(&LIFECYCLE)?,
        action_type: inputs.parse(&ACTION_TYPE)?,
        action_labels: ActionLabels {
            worker_number: inputs.get(&ACTION_WORKER_NUMBER)?,
            commit_message: inputs.get(&ACTION_COMMIT_MESSAGE)?,
            commit_sha: inputs.get(&ACTION_COMMIT_SHA)?,
        },
        image: ImageSpec {
            tag: inputs.get(&IMAGE_TAG)?,
        },
        deployment: DeploymentSpec {
            strategy: inputs.parse(&DEPLOYMENT_STRATEGY)?,
        },
    })
}

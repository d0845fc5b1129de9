// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!        ArgoEnvError (~24 bytes)
//!                 |
//!   +----------+--+---------+
//!   |          |            |
//!   v          v            v
//! Bailed     Input      Manifest
//! Box<str>    Box          Box
//!
//! Sub-errors (unboxed internally):
//!   Input     Missing, Invalid, Malformed, Source
//!   Manifest  Read, Write, Serialize, AlreadyExists, NotFound, Protected
//!
//! All variants boxed => ArgoEnvError fits in 24 bytes.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type for manifest reads and environment list edits.
pub type ManifestResult<T> = std::result::Result<T, ManifestError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum ArgoEnvError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Input resolution error.
    #[error("input error: {0}")]
    Input(Box<InputError>),

    /// Manifest read, write or edit error.
    #[error("manifest error: {0}")]
    Manifest(Box<ManifestError>),
}

/// Create a fatal [`ArgoEnvError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> ArgoEnvError {
    ArgoEnvError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ArgoEnvError {
                fn from(err: $error) -> Self {
                    ArgoEnvError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    InputError => Input,
    ManifestError => Manifest,
}

// --- Input Errors ---

/// Errors raised while resolving the named inputs of a run.
#[derive(Debug, Error)]
pub enum InputError {
    /// A required input is empty or absent.
    #[error("input required and not supplied: {name}")]
    Missing { name: String },

    /// A value is outside the input's declared enumeration.
    #[error("invalid input {name}, value is <{value}>")]
    Invalid { name: String, value: String },

    /// A `NAME=VALUE` override without a `=`.
    #[error("malformed input override '{0}', expected NAME=VALUE")]
    Malformed(String),

    /// An input source could not be loaded.
    #[error("failed to load inputs: {0}")]
    Source(String),
}

impl From<config::ConfigError> for InputError {
    fn from(err: config::ConfigError) -> Self {
        Self::Source(err.to_string())
    }
}

// --- Manifest Errors ---

/// Errors raised while reading, writing or editing a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// The document could not be read, was empty, or is not usable.
    #[error("failed to read manifest '{path}': {message}")]
    Read { path: String, message: String },

    /// The document could not be written.
    #[error("failed to write manifest '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// A value could not be converted to or from YAML.
    #[error("yaml error: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// `put` without update permission targets an existing entry.
    #[error("environment {env} - {key} already exists")]
    AlreadyExists { env: String, key: String },

    /// No entry matches the requested key pair.
    #[error("environment {env} - {key} does not exist")]
    NotFound { env: String, key: String },

    /// `delete` targets a permanent entry while protection is enabled.
    #[error("environment {env} - {key} is permanent and protected")]
    Protected { env: String, key: String },
}

impl ManifestError {
    pub(crate) fn read(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Read {
            path: path.into(),
            message: message.into(),
        }
    }
}

// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Input loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! InputLoader::new()
//!   .add_toml_file(req)     lowest
//!   .add_toml_str()
//!   .with_env_prefix("INPUT")
//!   .set(name, value)       highest (last set wins)
//!        |
//!        v
//!    build() --> Inputs
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::Inputs;
use crate::error::InputError;

/// Environment prefix used by CI runners for step inputs (`INPUT_IMAGE_TAG`).
pub const DEFAULT_ENV_PREFIX: &str = "INPUT";

/// Builder for loading inputs from multiple sources.
pub struct InputLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    env_prefix: Option<String>,
    sources: Vec<(String, PathBuf)>,
}

impl InputLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            env_prefix: None,
            sources: Vec::new(),
        }
    }

    /// Adds a TOML input file.
    ///
    /// The file is read when `build()` is called; a missing or invalid file
    /// makes `build()` fail.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        use config::{File, FileFormat};
        let p = path.as_ref();
        self.builder = self
            .builder
            .add_source(File::from(p).format(FileFormat::Toml).required(true));
        self.sources.push(("file".to_string(), p.to_path_buf()));
        self
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        use config::{File, FileFormat};
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources
            .push(("string".to_string(), PathBuf::from("<string>")));
        self
    }

    /// Reads `<PREFIX>_<NAME>` environment variables as inputs.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_string());
        self
    }

    /// Sets an input override. Names are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is not a valid key.
    pub fn set(mut self, name: &str, value: &str) -> Result<Self, InputError> {
        self.builder = self
            .builder
            .set_override(name.to_ascii_lowercase(), value)?;
        Ok(self)
    }

    /// Applies `NAME=VALUE` overrides in order.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Malformed`] if an override has no `=`.
    pub fn set_all<I, S>(self, overrides: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        overrides.into_iter().try_fold(self, |loader, item| {
            let item = item.as_ref();
            let (name, value) = item
                .split_once('=')
                .ok_or_else(|| InputError::Malformed(item.to_string()))?;
            loader.set(name.trim(), value)
        })
    }

    /// Builds the flat input map from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A required input file is missing or has invalid TOML syntax.
    /// - A source holds a nested table instead of plain values.
    pub fn build(self) -> Result<Inputs, InputError> {
        let builder = match &self.env_prefix {
            Some(prefix) => self
                .builder
                .add_source(config::Environment::with_prefix(prefix).prefix_separator("_")),
            None => self.builder,
        };
        let values: BTreeMap<String, String> = builder.build()?.try_deserialize()?;
        Ok(Inputs::from_iter(values))
    }

    #[must_use]
    pub fn format_sources(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .sources
            .iter()
            .enumerate()
            .map(|(i, (source, path))| format!("{}. [{}] {}", i + 1, source, path.display()))
            .collect();
        if let Some(prefix) = &self.env_prefix {
            lines.push(format!("{}. [env] {prefix}_*", lines.len() + 1));
        }
        lines
    }
}

impl Default for InputLoader {
    fn default() -> Self {
        Self::new()
    }
}

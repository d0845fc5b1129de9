// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only commands (`get`, `list`).

use serde_yaml::Value;

use crate::config::{Inputs, MANIFEST_PATH, target_from_inputs};
use crate::error::{ArgoEnvError, ManifestResult, Result};
use crate::manifest::Manifest;
use crate::manifest::edit::get_env;

fn read_manifest(inputs: &Inputs) -> Result<Manifest> {
    let path = inputs.get(&MANIFEST_PATH).map_err(ArgoEnvError::from)?;
    Ok(Manifest::read(path).map_err(ArgoEnvError::from)?)
}

/// Print the entry named by the `env` and `key` inputs as YAML.
///
/// # Errors
///
/// Returns an error if an input is missing, the manifest cannot be read, or
/// no entry matches.
pub fn run_get_command(inputs: &Inputs) -> Result<()> {
    let target = target_from_inputs(inputs).map_err(ArgoEnvError::from)?;
    let manifest = read_manifest(inputs)?;
    let entry = get_env(&target.env, &target.key, &manifest).map_err(ArgoEnvError::from)?;
    print!("{}", render_entry(entry).map_err(ArgoEnvError::from)?);
    Ok(())
}

/// Print one line per environment entry.
///
/// # Errors
///
/// Returns an error if `manifest_path` is missing or the manifest cannot be read.
pub fn run_list_command(inputs: &Inputs) -> Result<()> {
    let manifest = read_manifest(inputs)?;
    let lines = format_entries(&manifest);
    if lines.is_empty() {
        println!("No environments defined");
    } else {
        for line in lines {
            println!("{line}");
        }
    }
    Ok(())
}

/// YAML text of a single entry.
///
/// # Errors
///
/// Returns an error if the entry cannot be serialized.
pub fn render_entry(entry: &Value) -> ManifestResult<String> {
    Ok(serde_yaml::to_string(entry)?)
}

/// Aligned `env  key  lifecycle` columns, one row per entry in list order.
#[must_use]
pub fn format_entries(manifest: &Manifest) -> Vec<String> {
    let column = |entry: &Value, name: &str| -> String {
        entry.get(name).and_then(Value::as_str).unwrap_or("-").to_string()
    };

    let rows: Vec<[String; 3]> = manifest
        .environments()
        .iter()
        .map(|entry| {
            [
                column(entry, "env"),
                column(entry, "key"),
                column(entry, "lifecycle"),
            ]
        })
        .collect();

    let env_width = rows.iter().map(|r| r[0].len()).max().unwrap_or(0);
    let key_width = rows.iter().map(|r| r[1].len()).max().unwrap_or(0);

    rows.iter()
        .map(|[env, key, lifecycle]| format!("{env:<env_width$}  {key:<key_width$}  {lifecycle}"))
        .collect()
}

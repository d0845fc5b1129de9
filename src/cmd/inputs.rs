// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Inputs command.

use crate::config::{ALL_INPUTS, Inputs};

/// Print input sources and the resolved value of every declared input.
pub fn run_inputs_command(sources: &[String], inputs: &Inputs) {
    if sources.is_empty() {
        println!("No input sources loaded");
    } else {
        for line in sources {
            println!("{line}");
        }
    }
    println!();
    for line in format_inputs(inputs) {
        println!("{line}");
    }
}

/// `name = value` per declared input; unresolvable inputs show their error.
#[must_use]
pub fn format_inputs(inputs: &Inputs) -> Vec<String> {
    let width = ALL_INPUTS.iter().map(|s| s.name.len()).max().unwrap_or(0);
    ALL_INPUTS
        .iter()
        .map(|spec| {
            let value = inputs.get(spec).unwrap_or_else(|e| format!("<{e}>"));
            format!("{:<width$} = {value}", spec.name)
        })
        .collect()
}

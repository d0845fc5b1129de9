// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Enumerated input values.
//!
//! ```text
//! Action:             put | delete
//! Lifecycle:          temporary (default) | permanent
//! ActionType:         push | pull_request
//! DeploymentStrategy: blue_green | canary | none (default)
//! ```
//!
//! Each enum exposes `NAMES`, the exact spellings accepted as input values.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Value that does not name any variant of the target enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown variant '{0}'")]
pub struct UnknownVariant(pub String);

/// Generates `NAMES`, `as_str`, `Display` and `FromStr` from a variant table.
macro_rules! input_enum {
    ($ty:ident { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Accepted input spellings, in declaration order.
            pub const NAMES: &'static [&'static str] = &[$($name),+];

            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name),+
                }
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Self::$variant),)+
                    _ => Err(UnknownVariant(s.to_string())),
                }
            }
        }
    };
}

/// Edit to perform on the environment list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Put,
    Delete,
}

input_enum!(Action {
    Put => "put",
    Delete => "delete",
});

/// Lifecycle of an environment entry; permanent entries can be protected from deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    #[default]
    Temporary,
    Permanent,
}

input_enum!(Lifecycle {
    Temporary => "temporary",
    Permanent => "permanent",
});

/// Pipeline event that produced the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Push,
    PullRequest,
}

input_enum!(ActionType {
    Push => "push",
    PullRequest => "pull_request",
});

/// Rollout strategy of the deployed environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStrategy {
    BlueGreen,
    Canary,
    #[default]
    None,
}

input_enum!(DeploymentStrategy {
    BlueGreen => "blue_green",
    Canary => "canary",
    None => "none",
});

// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry options of the put, delete and get commands.
//!
//! Every option maps to one named input, so `put --image-tag X` and
//! `INPUT_IMAGE_TAG=X argo-env run` resolve identically.

use clap::Args;

use crate::config::types::{Action, ActionType, DeploymentStrategy, Lifecycle};
use crate::config::{
    ACTION, ACTION_COMMIT_MESSAGE, ACTION_COMMIT_SHA, ACTION_TYPE, ACTION_WORKER_NUMBER,
    DEPLOYMENT_STRATEGY, ENABLE_PERMANENT_PROTECTION, ENABLE_UPDATE, ENV, IMAGE_TAG, KEY,
    LIFECYCLE,
};

/// `(env, key)` pair selecting an entry.
#[derive(Debug, Clone, Default, Args)]
pub struct TargetArgs {
    /// Environment name, such as 'dev'.
    #[arg(short = 'e', long)]
    pub env: Option<String>,

    /// Entry key within the environment, such as a pull request number.
    #[arg(short = 'k', long)]
    pub key: Option<String>,
}

impl TargetArgs {
    fn push_overrides(&self, overrides: &mut Vec<(&'static str, String)>) {
        push(overrides, ENV.name, self.env.as_ref());
        push(overrides, KEY.name, self.key.as_ref());
    }
}

/// Options for `put`.
#[derive(Debug, Clone, Default, Args)]
pub struct PutArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Entry lifecycle.
    #[arg(long, value_parser = Lifecycle::NAMES.to_vec())]
    pub lifecycle: Option<String>,

    /// Pipeline event that produced the entry.
    #[arg(long = "action-type", value_parser = ActionType::NAMES.to_vec())]
    pub action_type: Option<String>,

    /// CI worker (run) number.
    #[arg(long = "worker-number")]
    pub worker_number: Option<String>,

    /// Commit message recorded on the entry.
    #[arg(long = "commit-message")]
    pub commit_message: Option<String>,

    /// Commit SHA recorded on the entry.
    #[arg(long = "commit-sha")]
    pub commit_sha: Option<String>,

    /// Container image tag to deploy.
    #[arg(short = 't', long = "image-tag")]
    pub image_tag: Option<String>,

    /// Rollout strategy.
    #[arg(long = "deployment-strategy", value_parser = DeploymentStrategy::NAMES.to_vec())]
    pub deployment_strategy: Option<String>,

    /// Allow replacing an existing entry.
    #[arg(long = "enable-update", value_name = "BOOL", value_parser = ["true", "false"])]
    pub enable_update: Option<String>,
}

impl PutArgs {
    /// Input overrides for a put run.
    #[must_use]
    pub fn to_input_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = vec![(ACTION.name, Action::Put.to_string())];
        self.target.push_overrides(&mut overrides);
        push(&mut overrides, LIFECYCLE.name, self.lifecycle.as_ref());
        push(&mut overrides, ACTION_TYPE.name, self.action_type.as_ref());
        push(&mut overrides, ACTION_WORKER_NUMBER.name, self.worker_number.as_ref());
        push(&mut overrides, ACTION_COMMIT_MESSAGE.name, self.commit_message.as_ref());
        push(&mut overrides, ACTION_COMMIT_SHA.name, self.commit_sha.as_ref());
        push(&mut overrides, IMAGE_TAG.name, self.image_tag.as_ref());
        push(&mut overrides, DEPLOYMENT_STRATEGY.name, self.deployment_strategy.as_ref());
        push(&mut overrides, ENABLE_UPDATE.name, self.enable_update.as_ref());
        overrides
    }
}

/// Options for `delete`.
#[derive(Debug, Clone, Default, Args)]
pub struct DeleteArgs {
    #[command(flatten)]
    pub target: TargetArgs,

    /// Refuse to remove permanent entries.
    #[arg(long = "enable-permanent-protection", value_name = "BOOL", value_parser = ["true", "false"])]
    pub enable_permanent_protection: Option<String>,
}

impl DeleteArgs {
    /// Input overrides for a delete run.
    #[must_use]
    pub fn to_input_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = vec![(ACTION.name, Action::Delete.to_string())];
        self.target.push_overrides(&mut overrides);
        push(
            &mut overrides,
            ENABLE_PERMANENT_PROTECTION.name,
            self.enable_permanent_protection.as_ref(),
        );
        overrides
    }
}

/// Options for `get`.
#[derive(Debug, Clone, Default, Args)]
pub struct GetArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

impl GetArgs {
    /// Input overrides for a lookup.
    #[must_use]
    pub fn to_input_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();
        self.target.push_overrides(&mut overrides);
        overrides
    }
}

fn push(overrides: &mut Vec<(&'static str, String)>, name: &'static str, value: Option<&String>) {
    if let Some(value) = value {
        overrides.push((name, value.clone()));
    }
}

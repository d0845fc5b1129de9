// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |          edit / show / inputs
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |          config           |
//!              |  named inputs, validation |
//!              '------+-------------+------'
//!                     |             |
//!                     v             v
//!                 manifest       outputs
//!            YAML, env list    step outputs
//!
//!   +-----------------------------------------+
//!   |  foundation   error, logging            |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod outputs;

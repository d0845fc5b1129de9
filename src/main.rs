// argo-env: ArgoCD manifest environment editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Inputs --> Command Dispatch
//!   Run | Put | Delete | Get | List | Inputs | Version
//! ```

use std::process::ExitCode;

use argo_env::cli::global::GlobalOptions;
use argo_env::cli::{self, Command};
use argo_env::cmd::edit::run_edit_command;
use argo_env::cmd::input_loader;
use argo_env::cmd::inputs::run_inputs_command;
use argo_env::cmd::show::{run_get_command, run_list_command};
use argo_env::config::Inputs;
use argo_env::error::{ArgoEnvError, bail_out};
use argo_env::logging::{self, LogSettings, Verbosity};
use argo_env::outputs::{OutputSink, annotate_error};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    let _log_guard = match logging::init(&build_log_settings(&cli.global)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli)
}

fn build_log_settings(global: &GlobalOptions) -> LogSettings {
    let console = global
        .log_level
        .and_then(Verbosity::from_level)
        .unwrap_or_else(|| Verbosity::for_runner(std::env::var("RUNNER_DEBUG").ok().as_deref()));

    LogSettings::builder()
        .console(console)
        .maybe_file(global.log_file.clone())
        .maybe_file_verbosity(global.file_log_level.and_then(Verbosity::from_level))
        .build()
}

fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Run) => run_edit(&cli.global, &[]),
        Some(Command::Put(args)) => run_edit(&cli.global, &args.to_input_overrides()),
        Some(Command::Delete(args)) => run_edit(&cli.global, &args.to_input_overrides()),
        Some(Command::Get(args)) => {
            load_inputs(&cli.global, &args.to_input_overrides()).and_then(|i| run_get_command(&i))
        }
        Some(Command::List) => load_inputs(&cli.global, &[]).and_then(|i| run_list_command(&i)),
        Some(Command::Inputs) => handle_inputs_command(&cli.global),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(bail_out("No command specified").into())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            annotate_error(&format!("{e:#}"));
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn load_inputs(
    global: &GlobalOptions,
    command_overrides: &[(&str, String)],
) -> argo_env::error::Result<Inputs> {
    let loader = input_loader(global, command_overrides).map_err(ArgoEnvError::from)?;
    Ok(loader.build().map_err(ArgoEnvError::from)?)
}

fn run_edit(global: &GlobalOptions, command_overrides: &[(&str, String)]) -> argo_env::error::Result<()> {
    let inputs = load_inputs(global, command_overrides)?;
    run_edit_command(&inputs, &global.backup_path, &OutputSink::from_env()).map(|_| ())
}

fn handle_inputs_command(global: &GlobalOptions) -> argo_env::error::Result<()> {
    let loader = input_loader(global, &[]).map_err(ArgoEnvError::from)?;
    let sources = loader.format_sources();
    let inputs = loader.build().map_err(ArgoEnvError::from)?;
    run_inputs_command(&sources, &inputs);
    Ok(())
}

//! `sponsor` entry-point: loads settings, initialises tracing, and runs one
//! sign-in, sign-up, or directory command.

use std::ffi::OsString;
use std::io;
use std::process::ExitCode;

use clap::Parser;
use client::ClientSettings;
use client::inbound::cli::{self, CliArgs, RunStatus};
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    init_tracing(args.log_json);

    // Command-line flags are parsed by clap above; settings come from the
    // environment and configuration files only.
    let settings = ClientSettings::load_from_iter([OsString::from("sponsor")])
        .map_err(|err| eyre!("failed to load settings: {err}"))?;

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("failed to start async runtime")?;
    let mut stdout = io::stdout().lock();
    let status = runtime
        .block_on(cli::run(args, &settings, &mut stdout))
        .wrap_err("sponsor command failed")?;

    Ok(match status {
        RunStatus::Success => ExitCode::SUCCESS,
        RunStatus::Rejected => ExitCode::FAILURE,
    })
}

fn init_tracing(json: bool) {
    let builder = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr);
    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        warn!(error = %e, "tracing init failed");
    }
}

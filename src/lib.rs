// src/lib.rs

pub mod cli;
pub mod config;
pub mod decode;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod input;
pub mod logging;
pub mod record;
pub mod sink;
pub mod types;

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, RawConfigFile, default_config_path, load_from_path};
use crate::engine::StopController;
use crate::input::ExecInput;
use crate::sink::{ChannelSink, JsonLinesWriter};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading + CLI overrides
/// - the exec input (host resolution, runner, scheduler)
/// - the record writer on stdout
/// - Ctrl-C / SIGTERM handling
pub async fn run(args: CliArgs) -> Result<()> {
    let cfg = resolve_config(&args)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let mut input = ExecInput::new(cfg);
    input.register()?;

    let (sink, rx) = ChannelSink::channel();
    let writer = tokio::spawn(JsonLinesWriter::new(rx, tokio::io::stdout()).run());

    if args.once {
        let result = input.run_once(&sink).await?;
        info!(
            success = result.is_success(),
            records = result.records_emitted,
            "single run finished"
        );
    } else {
        install_shutdown_handler(input.stop_handle());
        input.run(&sink).await?;
    }

    // Closing the sink lets the writer drain what is left and exit.
    drop(sink);
    let written = writer.await.context("joining record writer")??;
    debug!(written, "all records written");
    Ok(())
}

/// Load the config file (if any) and apply CLI overrides on top.
///
/// A missing default config file is fine when the command comes from the
/// CLI; an explicitly named one must exist.
pub fn resolve_config(args: &CliArgs) -> Result<ConfigFile> {
    let mut raw = match &args.config {
        Some(path) => load_from_path(PathBuf::from(path))
            .with_context(|| format!("loading config file {path:?}"))?,
        None => {
            let path = default_config_path();
            if path.exists() {
                load_from_path(&path).with_context(|| format!("loading config file {path:?}"))?
            } else if args.command.is_some() {
                RawConfigFile::default()
            } else {
                anyhow::bail!(
                    "no {} found and no --command given",
                    path.display()
                );
            }
        }
    };

    apply_cli_overrides(&mut raw, args);
    let cfg = ConfigFile::try_from(raw)?;
    Ok(cfg)
}

fn apply_cli_overrides(raw: &mut RawConfigFile, args: &CliArgs) {
    let exec = &mut raw.exec;
    if let Some(command) = &args.command {
        exec.command = Some(command.clone());
    }
    if let Some(interval) = &args.interval {
        exec.interval = Some(interval.clone());
    }
    if args.no_log_stderr {
        exec.log_stderr = false;
    }
    if let Some(decoder) = args.decoder {
        exec.decoder = decoder;
    }
    if let Some(host) = &args.host {
        exec.host = Some(host.clone());
    }
}

/// Ctrl-C (and SIGTERM on Unix) → graceful stop.
fn install_shutdown_handler(stop: StopController) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};

            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(s) => s,
                Err(e) => {
                    warn!(error = %e, "failed to install SIGTERM handler; relying on Ctrl-C");
                    wait_for_ctrl_c().await;
                    stop.signal_stop();
                    return;
                }
            };

            tokio::select! {
                _ = sigterm.recv() => info!("received SIGTERM, finishing current run"),
                _ = wait_for_ctrl_c() => info!("received Ctrl-C, finishing current run"),
            }
        }

        #[cfg(not(unix))]
        {
            wait_for_ctrl_c().await;
            info!("received Ctrl-C, finishing current run");
        }

        stop.signal_stop();
    });
}

async fn wait_for_ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Simple dry-run output: print the resolved settings.
fn print_dry_run(cfg: &ConfigFile) {
    let exec = &cfg.exec;
    println!("periodic-exec dry-run");
    println!("  command    = {}", exec.command);
    println!("  interval   = {:?}", exec.interval);
    println!("  log_stderr = {}", exec.log_stderr);
    println!("  decoder    = {}", exec.decoder);
    println!("  shell      = {:?}", exec.shell);
    match &exec.host {
        Some(host) => println!("  host       = {host}"),
        None => println!("  host       = (resolved at startup)"),
    }

    debug!("dry-run complete (no execution)");
}

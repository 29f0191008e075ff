// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::{DecoderKind, IntervalSetting};

/// Command-line arguments for `periodic-exec`.
///
/// Every `[exec]` key can be given on the command line; flags override the
/// config file. With `--command` and `--interval` no config file is needed.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "periodic-exec",
    version,
    about = "Run a command at a fixed interval and emit its output as JSON records.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `PeriodicExec.toml` in the current working directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Command to run (overrides `[exec].command`).
    #[arg(short = 'c', long, value_name = "CMD")]
    pub command: Option<String>,

    /// Interval between run starts: seconds (`5`, `0.5`) or `250ms`/`5s`/`1m`/`2h`.
    #[arg(short = 'i', long, value_name = "INTERVAL")]
    pub interval: Option<IntervalSetting>,

    /// Discard stderr instead of logging it.
    #[arg(long)]
    pub no_log_stderr: bool,

    /// Decoder for stdout lines.
    #[arg(long, value_name = "plain|json")]
    pub decoder: Option<DecoderKind>,

    /// Host name stamped on records (default: the OS host name).
    #[arg(long, value_name = "NAME")]
    pub host: Option<String>,

    /// Run the command a single time and exit.
    #[arg(long)]
    pub once: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `PERIODIC_EXEC_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Parse + validate, print the resolved settings, but don't run anything.
    #[arg(long)]
    pub dry_run: bool,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_inline_command() {
        let args = CliArgs::try_parse_from([
            "periodic-exec",
            "-c",
            "echo hello",
            "--interval",
            "5s",
            "--no-log-stderr",
            "--decoder",
            "json",
        ])
        .unwrap();

        assert_eq!(args.command.as_deref(), Some("echo hello"));
        assert_eq!(args.interval, Some(IntervalSetting::Text("5s".to_string())));
        assert!(args.no_log_stderr);
        assert_eq!(args.decoder, Some(DecoderKind::Json));
        assert!(!args.once);
    }

    #[test]
    fn rejects_unknown_decoder() {
        assert!(CliArgs::try_parse_from(["periodic-exec", "--decoder", "xml"]).is_err());
    }
}

// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

use crate::exec::CommandSpec;
use crate::types::{DecoderKind, IntervalSetting};

/// Top-level configuration as read from a TOML file (before validation).
///
/// ```toml
/// [exec]
/// command = "uptime"
/// interval = 5          # seconds, or a string like "250ms" / "1m"
/// log_stderr = true
/// decoder = "plain"     # or "json"
/// host = "web-01"       # optional, overrides host-name resolution
/// shell = ["bash", "-c"]
/// ```
///
/// `command` and `interval` are optional here only so that CLI flags can
/// fill them in; [`ConfigFile`] requires both.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub exec: RawExecSection,
}

/// `[exec]` section as written by the user.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawExecSection {
    /// Command string handed to the launcher shell unchanged.
    #[serde(default)]
    pub command: Option<String>,

    /// Target time between the start of successive runs.
    #[serde(default)]
    pub interval: Option<IntervalSetting>,

    /// Surface each stderr line as an info log entry.
    #[serde(default = "default_log_stderr")]
    pub log_stderr: bool,

    #[serde(default)]
    pub decoder: DecoderKind,

    #[serde(default)]
    pub host: Option<String>,

    /// Launcher prefix; the command string is appended as the last argument.
    #[serde(default)]
    pub shell: Option<Vec<String>>,
}

fn default_log_stderr() -> bool {
    true
}

impl Default for RawExecSection {
    fn default() -> Self {
        Self {
            command: None,
            interval: None,
            log_stderr: default_log_stderr(),
            decoder: DecoderKind::default(),
            host: None,
            shell: None,
        }
    }
}

/// Validated configuration.
///
/// Construct through `ConfigFile::try_from(raw)` (see `validate.rs`) or
/// [`crate::config::load_and_validate`].
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub exec: ExecSettings,
}

/// Resolved `[exec]` settings with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecSettings {
    pub command: String,
    pub interval: Duration,
    pub log_stderr: bool,
    pub decoder: DecoderKind,
    pub host: Option<String>,
    pub shell: Vec<String>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(exec: ExecSettings) -> Self {
        Self { exec }
    }

    /// The immutable per-run description handed to the scheduler.
    pub fn command_spec(&self) -> CommandSpec {
        CommandSpec {
            command: self.exec.command.clone(),
            interval: self.exec.interval,
            log_stderr: self.exec.log_stderr,
        }
    }
}

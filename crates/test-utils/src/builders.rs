#![allow(dead_code)]

use std::time::Duration;

use periodic_exec::config::{ConfigFile, RawConfigFile, RawExecSection};
use periodic_exec::exec::CommandSpec;
use periodic_exec::types::{DecoderKind, IntervalSetting};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new(command: &str) -> Self {
        Self {
            config: RawConfigFile {
                exec: RawExecSection {
                    command: Some(command.to_string()),
                    interval: Some(IntervalSetting::Seconds(1.0)),
                    ..RawExecSection::default()
                },
            },
        }
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.config.exec.interval = Some(IntervalSetting::Seconds(interval.as_secs_f64()));
        self
    }

    pub fn interval_str(mut self, interval: &str) -> Self {
        self.config.exec.interval = Some(IntervalSetting::Text(interval.to_string()));
        self
    }

    pub fn log_stderr(mut self, val: bool) -> Self {
        self.config.exec.log_stderr = val;
        self
    }

    pub fn decoder(mut self, kind: DecoderKind) -> Self {
        self.config.exec.decoder = kind;
        self
    }

    pub fn host(mut self, host: &str) -> Self {
        self.config.exec.host = Some(host.to_string());
        self
    }

    pub fn shell(mut self, shell: &[&str]) -> Self {
        self.config.exec.shell = Some(shell.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn build_raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

/// Shorthand for a `CommandSpec` with stderr logging on.
pub fn command_spec(command: &str, interval: Duration) -> CommandSpec {
    CommandSpec::new(command, interval)
}

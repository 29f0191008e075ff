// src/config/validate.rs

use crate::config::model::{ConfigFile, ExecSettings, RawConfigFile, RawExecSection};
use crate::errors::{ExecError, Result};
use crate::exec::default_shell;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = ExecError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        let exec = validate_exec_section(raw.exec)?;
        Ok(ConfigFile::new_unchecked(exec))
    }
}

fn validate_exec_section(raw: RawExecSection) -> Result<ExecSettings> {
    let command = validate_command(raw.command)?;

    let interval = raw
        .interval
        .ok_or_else(|| {
            ExecError::ConfigError("[exec].interval is required".to_string())
        })?
        .to_duration()
        .map_err(|e| ExecError::ConfigError(format!("[exec].interval: {e}")))?;

    let host = match raw.host {
        Some(h) if h.trim().is_empty() => {
            return Err(ExecError::ConfigError(
                "[exec].host must not be blank when set".to_string(),
            ));
        }
        other => other,
    };

    let shell = match raw.shell {
        Some(shell) => {
            if shell.is_empty() || shell[0].trim().is_empty() {
                return Err(ExecError::ConfigError(
                    "[exec].shell must name a program (e.g. [\"sh\", \"-c\"])".to_string(),
                ));
            }
            shell
        }
        None => default_shell(),
    };

    Ok(ExecSettings {
        command,
        interval,
        log_stderr: raw.log_stderr,
        decoder: raw.decoder,
        host,
        shell,
    })
}

fn validate_command(command: Option<String>) -> Result<String> {
    match command {
        None => Err(ExecError::ConfigError(
            "[exec].command is required".to_string(),
        )),
        Some(c) if c.trim().is_empty() => Err(ExecError::ConfigError(
            "[exec].command must not be blank".to_string(),
        )),
        Some(c) => Ok(c),
    }
}

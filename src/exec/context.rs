// src/exec/context.rs

use std::sync::Arc;

use tracing::{debug, warn};

use crate::decode::Decoder;

/// Everything a runner needs besides the [`CommandSpec`](super::CommandSpec).
///
/// Built once at registration and passed in explicitly; there is no
/// process-wide state.
#[derive(Debug, Clone)]
pub struct ExecContext {
    /// Host name stamped on every record.
    pub host: String,
    /// Launcher prefix; the command string is appended as the last argument.
    pub shell: Vec<String>,
    pub decoder: Arc<dyn Decoder>,
}

impl ExecContext {
    pub fn new(host: impl Into<String>, shell: Vec<String>, decoder: Arc<dyn Decoder>) -> Self {
        Self {
            host: host.into(),
            shell,
            decoder,
        }
    }
}

/// Build a shell prefix appropriate for the platform.
pub fn default_shell() -> Vec<String> {
    if cfg!(windows) {
        vec!["cmd".to_string(), "/C".to_string()]
    } else {
        vec!["sh".to_string(), "-c".to_string()]
    }
}

/// Resolve the host name stamped on records.
///
/// An explicit override wins; otherwise the OS host name, falling back to
/// `localhost` if it is empty or not valid UTF-8.
pub fn resolve_host(override_host: Option<&str>) -> String {
    if let Some(host) = override_host {
        debug!(host, "using configured host name");
        return host.to_string();
    }

    match gethostname::gethostname().into_string() {
        Ok(host) if !host.is_empty() => {
            debug!(%host, "resolved host name");
            host
        }
        Ok(_) => {
            warn!("OS returned an empty host name; using 'localhost'");
            "localhost".to_string()
        }
        Err(raw) => {
            warn!(?raw, "host name is not valid UTF-8; using 'localhost'");
            "localhost".to_string()
        }
    }
}

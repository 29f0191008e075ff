// tests/config_loading.rs

use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;

use periodic_exec::config::load_and_validate;
use periodic_exec::errors::ExecError;
use periodic_exec::exec::CommandSpec;
use periodic_exec::types::DecoderKind;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn full_config_is_loaded() {
    let file = config_file(
        r#"
[exec]
command = "uptime"
interval = 30
log_stderr = false
decoder = "json"
host = "web-01"
shell = ["bash", "-c"]
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();

    assert_eq!(cfg.exec.decoder, DecoderKind::Json);
    assert_eq!(cfg.exec.host.as_deref(), Some("web-01"));
    assert_eq!(cfg.exec.shell, vec!["bash", "-c"]);
    assert_eq!(
        cfg.command_spec(),
        CommandSpec {
            command: "uptime".to_string(),
            interval: Duration::from_secs(30),
            log_stderr: false,
        }
    );
}

#[test]
fn interval_accepts_fractions_and_duration_strings() {
    let fractional = config_file("[exec]\ncommand = \"date\"\ninterval = 0.25\n");
    let text = config_file("[exec]\ncommand = \"date\"\ninterval = \"2m\"\n");

    assert_eq!(
        load_and_validate(fractional.path()).unwrap().exec.interval,
        Duration::from_millis(250)
    );
    assert_eq!(
        load_and_validate(text.path()).unwrap().exec.interval,
        Duration::from_secs(120)
    );
}

#[test]
fn missing_interval_returns_config_error() {
    let file = config_file("[exec]\ncommand = \"date\"\n");

    match load_and_validate(file.path()) {
        Err(ExecError::ConfigError(msg)) => assert!(msg.contains("interval")),
        other => panic!("Expected ConfigError, got: {other:?}"),
    }
}

#[test]
fn zero_interval_returns_config_error() {
    let file = config_file("[exec]\ncommand = \"date\"\ninterval = 0\n");

    assert!(matches!(
        load_and_validate(file.path()),
        Err(ExecError::ConfigError(_))
    ));
}

#[test]
fn overflowing_interval_returns_config_error() {
    let file = config_file("[exec]\ncommand = \"date\"\ninterval = \"99999999999999999h\"\n");

    match load_and_validate(file.path()) {
        Err(ExecError::ConfigError(msg)) => assert!(msg.contains("out of range"), "{msg}"),
        other => panic!("Expected ConfigError, got: {other:?}"),
    }
}

#[test]
fn unknown_keys_and_decoders_are_toml_errors() {
    let unknown_key = config_file("[exec]\ncommand = \"date\"\ninterval = 1\ncmd = \"x\"\n");
    let bad_decoder = config_file("[exec]\ncommand = \"date\"\ninterval = 1\ndecoder = \"xml\"\n");
    let line_decoder = config_file("[exec]\ncommand = \"date\"\ninterval = 1\ndecoder = \"line\"\n");

    assert!(matches!(
        load_and_validate(unknown_key.path()),
        Err(ExecError::TomlError(_))
    ));
    assert!(matches!(
        load_and_validate(bad_decoder.path()),
        Err(ExecError::TomlError(_))
    ));
    assert!(matches!(
        load_and_validate(line_decoder.path()),
        Err(ExecError::TomlError(_))
    ));
}

#[test]
fn missing_file_is_an_io_error() {
    assert!(matches!(
        load_and_validate("/definitely/not/here/PeriodicExec.toml"),
        Err(ExecError::IoError(_))
    ));
}

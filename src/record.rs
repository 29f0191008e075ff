// src/record.rs

//! Structured records produced from command output.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

pub const MESSAGE_FIELD: &str = "message";
pub const HOST_FIELD: &str = "host";
pub const COMMAND_FIELD: &str = "command";
pub const TIMESTAMP_FIELD: &str = "@timestamp";

/// A single structured unit of output, serialized as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn with_message(message: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(MESSAGE_FIELD.to_string(), Value::String(message.into()));
        Self { fields }
    }

    pub fn from_fields(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    pub fn message(&self) -> Option<&str> {
        self.str_field(MESSAGE_FIELD)
    }

    pub fn host(&self) -> Option<&str> {
        self.str_field(HOST_FIELD)
    }

    pub fn command(&self) -> Option<&str> {
        self.str_field(COMMAND_FIELD)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

/// Enrichment applied to every record before it reaches the sink.
///
/// Built once per input (host resolved at registration) and shared by every
/// invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventContext {
    pub host: String,
    pub command: String,
}

impl EventContext {
    pub fn new(host: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            command: command.into(),
        }
    }

    /// Stamp `host` and `command`, and `@timestamp` unless the decoder
    /// already provided one.
    pub fn enrich(&self, mut record: Record) -> Record {
        record.insert(HOST_FIELD, self.host.clone());
        record.insert(COMMAND_FIELD, self.command.clone());
        if record.get(TIMESTAMP_FIELD).is_none() {
            record.insert(
                TIMESTAMP_FIELD,
                Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            );
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enrich_sets_host_command_and_timestamp() {
        let ctx = EventContext::new("box-1", "echo hello");
        let rec = ctx.enrich(Record::with_message("hello"));

        assert_eq!(rec.message(), Some("hello"));
        assert_eq!(rec.host(), Some("box-1"));
        assert_eq!(rec.command(), Some("echo hello"));
        let ts = rec.get(TIMESTAMP_FIELD).and_then(Value::as_str).unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[test]
    fn enrich_keeps_decoder_timestamp_but_overrides_host() {
        let mut fields = Map::new();
        fields.insert(TIMESTAMP_FIELD.into(), "2020-01-01T00:00:00Z".into());
        fields.insert(HOST_FIELD.into(), "spoofed".into());

        let rec = EventContext::new("real", "cmd").enrich(Record::from_fields(fields));

        assert_eq!(
            rec.get(TIMESTAMP_FIELD).and_then(Value::as_str),
            Some("2020-01-01T00:00:00Z")
        );
        assert_eq!(rec.host(), Some("real"));
    }

    #[test]
    fn serializes_as_flat_object() {
        let rec = Record::with_message("x");
        assert_eq!(serde_json::to_string(&rec).unwrap(), r#"{"message":"x"}"#);
    }
}

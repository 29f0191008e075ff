// src/decode/json.rs

use serde_json::Value;

use crate::decode::{DecodeError, Decoder, trim_line_ending};
use crate::record::Record;

/// One JSON document per line.
///
/// - an object becomes the record's fields
/// - any other JSON value becomes `message` holding the raw line
/// - blank lines produce nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl Decoder for JsonDecoder {
    fn decode(&self, chunk: &[u8]) -> Result<Vec<Record>, DecodeError> {
        let line = trim_line_ending(chunk);
        if line.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        match serde_json::from_slice::<Value>(line)? {
            Value::Object(fields) => Ok(vec![Record::from_fields(fields)]),
            _ => {
                let raw = std::str::from_utf8(line)
                    .map_err(|e| DecodeError::Malformed(e.to_string()))?;
                Ok(vec![Record::with_message(raw.trim())])
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_fields_become_record_fields() {
        let recs = JsonDecoder
            .decode(br#"{"message":"up","load":0.5}"#)
            .unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].message(), Some("up"));
        assert_eq!(recs[0].get("load"), Some(&serde_json::json!(0.5)));
    }

    #[test]
    fn scalar_becomes_message() {
        let recs = JsonDecoder.decode(b"42\n").unwrap();
        assert_eq!(recs[0].message(), Some("42"));
    }

    #[test]
    fn blank_line_yields_nothing() {
        assert!(JsonDecoder.decode(b"  \n").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            JsonDecoder.decode(b"{oops\n"),
            Err(DecodeError::InvalidJson(_))
        ));
    }
}

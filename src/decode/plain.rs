// src/decode/plain.rs

use crate::decode::{DecodeError, Decoder, trim_line_ending};
use crate::record::Record;

/// Line-oriented text decoder: one record per chunk, text in `message`.
///
/// Invalid UTF-8 is replaced rather than rejected, so this decoder never
/// fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainDecoder;

impl Decoder for PlainDecoder {
    fn decode(&self, chunk: &[u8]) -> Result<Vec<Record>, DecodeError> {
        let text = String::from_utf8_lossy(trim_line_ending(chunk));
        Ok(vec![Record::with_message(text.into_owned())])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_record_per_line() {
        let recs = PlainDecoder.decode(b"hello world\n").unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].message(), Some("hello world"));
    }

    #[test]
    fn blank_line_still_yields_a_record() {
        let recs = PlainDecoder.decode(b"\n").unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].message(), Some(""));
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let recs = PlainDecoder.decode(b"caf\xe9\n").unwrap();
        assert_eq!(recs[0].message(), Some("caf\u{fffd}"));
    }
}

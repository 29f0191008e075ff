// src/decode/mod.rs

//! Pluggable decoders that turn raw stdout chunks into [`Record`]s.
//!
//! The drain loop hands every chunk it reads to a [`Decoder`]. A chunk is one
//! line including its trailing newline (if any). Decoders are free to produce
//! zero, one or many records from it.

use std::fmt::Debug;
use std::sync::Arc;

use thiserror::Error;

use crate::record::Record;
use crate::types::DecoderKind;

pub mod json;
pub mod plain;

pub use json::JsonDecoder;
pub use plain::PlainDecoder;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("{0}")]
    Malformed(String),
}

/// Converts one chunk of subprocess output into records.
pub trait Decoder: Send + Sync + Debug {
    fn decode(&self, chunk: &[u8]) -> Result<Vec<Record>, DecodeError>;
}

impl DecoderKind {
    /// Instantiate the decoder selected in config.
    pub fn build(self) -> Arc<dyn Decoder> {
        match self {
            DecoderKind::Plain => Arc::new(PlainDecoder),
            DecoderKind::Json => Arc::new(JsonDecoder),
        }
    }
}

/// Strip one trailing `\n` and then one trailing `\r`.
pub(crate) fn trim_line_ending(chunk: &[u8]) -> &[u8] {
    let chunk = chunk.strip_suffix(b"\n").unwrap_or(chunk);
    chunk.strip_suffix(b"\r").unwrap_or(chunk)
}

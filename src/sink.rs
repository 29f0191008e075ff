// src/sink.rs

//! Downstream destinations for records.
//!
//! The runner only needs something it can `append` to. Production wiring
//! uses a [`ChannelSink`] feeding a [`JsonLinesWriter`]; tests use an
//! in-memory sink from the test-utils crate.

use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::record::Record;

/// Append-only destination for records. Must not block the caller.
pub trait RecordSink: Send + Sync {
    fn append(&self, record: Record);
}

/// Sink backed by an unbounded channel.
#[derive(Debug)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Record>,
    closed_reported: AtomicBool,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<Record>) -> Self {
        Self {
            tx,
            closed_reported: AtomicBool::new(false),
        }
    }

    /// Convenience: a sink plus the receiving half.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Record>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self::new(tx), rx)
    }
}

impl RecordSink for ChannelSink {
    fn append(&self, record: Record) {
        if self.tx.send(record).is_err() && !self.closed_reported.swap(true, Ordering::Relaxed) {
            warn!("record receiver closed; dropping records from now on");
        }
    }
}

/// Writes each record received on a channel as one JSON line.
pub struct JsonLinesWriter<W> {
    rx: mpsc::UnboundedReceiver<Record>,
    out: W,
}

impl<W: AsyncWrite + Unpin> JsonLinesWriter<W> {
    pub fn new(rx: mpsc::UnboundedReceiver<Record>, out: W) -> Self {
        Self { rx, out }
    }

    /// Run until every sender is dropped. Returns the number of lines written.
    pub async fn run(mut self) -> Result<u64> {
        let mut written = 0u64;
        while let Some(record) = self.rx.recv().await {
            let mut line = serde_json::to_vec(&record).context("serializing record")?;
            line.push(b'\n');
            self.out
                .write_all(&line)
                .await
                .context("writing record line")?;
            self.out.flush().await.context("flushing record output")?;
            written += 1;
        }
        debug!(written, "record writer finished (channel closed)");
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn channel_sink_forwards_in_order() {
        let (sink, mut rx) = ChannelSink::channel();
        sink.append(Record::with_message("a"));
        sink.append(Record::with_message("b"));
        drop(sink);

        assert_eq!(rx.recv().await.unwrap().message(), Some("a"));
        assert_eq!(rx.recv().await.unwrap().message(), Some("b"));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn append_after_receiver_dropped_does_not_panic() {
        let (sink, rx) = ChannelSink::channel();
        drop(rx);
        sink.append(Record::with_message("lost"));
        sink.append(Record::with_message("lost again"));
        assert!(sink.closed_reported.load(Ordering::Relaxed));
    }

    #[tokio::test]
    async fn writer_emits_json_lines() {
        let (sink, rx) = ChannelSink::channel();
        sink.append(Record::with_message("one"));
        sink.append(Record::with_message("two"));
        drop(sink);

        let mut out = Vec::new();
        let written = JsonLinesWriter::new(rx, &mut out).run().await.unwrap();

        assert_eq!(written, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"message\":\"one\"}\n{\"message\":\"two\"}\n"
        );
    }
}

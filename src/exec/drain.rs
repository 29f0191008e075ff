// src/exec/drain.rs

//! Stream drain loops for one subprocess invocation.
//!
//! Both loops read until end-of-stream. They are plain futures, not spawned
//! tasks: the runner joins them inside the invocation, so they can borrow the
//! sink and decoder and never outlive the run.

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{error, info, trace};

use crate::decode::Decoder;
use crate::record::EventContext;
use crate::sink::RecordSink;

/// What a drain loop saw before reaching end-of-stream (or failing).
#[derive(Debug, Default)]
pub struct DrainReport {
    /// Chunks (lines) read from the stream.
    pub chunks: usize,
    /// Records appended to the sink (stdout only).
    pub records: usize,
    pub decode_failures: usize,
    /// Read error that ended the loop early, if any.
    pub error: Option<std::io::Error>,
}

/// Read stdout chunk by chunk, decode each chunk and append the enriched
/// records to the sink in read order.
///
/// A decode error is logged and the loop moves on to the next chunk.
pub async fn drain_stdout<R>(
    stdout: R,
    events: &EventContext,
    decoder: &dyn Decoder,
    sink: &dyn RecordSink,
) -> DrainReport
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stdout);
    let mut chunk = Vec::with_capacity(256);
    let mut report = DrainReport::default();

    loop {
        chunk.clear();
        match reader.read_until(b'\n', &mut chunk).await {
            Ok(0) => break,
            Ok(_) => {
                report.chunks += 1;
                match decoder.decode(&chunk) {
                    Ok(records) => {
                        for record in records {
                            sink.append(events.enrich(record));
                            report.records += 1;
                        }
                    }
                    Err(err) => {
                        report.decode_failures += 1;
                        error!(
                            command = %events.command,
                            error = %err,
                            chunk = %String::from_utf8_lossy(&chunk).trim_end(),
                            "failed to decode output chunk"
                        );
                    }
                }
            }
            Err(err) => {
                report.error = Some(err);
                break;
            }
        }
    }

    trace!(command = %events.command, chunks = report.chunks, "stdout drained");
    report
}

/// Read stderr to end-of-stream.
///
/// With `log_stderr` each line becomes an info entry; otherwise the bytes are
/// discarded. Either way the pipe is emptied so the child never blocks on a
/// full stderr buffer.
pub async fn drain_stderr<R>(mut stderr: R, command: &str, log_stderr: bool) -> DrainReport
where
    R: AsyncRead + Unpin,
{
    let mut report = DrainReport::default();

    if !log_stderr {
        if let Err(err) = tokio::io::copy(&mut stderr, &mut tokio::io::sink()).await {
            report.error = Some(err);
        }
        return report;
    }

    let mut reader = BufReader::new(stderr);
    let mut line = Vec::with_capacity(256);
    loop {
        line.clear();
        match reader.read_until(b'\n', &mut line).await {
            Ok(0) => break,
            Ok(_) => {
                report.chunks += 1;
                let text = String::from_utf8_lossy(&line);
                info!(command, stream = "stderr", "{}", text.trim_end_matches(['\r', '\n']));
            }
            Err(err) => {
                report.error = Some(err);
                break;
            }
        }
    }

    trace!(command, lines = report.chunks, "stderr drained");
    report
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::decode::{JsonDecoder, PlainDecoder};
    use crate::record::Record;

    #[derive(Default)]
    struct VecSink(Mutex<Vec<Record>>);

    impl RecordSink for VecSink {
        fn append(&self, record: Record) {
            self.0.lock().unwrap().push(record);
        }
    }

    impl VecSink {
        fn messages(&self) -> Vec<String> {
            self.0
                .lock()
                .unwrap()
                .iter()
                .map(|r| r.message().unwrap_or_default().to_string())
                .collect()
        }
    }

    #[tokio::test]
    async fn stdout_lines_are_decoded_in_order() {
        let sink = VecSink::default();
        let events = EventContext::new("h", "printf");
        let input: &[u8] = b"one\ntwo\nthree\n";

        let report = drain_stdout(input, &events, &PlainDecoder, &sink).await;

        assert_eq!(report.chunks, 3);
        assert_eq!(report.records, 3);
        assert!(report.error.is_none());
        assert_eq!(sink.messages(), vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn trailing_chunk_without_newline_is_kept() {
        let sink = VecSink::default();
        let events = EventContext::new("h", "printf");
        let input: &[u8] = b"first\nlast";

        let report = drain_stdout(input, &events, &PlainDecoder, &sink).await;

        assert_eq!(report.records, 2);
        assert_eq!(sink.messages(), vec!["first", "last"]);
    }

    #[tokio::test]
    async fn decode_failures_do_not_stop_the_loop() {
        let sink = VecSink::default();
        let events = EventContext::new("h", "gen-json");
        let input: &[u8] = b"{\"message\":\"a\"}\n{broken\n{\"message\":\"b\"}\n";

        let report = drain_stdout(input, &events, &JsonDecoder, &sink).await;

        assert_eq!(report.chunks, 3);
        assert_eq!(report.decode_failures, 1);
        assert_eq!(sink.messages(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn records_are_enriched() {
        let sink = VecSink::default();
        let events = EventContext::new("host-a", "echo hello");
        let input: &[u8] = b"hello\n";

        drain_stdout(input, &events, &PlainDecoder, &sink).await;

        let recs = sink.0.lock().unwrap();
        assert_eq!(recs[0].host(), Some("host-a"));
        assert_eq!(recs[0].command(), Some("echo hello"));
    }

    #[tokio::test]
    async fn stderr_is_drained_either_way() {
        let input: &[u8] = b"warn 1\nwarn 2\n";
        let logged = drain_stderr(input, "cmd", true).await;
        assert_eq!(logged.chunks, 2);

        let big = vec![b'x'; 1 << 20];
        let discarded = drain_stderr(big.as_slice(), "cmd", false).await;
        assert!(discarded.error.is_none());
        assert_eq!(discarded.chunks, 0);
    }
}

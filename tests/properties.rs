// tests/properties.rs

use std::time::Duration;

use proptest::prelude::*;

use periodic_exec::decode::{Decoder, PlainDecoder};
use periodic_exec::engine::remaining_sleep;

proptest! {
    #[test]
    fn next_start_is_one_interval_or_one_run_later(
        interval_ms in 1u64..600_000,
        elapsed_ms in 0u64..1_200_000,
    ) {
        let interval = Duration::from_millis(interval_ms);
        let elapsed = Duration::from_millis(elapsed_ms);

        match remaining_sleep(interval, elapsed) {
            // Under the interval: run + sleep lands exactly on the next tick.
            Some(rest) => {
                prop_assert!(elapsed < interval);
                prop_assert_eq!(elapsed + rest, interval);
            }
            // Overrun: no sleep at all.
            None => prop_assert!(elapsed >= interval),
        }
    }

    #[test]
    fn plain_decoder_yields_exactly_the_line(line in "[^\r\n]*") {
        let chunk = format!("{line}\n");
        let records = PlainDecoder.decode(chunk.as_bytes()).unwrap();

        prop_assert_eq!(records.len(), 1);
        prop_assert_eq!(records[0].message(), Some(line.as_str()));
    }
}

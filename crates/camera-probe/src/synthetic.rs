use crate::{FrameRecord, FrameSource, StreamError};
use time::OffsetDateTime;
use tracing::debug;

/// Placeholder frame source: no device is opened, frames are a counter plus wall-clock time.
pub struct SyntheticCamera {
    counter: u64,
}

impl SyntheticCamera {
    /// Frames produced so far.
    pub fn frames(&self) -> u64 {
        self.counter
    }
}

impl FrameSource for SyntheticCamera {
    fn open(device_path: &str) -> Result<Self, StreamError> {
        debug!(device = device_path, "synthetic source opened; device is not touched");
        Ok(Self { counter: 0 })
    }

    fn next_frame(&mut self) -> Result<FrameRecord, StreamError> {
        let record = FrameRecord {
            sequence: self.counter,
            timestamp: unix_seconds(OffsetDateTime::now_utc()),
        };
        self.counter += 1;
        Ok(record)
    }
}

fn unix_seconds(ts: OffsetDateTime) -> f64 {
    ts.unix_timestamp_nanos() as f64 / 1_000_000_000.0
}

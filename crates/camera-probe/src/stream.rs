use crate::report::{stream_start_line, STREAM_STOPPED};
use crate::{frame_line, CameraKind, FrameSource, StreamError};
use std::io::Write;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Pause between frames, roughly 30 per second.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(33);

#[derive(Clone, Debug)]
pub struct StreamConfig {
    /// Fixed pause after each frame. No drift correction.
    pub interval: Duration,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_FRAME_INTERVAL,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StreamSummary {
    pub frames: u64,
}

/// Write frame records from `source` to `out`, one JSON object per line, until `cancel` fires.
///
/// The token is checked at the top of every iteration; a cancellation that lands during the
/// pause cuts the pause short. On cancellation the stop line is written and the summary
/// returned. Any source or write failure ends the stream with an error.
pub async fn stream<S, W>(
    source: &mut S,
    out: &mut W,
    kind: CameraKind,
    device_path: &str,
    config: &StreamConfig,
    cancel: &CancellationToken,
) -> Result<StreamSummary, StreamError>
where
    S: FrameSource,
    W: Write,
{
    writeln!(out, "{}", stream_start_line(kind, device_path))?;
    out.flush()?;
    info!(
        kind = %kind,
        device = device_path,
        interval_ms = config.interval.as_millis() as u64,
        "stream started"
    );

    let mut frames = 0u64;
    while !cancel.is_cancelled() {
        let record = source.next_frame()?;
        writeln!(out, "{}", frame_line(&record)?)?;
        out.flush()?;
        frames += 1;

        tokio::select! {
            _ = cancel.cancelled() => debug!(frames, "cancelled during pause"),
            _ = tokio::time::sleep(config.interval) => {}
        }
    }

    writeln!(out, "{STREAM_STOPPED}")?;
    out.flush()?;
    info!(frames, "stream stopped");
    Ok(StreamSummary { frames })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FrameRecord, SyntheticCamera};

    /// Synthetic source that requests cancellation once `limit` frames were handed out.
    struct StopAfter {
        inner: SyntheticCamera,
        limit: u64,
        cancel: CancellationToken,
    }

    impl FrameSource for StopAfter {
        fn open(_device_path: &str) -> Result<Self, StreamError> {
            Err(StreamError::Source("use StopAfter::new".into()))
        }

        fn next_frame(&mut self) -> Result<FrameRecord, StreamError> {
            let record = self.inner.next_frame()?;
            if self.inner.frames() >= self.limit {
                self.cancel.cancel();
            }
            Ok(record)
        }
    }

    /// Fails on the call after `ok` successful frames.
    struct FailAfter {
        ok: u64,
        served: u64,
    }

    impl FrameSource for FailAfter {
        fn open(_device_path: &str) -> Result<Self, StreamError> {
            Ok(Self { ok: 0, served: 0 })
        }

        fn next_frame(&mut self) -> Result<FrameRecord, StreamError> {
            if self.served >= self.ok {
                return Err(StreamError::Source("sensor went away".into()));
            }
            self.served += 1;
            Ok(FrameRecord {
                sequence: self.served - 1,
                timestamp: 1.0,
            })
        }
    }

    fn fast() -> StreamConfig {
        StreamConfig {
            interval: Duration::from_millis(1),
        }
    }

    fn lines(buf: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(buf)
            .lines()
            .map(str::to_owned)
            .collect()
    }

    #[tokio::test]
    async fn emits_start_frames_and_stop_lines() -> anyhow::Result<()> {
        let cancel = CancellationToken::new();
        let mut source = StopAfter {
            inner: SyntheticCamera::open("/dev/video0")?,
            limit: 5,
            cancel: cancel.clone(),
        };
        let mut out = Vec::new();

        let summary = stream(
            &mut source,
            &mut out,
            CameraKind::Webcam,
            "/dev/video0",
            &fast(),
            &cancel,
        )
        .await?;
        assert_eq!(summary.frames, 5);

        let lines = lines(&out);
        assert_eq!(lines.len(), 7);
        assert_eq!(lines[0], "Starting webcam stream from /dev/video0");
        assert_eq!(lines[6], "Camera stream stopped by user");

        let mut last_ts = f64::MIN;
        for (i, line) in lines[1..6].iter().enumerate() {
            let v: serde_json::Value = serde_json::from_str(line)?;
            assert_eq!(v["frame"].as_u64(), Some(i as u64));
            let ts = v["timestamp"].as_f64().unwrap_or(f64::NAN);
            assert!(ts >= last_ts, "timestamps went backwards: {ts} < {last_ts}");
            last_ts = ts;
        }
        Ok(())
    }

    #[tokio::test]
    async fn already_cancelled_writes_no_frames() -> anyhow::Result<()> {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut source = SyntheticCamera::open("/dev/vchiq")?;
        let mut out = Vec::new();

        let summary = stream(
            &mut source,
            &mut out,
            CameraKind::RaspberryPi,
            "/dev/vchiq",
            &fast(),
            &cancel,
        )
        .await?;
        assert_eq!(summary.frames, 0);
        assert_eq!(
            lines(&out),
            vec![
                "Starting Raspberry Pi camera stream from /dev/vchiq".to_string(),
                "Camera stream stopped by user".to_string(),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn cancellation_interrupts_long_pause() -> anyhow::Result<()> {
        let cancel = CancellationToken::new();
        let mut source = SyntheticCamera::open("/dev/video0")?;
        let mut out = Vec::new();
        let slow = StreamConfig {
            interval: Duration::from_secs(3600),
        };

        let trigger = cancel.clone();
        let stopper = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let summary = tokio::time::timeout(
            Duration::from_secs(5),
            stream(
                &mut source,
                &mut out,
                CameraKind::Webcam,
                "/dev/video0",
                &slow,
                &cancel,
            ),
        )
        .await??;
        stopper.await?;

        assert_eq!(summary.frames, 1);
        assert_eq!(lines(&out).last().map(String::as_str), Some(STREAM_STOPPED));
        Ok(())
    }

    #[tokio::test]
    async fn source_failure_ends_stream_without_stop_line() -> anyhow::Result<()> {
        let cancel = CancellationToken::new();
        let mut source = FailAfter { ok: 2, served: 0 };
        let mut out = Vec::new();

        let err = stream(
            &mut source,
            &mut out,
            CameraKind::Webcam,
            "/dev/video1",
            &fast(),
            &cancel,
        )
        .await;
        assert!(matches!(err, Err(StreamError::Source(_))));

        let lines = lines(&out);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l != STREAM_STOPPED));
        Ok(())
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn write_failure_is_reported() -> anyhow::Result<()> {
        let cancel = CancellationToken::new();
        let mut source = SyntheticCamera::open("/dev/video0")?;
        let err = stream(
            &mut source,
            &mut BrokenPipe,
            CameraKind::Webcam,
            "/dev/video0",
            &fast(),
            &cancel,
        )
        .await;
        assert!(matches!(err, Err(StreamError::Io(_))));
        assert_eq!(source.frames(), 0);
        Ok(())
    }
}

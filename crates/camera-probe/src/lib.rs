//! camera-probe: device-node detection and a synthetic frame stream
//!
//! Detection only checks whether well-known `/dev` nodes exist; nothing is opened.
//! Streaming pulls records from a [`FrameSource`] and writes them as JSON lines
//! until a cancellation token fires. The default build ships a `synthetic` source
//! that fabricates a counter and a wall-clock timestamp instead of capturing.

mod types;
pub use types::{CameraKind, DeviceProbeResult, FrameRecord};

mod error;
pub use error::{ProbeError, Result, StreamError};

mod traits;
pub use traits::{DeviceFs, FrameSource};

mod fs;
pub use fs::{HostFs, RootedFs};

mod detect;
pub use detect::{Detector, LEGACY_PI_NODE, PRIMARY_PI_NODE, WEBCAM_INDICES};

pub mod report;

mod stream;
pub use stream::{stream, StreamConfig, StreamSummary, DEFAULT_FRAME_INTERVAL};

mod json;
pub use json::{frame_line, SpacedFormatter};

#[cfg(feature = "synthetic")]
mod synthetic;
#[cfg(feature = "synthetic")]
pub use synthetic::SyntheticCamera;

// Re-exported so callers don't need a direct tokio-util dependency to drive `stream`.
pub use tokio_util::sync::CancellationToken;

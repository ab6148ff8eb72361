use core::fmt;
use serde::Serialize;
use std::path::PathBuf;

/// Category of camera a probe or stream is about.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum CameraKind {
    RaspberryPi,
    Webcam,
}

impl CameraKind {
    /// Spelling used on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            CameraKind::RaspberryPi => "raspberry",
            CameraKind::Webcam => "webcam",
        }
    }

    /// Human-readable name used in status lines.
    pub fn label(&self) -> &'static str {
        match self {
            CameraKind::RaspberryPi => "Raspberry Pi camera",
            CameraKind::Webcam => "webcam",
        }
    }
}

impl fmt::Display for CameraKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a single detection run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DeviceProbeResult {
    Found { path: PathBuf, kind: CameraKind },
    NotFound,
}

impl DeviceProbeResult {
    pub fn is_found(&self) -> bool {
        matches!(self, DeviceProbeResult::Found { .. })
    }
}

/// One synthetic frame descriptor. Serialized as `{"frame": .., "timestamp": ..}`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FrameRecord {
    #[serde(rename = "frame")]
    pub sequence: u64,
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
}

use crate::{CameraKind, DeviceFs, DeviceProbeResult, HostFs, Result};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Device node the Pi camera stack exposes through V4L2.
pub const PRIMARY_PI_NODE: &str = "/dev/video0";
/// Legacy VideoCore interface used by older Pi camera firmware.
pub const LEGACY_PI_NODE: &str = "/dev/vchiq";
/// `/dev/videoN` indices scanned for a webcam, lowest first.
pub const WEBCAM_INDICES: RangeInclusive<u8> = 0..=9;

/// Probes a device tree for camera nodes.
#[derive(Clone, Debug, Default)]
pub struct Detector<F = HostFs> {
    fs: F,
}

impl Detector<HostFs> {
    pub fn host() -> Self {
        Self { fs: HostFs }
    }
}

impl<F: DeviceFs> Detector<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    /// Report the first matching node for `kind`, or `NotFound`.
    pub fn detect(&self, kind: CameraKind) -> Result<DeviceProbeResult> {
        for path in self.candidates(kind) {
            if self.fs.exists(&path)? {
                debug!(kind = %kind, path = %path.display(), "camera node present");
                return Ok(DeviceProbeResult::Found { path, kind });
            }
        }
        debug!(kind = %kind, "no camera node present");
        Ok(DeviceProbeResult::NotFound)
    }

    /// Paths checked for `kind`, in probe order.
    pub fn candidates(&self, kind: CameraKind) -> Vec<PathBuf> {
        match kind {
            CameraKind::RaspberryPi => vec![
                Path::new(PRIMARY_PI_NODE).to_path_buf(),
                Path::new(LEGACY_PI_NODE).to_path_buf(),
            ],
            CameraKind::Webcam => WEBCAM_INDICES
                .map(|i| PathBuf::from(format!("/dev/video{i}")))
                .collect(),
        }
    }
}

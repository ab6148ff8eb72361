use crate::{FrameRecord, Result, StreamError};
use std::path::Path;

/// Existence checks against a device tree.
pub trait DeviceFs {
    /// Whether `path` (an absolute `/dev/...` path) exists.
    ///
    /// Only a missing node (`ENOENT`) is `Ok(false)`. Any other stat failure, such as
    /// `EACCES` on a parent directory, `ENOTDIR` when a path component is a regular file, or
    /// `ELOOP`, is returned as [`ProbeError::Io`](crate::ProbeError::Io) and stops the probe
    /// rather than moving on to the next candidate.
    fn exists(&self, path: &Path) -> Result<bool>;
}

impl<T: DeviceFs + ?Sized> DeviceFs for &T {
    fn exists(&self, path: &Path) -> Result<bool> {
        (**self).exists(path)
    }
}

/// Something the streamer can pull frame records from.
pub trait FrameSource {
    /// Open a source for the given device path. The path may be used as a label only.
    fn open(device_path: &str) -> Result<Self, StreamError>
    where
        Self: Sized;

    /// Produce the next frame record.
    fn next_frame(&mut self) -> Result<FrameRecord, StreamError>;
}

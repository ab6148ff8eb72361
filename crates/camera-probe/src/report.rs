//! Status lines printed on stdout. Callers parse these, so the wording is fixed.

use crate::{CameraKind, DeviceProbeResult};
use core::fmt::Display;

pub const FOUND_PREFIX: &str = "CAMERA_FOUND:";
pub const STREAM_STOPPED: &str = "Camera stream stopped by user";

/// Line for a completed probe.
pub fn probe_line(kind: CameraKind, result: &DeviceProbeResult) -> String {
    match result {
        DeviceProbeResult::Found { path, .. } => format!("{FOUND_PREFIX}{}", path.display()),
        DeviceProbeResult::NotFound => not_found_line(kind).to_string(),
    }
}

pub fn not_found_line(kind: CameraKind) -> &'static str {
    match kind {
        CameraKind::RaspberryPi => "Raspberry Pi camera not found",
        CameraKind::Webcam => "No webcam found",
    }
}

pub fn probe_error_line(kind: CameraKind, err: &dyn Display) -> String {
    format!("Error detecting {}: {err}", kind.label())
}

pub fn stream_start_line(kind: CameraKind, device_path: &str) -> String {
    format!("Starting {} stream from {device_path}", kind.label())
}

pub fn stream_error_line(kind: CameraKind, err: &dyn Display) -> String {
    format!("Error streaming from {}: {err}", kind.label())
}

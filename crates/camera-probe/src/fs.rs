use crate::{DeviceFs, ProbeError, Result};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Checks device nodes on the host filesystem.
#[derive(Clone, Copy, Debug, Default)]
pub struct HostFs;

impl DeviceFs for HostFs {
    fn exists(&self, path: &Path) -> Result<bool> {
        let present = path.try_exists().map_err(|source| ProbeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        trace!(path = %path.display(), present, "checked device node");
        Ok(present)
    }
}

/// Resolves absolute device paths under another root, e.g. a mounted image or a test dir.
#[derive(Clone, Debug)]
pub struct RootedFs {
    root: PathBuf,
}

impl RootedFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Where `path` lives under this root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        let relative = path.strip_prefix("/").unwrap_or(path);
        self.root.join(relative)
    }
}

impl DeviceFs for RootedFs {
    fn exists(&self, path: &Path) -> Result<bool> {
        let resolved = self.resolve(path);
        resolved.try_exists().map_err(|source| ProbeError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

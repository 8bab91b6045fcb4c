//! Resolution of request targets beneath the catalogue root.
//!
//! A target is served only if every byte is in `[A-Za-z0-9./-]`, its
//! canonical form exists, and that canonical path lies beneath the canonical
//! root. Checking the character set first keeps odd targets away from the
//! filesystem entirely.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Error;

/// Result of resolving a target inside the sandbox.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Canonical path of a regular file beneath the root.
    File(PathBuf),
    /// The path does not exist locally; the redirect table may know it.
    Unresolved,
    /// Disallowed characters, escape outside the root, or a directory.
    Rejected,
}

/// Bytes allowed in a request target before it reaches the filesystem.
pub fn is_allowed_target_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'/' | b'-')
}

#[derive(Debug, Clone)]
pub struct Sandbox {
    root: Arc<Path>,
}

impl Sandbox {
    /// `root` must already be canonical.
    pub fn new(root: Arc<Path>) -> Self {
        Self { root }
    }

    /// Resolves `target` (which starts with `/`) under the root.
    ///
    /// Only resource exhaustion while canonicalizing is an error; every other
    /// resolution failure means the path is not available locally.
    pub async fn resolve(&self, target: &[u8]) -> Result<Resolution, Error> {
        if !target.iter().copied().all(is_allowed_target_byte) {
            return Ok(Resolution::Rejected);
        }

        // The byte check above guarantees ASCII.
        let Ok(target) = std::str::from_utf8(target) else {
            return Ok(Resolution::Rejected);
        };
        let mut joined = self.root.as_os_str().to_owned();
        joined.push(target);

        let canonical = match tokio::fs::canonicalize(&joined).await {
            Ok(path) => path,
            Err(e) if e.kind() == io::ErrorKind::OutOfMemory => return Err(Error::Internal(e)),
            Err(_) => return Ok(Resolution::Unresolved),
        };

        if !canonical.starts_with(&*self.root) {
            tracing::debug!(path = %canonical.display(), "Target resolves outside the catalogue");
            return Ok(Resolution::Rejected);
        }

        match tokio::fs::metadata(&canonical).await {
            Ok(meta) if meta.is_dir() => Ok(Resolution::Rejected),
            Ok(_) => Ok(Resolution::File(canonical)),
            Err(e) => Err(Error::Internal(e)),
        }
    }
}

//! Content fingerprints used by watch mode to skip events that changed nothing.
use std::path::Path;

use sha2::{Digest as _, Sha256};

use crate::error::Error;

/// A SHA-256 digest over the watched inputs, as 64 lowercase hex chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fingerprint(
    /// The hex-encoded digest string.
    pub String,
);

/// Fingerprint the contents of several files, in order.
///
/// Each file contributes its length before its bytes so that moving content
/// from one file to the next still changes the digest.
///
/// # Errors
///
/// Returns `Error::Io` if any file cannot be read.
pub fn fingerprint_files(paths: &[&Path]) -> Result<Fingerprint, Error> {
    let mut hasher = Sha256::new();
    for path in paths {
        let content = std::fs::read(path)?;
        let len = u64::try_from(content.len()).unwrap_or(u64::MAX);
        hasher.update(len.to_le_bytes());
        hasher.update(&content);
    }
    return Ok(Fingerprint(format!("{:x}", hasher.finalize())));
}

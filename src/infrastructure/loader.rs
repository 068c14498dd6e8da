//! Fragment loading
//!
//! Reads only the leading bytes a matcher can inspect, so identifying a
//! multi-gigabyte file costs one short read.

use crate::domain::entities::ContentType;
use crate::domain::services::Matcher;
use crate::error::{IdentifyError, Result};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::debug;

const MAX_PREALLOCATION: usize = 64 * 1024;

/// Reads up to `limit` bytes from the start of `reader`.
///
/// Short sources yield a short buffer, which is valid matcher input.
pub fn load_fragment<R: Read>(reader: R, limit: usize) -> std::io::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(limit.min(MAX_PREALLOCATION));
    reader.take(limit as u64).read_to_end(&mut buffer)?;
    Ok(buffer)
}

impl Matcher {
    /// Identifies the leading bytes of `reader`
    pub fn identify_reader<R: Read>(&self, reader: R) -> Result<Option<&ContentType>> {
        let fragment = load_fragment(reader, self.required_len())?;
        Ok(self.identify(&fragment))
    }

    /// Identifies the file at `path`.
    ///
    /// Anything that is not a non-empty regular file yields `Ok(None)`.
    pub fn identify_path(&self, path: impl AsRef<Path>) -> Result<Option<&ContentType>> {
        let path = path.as_ref();
        let io_err = |source: std::io::Error| IdentifyError::Io {
            path: path.to_path_buf(),
            source,
        };

        let metadata = match std::fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("Skipping {}: not found", path.display());
                return Ok(None);
            }
            Err(err) => return Err(io_err(err)),
        };
        if !metadata.is_file() || metadata.len() == 0 {
            debug!("Skipping {}: not a non-empty regular file", path.display());
            return Ok(None);
        }

        let file = File::open(path).map_err(io_err)?;
        let fragment = load_fragment(file, self.required_len()).map_err(io_err)?;
        Ok(self.identify(&fragment))
    }
}

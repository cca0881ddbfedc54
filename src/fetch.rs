//! Input acquisition: a local path, or an http(s) URL downloaded to a
//! temporary file before phase 1 begins.

use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::types::CycleError;

/// A resolved input: the caller's own file, or a downloaded temp file that
/// lives as long as this value.
pub enum InputSource {
    Local(PathBuf),
    Downloaded(NamedTempFile),
}

impl InputSource {
    pub fn path(&self) -> &Path {
        match self {
            InputSource::Local(p) => p,
            InputSource::Downloaded(f) => f.path(),
        }
    }
}

pub fn is_url(arg: &str) -> bool {
    arg.starts_with("http://") || arg.starts_with("https://")
}

/// Resolve a CLI input argument.  A URL is fetched whole into a temp file;
/// any transport failure or non-success status is fatal.
pub fn resolve_input(arg: &str) -> Result<InputSource, CycleError> {
    if !is_url(arg) {
        return Ok(InputSource::Local(PathBuf::from(arg)));
    }
    let response = ureq::get(arg).call().map_err(|e| CycleError::Fetch {
        url: arg.to_string(),
        reason: e.to_string(),
    })?;
    let mut temp =
        NamedTempFile::new().map_err(|e| CycleError::io(std::env::temp_dir(), e))?;
    let mut body = response.into_reader();
    let copied = io::copy(&mut body, temp.as_file_mut());
    let bytes = copied.map_err(|e| CycleError::io(temp.path(), e))?;
    debug!(url = arg, bytes, "input downloaded");
    Ok(InputSource::Downloaded(temp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_detection() {
        assert!(is_url("http://example.com/hops.log"));
        assert!(is_url("https://example.com/hops.log"));
        assert!(!is_url("hops.log"));
        assert!(!is_url("/var/log/hops.log"));
        assert!(!is_url("ftp://example.com/hops.log"));
    }

    #[test]
    fn test_local_path_passthrough() {
        let src = resolve_input("/tmp/does-not-need-to-exist").unwrap();
        assert_eq!(src.path(), Path::new("/tmp/does-not-need-to-exist"));
    }
}

//! Small helpers for the flat JSON files the agents keep on disk.
//!
//! Both the FAQ file and the lead database are plain JSON arrays that get
//! rewritten in full. Reads follow "read-or-default" semantics: a missing
//! file and a file that fails to parse are treated the same way.

use serde::{Serialize, de::DeserializeOwned};
use serde_json::ser::PrettyFormatter;
use std::io;
use std::path::Path;
use tracing::warn;

/// Serializes `value` as JSON indented with four spaces.
pub fn to_pretty_bytes<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(buf)
}

/// Reads a JSON document, falling back to `T::default()` when the file is
/// absent or does not parse as `T`.
///
/// Only genuine I/O failures (permissions, a directory in the way, ...) are
/// reported as errors.
pub async fn read_or_default<T>(path: &Path) -> io::Result<T>
where
    T: DeserializeOwned + Default,
{
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => return Err(e),
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => Ok(value),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable JSON file contents");
            Ok(T::default())
        }
    }
}

/// Rewrites `path` with the pretty-printed JSON of `value`.
pub async fn write_pretty<T: Serialize + ?Sized>(path: &Path, value: &T) -> io::Result<()> {
    let bytes = to_pretty_bytes(value).map_err(io::Error::other)?;
    tokio::fs::write(path, bytes).await
}

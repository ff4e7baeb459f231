//! Change-aware filesystem primitives.
//!
//! Every function reports whether it actually touched the disk, which is
//! what the synchronizer turns into change signals.

use std::{fs, io, path::Path};

use crate::error::Error;

/// Writes `content` to `path` unless the file already holds exactly these bytes.
///
/// A missing parent directory is created, but only one level: its own
/// parent must exist.
pub fn write_if_needed<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, content: C) -> Result<bool, Error> {
    let path = path.as_ref();
    let content = content.as_ref();
    match fs::read(path) {
        Ok(existing) if existing == content => return Ok(false),
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if let Some(parent) = path.parent() {
                create_dir_if_needed(parent)?;
            }
        }
        Err(e) => return Err(Error::Io(e)),
    }
    fs::write(path, content)?;
    tracing::debug!(path = %path.display(), "written");
    Ok(true)
}

/// Removes the file at `path` if there is one.
pub fn remove_file_if_exists<P: AsRef<Path>>(path: P) -> Result<bool, Error> {
    let path = path.as_ref();
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed");
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(Error::Io(e)),
    }
}

/// Removes the directory at `path` only if it exists and is empty.
pub fn remove_dir_if_empty<P: AsRef<Path>>(path: P) -> Result<bool, Error> {
    let path = path.as_ref();
    let mut entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(Error::Io(e)),
    };
    if entries.next().is_some() {
        return Ok(false);
    }
    fs::remove_dir(path)?;
    tracing::debug!(path = %path.display(), "removed empty directory");
    Ok(true)
}

/// Creates the directory `path` unless it already is one.
///
/// Not recursive: a missing parent is an error.
pub fn create_dir_if_needed<P: AsRef<Path>>(path: P) -> Result<bool, Error> {
    let path = path.as_ref();
    if path.is_dir() {
        return Ok(false);
    }
    fs::create_dir(path)?;
    Ok(true)
}

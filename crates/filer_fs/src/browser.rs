//! Directory listing - immediate children of a single directory

use crate::{FsError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// What kind of filesystem object an entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

/// A single entry in a directory listing, relative to the listed directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl FileEntry {
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// List the immediate children of a directory.
///
/// Produces a fresh snapshot on every call. Entry order is whatever the
/// underlying directory enumeration yields; callers must not rely on it.
pub fn list_directory<P: AsRef<Path>>(path: P) -> Result<Vec<FileEntry>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(FsError::NotFound(path.display().to_string()));
    }

    if !path.is_dir() {
        return Err(FsError::InvalidPath(format!(
            "Not a directory: {}",
            path.display()
        )));
    }

    let mut entries = Vec::new();

    for entry in fs::read_dir(path)? {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue, // Skip entries we can't read
        };

        let kind = match entry.file_type() {
            Ok(t) if t.is_dir() => EntryKind::Directory,
            Ok(_) => EntryKind::File,
            Err(_) => continue,
        };

        entries.push(FileEntry {
            name: entry.file_name().to_string_lossy().to_string(),
            kind,
        });
    }

    Ok(entries)
}

/// Get parent directory
pub fn get_parent<P: AsRef<Path>>(path: P) -> Option<PathBuf> {
    path.as_ref().parent().map(Path::to_path_buf)
}

/// Check if path is a root/drive
pub fn is_root<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();

    #[cfg(windows)]
    {
        // Windows: C:\ is root
        let s = path.to_string_lossy();
        s.len() <= 3 && s.ends_with('\\')
    }

    #[cfg(not(windows))]
    {
        path.parent().is_none()
    }
}

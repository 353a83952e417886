//! Locations, listings, and path resolution

use filer_fs::{get_parent, is_root, list_directory, list_volumes, EntryKind, FileEntry, Volume};
use std::path::PathBuf;

/// Display label of the synthetic top-level volumes view
pub const VOLUMES_ROOT_LABEL: &str = "This PC";

/// Placeholder entry name shown for an unresolvable directory
pub const INVALID_DIRECTORY_MARKER: &str = "Invalid directory";

/// Where the session currently is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// Synthetic top-level view listing storage volumes
    VolumesRoot,
    Directory(PathBuf),
}

impl Location {
    pub fn display(&self) -> String {
        match self {
            Location::VolumesRoot => VOLUMES_ROOT_LABEL.to_string(),
            Location::Directory(path) => path.display().to_string(),
        }
    }
}

/// What a location resolved to, ready for the shell to render
#[derive(Debug, Clone)]
pub enum Listing {
    Directory {
        path: PathBuf,
        entries: Vec<FileEntry>,
    },
    Volumes(Vec<Volume>),
    /// The attempted path did not resolve to a directory. Carries a single
    /// placeholder entry so the shell always has something to render.
    InvalidDirectory {
        attempted: PathBuf,
        entries: Vec<FileEntry>,
    },
}

impl Listing {
    pub fn display_path(&self) -> String {
        match self {
            Listing::Directory { path, .. } => path.display().to_string(),
            Listing::Volumes(_) => VOLUMES_ROOT_LABEL.to_string(),
            Listing::InvalidDirectory { attempted, .. } => attempted.display().to_string(),
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, Listing::InvalidDirectory { .. })
    }
}

/// Resolve a location into a listing. Never fails: the volumes view always
/// succeeds and a bad directory degrades to the invalid-directory marker.
pub fn resolve(location: &Location) -> Listing {
    match location {
        Location::VolumesRoot => Listing::Volumes(list_volumes()),
        Location::Directory(path) => match list_directory(path) {
            Ok(entries) => Listing::Directory {
                path: path.clone(),
                entries,
            },
            Err(e) => {
                tracing::debug!("Cannot list {}: {}", path.display(), e);
                Listing::InvalidDirectory {
                    attempted: path.clone(),
                    entries: vec![FileEntry {
                        name: INVALID_DIRECTORY_MARKER.to_string(),
                        kind: EntryKind::File,
                    }],
                }
            }
        },
    }
}

/// Parent of a location. Volume roots (and parentless paths) go up to the
/// volumes view; only the volumes view itself has no parent.
pub fn parent_of(location: &Location) -> Option<Location> {
    match location {
        Location::VolumesRoot => None,
        Location::Directory(path) => {
            if is_root(path) {
                return Some(Location::VolumesRoot);
            }
            match get_parent(path) {
                Some(parent) => Some(Location::Directory(parent)),
                None => Some(Location::VolumesRoot),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_resolve_directory() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();

        match resolve(&Location::Directory(dir.path().to_path_buf())) {
            Listing::Directory { path, entries } => {
                assert_eq!(path, dir.path());
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].name, "a.txt");
            }
            other => panic!("unexpected listing: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_invalid_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("ghost");

        let listing = resolve(&Location::Directory(missing.clone()));
        assert!(listing.is_invalid());
        match listing {
            Listing::InvalidDirectory { attempted, entries } => {
                assert_eq!(attempted, missing);
                assert_eq!(entries.len(), 1);
                assert_eq!(entries[0].name, INVALID_DIRECTORY_MARKER);
            }
            other => panic!("unexpected listing: {:?}", other),
        }
    }

    #[test]
    fn test_resolve_volumes_root() {
        match resolve(&Location::VolumesRoot) {
            Listing::Volumes(_) => {}
            other => panic!("unexpected listing: {:?}", other),
        }
    }

    #[test]
    fn test_parent_of_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();

        assert_eq!(
            parent_of(&Location::Directory(sub)),
            Some(Location::Directory(dir.path().to_path_buf()))
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_parent_of_volume_root() {
        assert_eq!(
            parent_of(&Location::Directory(PathBuf::from("/"))),
            Some(Location::VolumesRoot)
        );
    }

    #[test]
    fn test_parent_of_volumes_root() {
        assert_eq!(parent_of(&Location::VolumesRoot), None);
    }
}

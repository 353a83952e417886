//! File operations module
//! Provides the single-slot clipboard and create, delete, rename, copy,
//! move, paste operations

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File operation errors
#[derive(Debug, Error)]
pub enum OpError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    #[error("Source no longer exists: {0}")]
    SourceMissing(PathBuf),

    #[error("Already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Target name is already taken: {0}")]
    TargetCollision(PathBuf),

    #[error("Source and destination are the same: {0}")]
    SelfTarget(PathBuf),

    #[error("Could not fully delete {dir} (stuck on {stuck})")]
    PartialDelete { dir: PathBuf, stuck: PathBuf },

    #[error("Invalid name: {0}")]
    InvalidName(String),
}

pub type Result<T> = std::result::Result<T, OpError>;

/// Clipboard operation mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardMode {
    Copy,
    Move,
}

/// Pending clipboard content, at most one source at a time
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ClipboardState {
    #[default]
    Empty,
    Pending {
        source: PathBuf,
        mode: ClipboardMode,
    },
}

/// Single-slot clipboard. Staging a new source replaces any prior one
/// without warning; `take` is a destructive read so a staged source can be
/// consumed by at most one paste.
#[derive(Debug, Default)]
pub struct Clipboard {
    state: ClipboardState,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_copy_source(&mut self, source: PathBuf) {
        tracing::debug!("Clipboard: copy {}", source.display());
        self.state = ClipboardState::Pending {
            source,
            mode: ClipboardMode::Copy,
        };
    }

    pub fn set_move_source(&mut self, source: PathBuf) {
        tracing::debug!("Clipboard: move {}", source.display());
        self.state = ClipboardState::Pending {
            source,
            mode: ClipboardMode::Move,
        };
    }

    /// Take the current state, leaving the clipboard empty
    pub fn take(&mut self) -> ClipboardState {
        std::mem::take(&mut self.state)
    }

    pub fn is_empty(&self) -> bool {
        self.state == ClipboardState::Empty
    }
}

/// Outcome of a paste attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    /// Clipboard was empty, nothing happened
    NoOp,
    Pasted { dest: PathBuf, mode: ClipboardMode },
}

/// Create a folder named `name` inside `parent`. Never overwrites.
pub fn create_folder(parent: &Path, name: &str) -> Result<PathBuf> {
    validate_name(name)?;

    if !parent.is_dir() {
        return Err(OpError::NotADirectory(parent.to_path_buf()));
    }

    let path = parent.join(name);
    if path.exists() {
        return Err(OpError::AlreadyExists(path));
    }

    match fs::create_dir(&path) {
        Ok(()) => {
            tracing::info!("Created directory: {}", path.display());
            Ok(path)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(OpError::AlreadyExists(path))
        }
        Err(e) => Err(e.into()),
    }
}

/// Rename `old_name` to `new_name` within `dir`.
///
/// Collisions are rejected with `TargetCollision`, never resolved by the
/// platform's overwrite-on-rename behavior. The pre-check leaves a race
/// window, so a raced `AlreadyExists` from the rename itself is mapped to
/// the same error.
pub fn rename_entry(dir: &Path, old_name: &str, new_name: &str) -> Result<PathBuf> {
    validate_name(new_name)?;

    let from = dir.join(old_name);
    if !from.exists() {
        return Err(OpError::SourceMissing(from));
    }

    let to = dir.join(new_name);
    if to.exists() {
        return Err(OpError::TargetCollision(to));
    }

    match fs::rename(&from, &to) {
        Ok(()) => {
            tracing::info!("Renamed: {} -> {}", from.display(), to.display());
            Ok(to)
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            Err(OpError::TargetCollision(to))
        }
        Err(e) => Err(e.into()),
    }
}

/// Delete a file or directory. Directory deletion is best-effort recursive:
/// a stuck child does not abort its siblings, but the whole deletion is
/// reported as `PartialDelete` if the top-level directory survives.
pub fn delete_entry(path: &Path) -> Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(m) => m,
        Err(_) => return Err(OpError::NotFound(path.to_path_buf())),
    };

    if metadata.is_dir() {
        delete_dir_tree(path)?;
    } else {
        fs::remove_file(path)?;
    }

    tracing::info!("Deleted: {}", path.display());
    Ok(())
}

/// Iterative post-order delete over an explicit worklist. Children are
/// removed before their parent, so `remove_dir` only ever sees directories
/// the walk has already emptied. No recursion, deep trees cannot overflow
/// the stack.
fn delete_dir_tree(root: &Path) -> Result<()> {
    let mut dirs: Vec<PathBuf> = vec![root.to_path_buf()];
    let mut stuck: Option<PathBuf> = None;

    let mut i = 0;
    while i < dirs.len() {
        let read = match fs::read_dir(&dirs[i]) {
            Ok(r) => r,
            Err(_) => {
                let unreadable = dirs[i].clone();
                stuck.get_or_insert(unreadable);
                i += 1;
                continue;
            }
        };

        for entry in read {
            let entry = match entry {
                Ok(e) => e,
                Err(_) => continue,
            };

            let child = entry.path();
            // DirEntry::file_type does not follow symlinks; a symlink to a
            // directory is unlinked, not descended into
            let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

            if is_dir {
                dirs.push(child);
            } else if let Err(e) = fs::remove_file(&child) {
                tracing::warn!("Could not delete {}: {}", child.display(), e);
                stuck.get_or_insert(child);
            }
        }

        i += 1;
    }

    for dir in dirs.iter().rev() {
        if let Err(e) = fs::remove_dir(dir) {
            if dir.exists() {
                tracing::warn!("Could not remove {}: {}", dir.display(), e);
                stuck.get_or_insert_with(|| dir.clone());
            }
        }
    }

    if root.exists() {
        return Err(OpError::PartialDelete {
            dir: root.to_path_buf(),
            stuck: stuck.unwrap_or_else(|| root.to_path_buf()),
        });
    }

    Ok(())
}

/// Paste a staged clipboard state into `dest_dir`.
///
/// The destination keeps the source's base name. An existing entry of that
/// name is overwritten unconditionally. Pasting a path onto itself, or a
/// directory into its own subtree, is rejected with `SelfTarget`.
pub fn paste(state: ClipboardState, dest_dir: &Path) -> Result<PasteOutcome> {
    let ClipboardState::Pending { source, mode } = state else {
        return Ok(PasteOutcome::NoOp);
    };

    if !source.exists() {
        return Err(OpError::SourceMissing(source));
    }

    if !dest_dir.is_dir() {
        return Err(OpError::NotADirectory(dest_dir.to_path_buf()));
    }

    let file_name = source
        .file_name()
        .ok_or_else(|| OpError::InvalidName(source.display().to_string()))?;
    let dest = dest_dir.join(file_name);

    if dest == source || (source.is_dir() && dest_dir.starts_with(&source)) {
        return Err(OpError::SelfTarget(source));
    }

    if dest.exists() {
        remove_existing(&dest)?;
    }

    match mode {
        ClipboardMode::Copy => {
            if source.is_dir() {
                copy_dir_recursive(&source, &dest)?;
            } else {
                fs::copy(&source, &dest)?;
            }
            tracing::info!("Copied: {} -> {}", source.display(), dest.display());
        }
        ClipboardMode::Move => {
            move_entry(&source, &dest)?;
        }
    }

    Ok(PasteOutcome::Pasted { dest, mode })
}

/// Move via rename, falling back to copy+delete across filesystems
fn move_entry(source: &Path, dest: &Path) -> Result<()> {
    match fs::rename(source, dest) {
        Ok(()) => {
            tracing::info!("Moved: {} -> {}", source.display(), dest.display());
            Ok(())
        }
        Err(e) => {
            // Unix: EXDEV = 18, Windows: ERROR_NOT_SAME_DEVICE = 17
            let is_cross_device = match e.raw_os_error() {
                Some(18) => cfg!(unix),
                Some(17) => cfg!(windows),
                _ => false,
            };

            if !is_cross_device {
                return Err(e.into());
            }

            tracing::info!(
                "Cross-filesystem move, using copy+delete: {} -> {}",
                source.display(),
                dest.display()
            );

            if source.is_dir() {
                copy_dir_recursive(source, dest)?;
                delete_dir_tree(source)?;
            } else {
                fs::copy(source, dest)?;
                fs::remove_file(source)?;
            }

            tracing::info!(
                "Moved (copy+delete): {} -> {}",
                source.display(),
                dest.display()
            );
            Ok(())
        }
    }
}

/// Recursively copy a directory
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    if !dst.exists() {
        fs::create_dir_all(dst)?;
    }

    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }

    Ok(())
}

/// Remove whatever currently occupies `path` so a paste can overwrite it
fn remove_existing(path: &Path) -> Result<()> {
    if path.is_dir() {
        delete_dir_tree(path)
    } else {
        fs::remove_file(path).map_err(OpError::from)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
    {
        return Err(OpError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Open a file with the default external application
pub fn open_external(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(OpError::NotFound(path.to_path_buf()));
    }

    open::that(path)?;

    tracing::info!("Opened externally: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clipboard_take_is_destructive() {
        let mut clipboard = Clipboard::new();
        clipboard.set_copy_source(PathBuf::from("/tmp/x"));

        assert!(matches!(
            clipboard.take(),
            ClipboardState::Pending {
                mode: ClipboardMode::Copy,
                ..
            }
        ));
        assert_eq!(clipboard.take(), ClipboardState::Empty);
    }

    #[test]
    fn test_clipboard_last_writer_wins() {
        let mut clipboard = Clipboard::new();
        clipboard.set_copy_source(PathBuf::from("/tmp/x"));
        clipboard.set_move_source(PathBuf::from("/tmp/y"));

        match clipboard.take() {
            ClipboardState::Pending { source, mode } => {
                assert_eq!(source, PathBuf::from("/tmp/y"));
                assert_eq!(mode, ClipboardMode::Move);
            }
            other => panic!("unexpected state: {:?}", other),
        }
    }

    #[test]
    fn test_create_folder() {
        let dir = tempfile::tempdir().unwrap();

        let created = create_folder(dir.path(), "New Folder").unwrap();
        assert!(created.is_dir());

        assert!(matches!(
            create_folder(dir.path(), "New Folder"),
            Err(OpError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_create_folder_invalid_parent() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            create_folder(&missing, "sub"),
            Err(OpError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_create_folder_bad_name() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            create_folder(dir.path(), "a/b"),
            Err(OpError::InvalidName(_))
        ));
        assert!(matches!(
            create_folder(dir.path(), ""),
            Err(OpError::InvalidName(_))
        ));
    }

    #[test]
    fn test_rename() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("from.txt"), b"data").unwrap();

        let to = rename_entry(dir.path(), "from.txt", "to.txt").unwrap();
        assert!(!dir.path().join("from.txt").exists());
        assert!(to.exists());
    }

    #[test]
    fn test_rename_source_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            rename_entry(dir.path(), "ghost.txt", "to.txt"),
            Err(OpError::SourceMissing(_))
        ));
    }

    #[test]
    fn test_rename_rejects_collision() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), b"a").unwrap();
        fs::write(dir.path().join("b.txt"), b"b").unwrap();

        assert!(matches!(
            rename_entry(dir.path(), "a.txt", "b.txt"),
            Err(OpError::TargetCollision(_))
        ));
        // Collision target keeps its content
        assert_eq!(fs::read(dir.path().join("b.txt")).unwrap(), b"b");
    }

    #[test]
    fn test_delete_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("doomed.txt");
        fs::write(&file, b"x").unwrap();

        delete_entry(&file).unwrap();
        assert!(!file.exists());
    }

    #[test]
    fn test_delete_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            delete_entry(&dir.path().join("ghost")),
            Err(OpError::NotFound(_))
        ));
    }

    #[test]
    fn test_delete_recursive() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("tree");
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::write(root.join("top.txt"), b"1").unwrap();
        fs::write(root.join("a/mid.txt"), b"2").unwrap();
        fs::write(root.join("a/b/c/leaf.txt"), b"3").unwrap();

        delete_entry(&root).unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn test_paste_empty_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            paste(ClipboardState::Empty, dir.path()).unwrap(),
            PasteOutcome::NoOp
        );
    }

    #[test]
    fn test_paste_copy_preserves_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("report.txt");
        fs::write(&source, b"report").unwrap();
        let archive = dir.path().join("archive");
        fs::create_dir(&archive).unwrap();

        let outcome = paste(
            ClipboardState::Pending {
                source: source.clone(),
                mode: ClipboardMode::Copy,
            },
            &archive,
        )
        .unwrap();

        assert_eq!(
            outcome,
            PasteOutcome::Pasted {
                dest: archive.join("report.txt"),
                mode: ClipboardMode::Copy,
            }
        );
        assert!(source.exists());
        assert_eq!(fs::read(archive.join("report.txt")).unwrap(), b"report");
    }

    #[test]
    fn test_paste_move_consumes_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("report.txt");
        fs::write(&source, b"report").unwrap();
        let archive = dir.path().join("archive");
        fs::create_dir(&archive).unwrap();

        paste(
            ClipboardState::Pending {
                source: source.clone(),
                mode: ClipboardMode::Move,
            },
            &archive,
        )
        .unwrap();

        assert!(!source.exists());
        assert!(archive.join("report.txt").exists());
    }

    #[test]
    fn test_paste_overwrites_destination() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("data.txt");
        fs::write(&source, b"new").unwrap();
        let target_dir = dir.path().join("target");
        fs::create_dir(&target_dir).unwrap();
        fs::write(target_dir.join("data.txt"), b"old").unwrap();

        paste(
            ClipboardState::Pending {
                source,
                mode: ClipboardMode::Copy,
            },
            &target_dir,
        )
        .unwrap();

        assert_eq!(fs::read(target_dir.join("data.txt")).unwrap(), b"new");
    }

    #[test]
    fn test_paste_copies_directory_tree() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("photos");
        fs::create_dir_all(source.join("2024")).unwrap();
        fs::write(source.join("2024/a.jpg"), b"jpeg").unwrap();
        let target_dir = dir.path().join("backup");
        fs::create_dir(&target_dir).unwrap();

        paste(
            ClipboardState::Pending {
                source: source.clone(),
                mode: ClipboardMode::Copy,
            },
            &target_dir,
        )
        .unwrap();

        assert!(source.join("2024/a.jpg").exists());
        assert!(target_dir.join("photos/2024/a.jpg").exists());
    }

    #[test]
    fn test_paste_source_missing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            paste(
                ClipboardState::Pending {
                    source: dir.path().join("ghost.txt"),
                    mode: ClipboardMode::Copy,
                },
                dir.path(),
            ),
            Err(OpError::SourceMissing(_))
        ));
    }

    #[test]
    fn test_paste_invalid_destination() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("a.txt");
        fs::write(&source, b"a").unwrap();

        assert!(matches!(
            paste(
                ClipboardState::Pending {
                    source,
                    mode: ClipboardMode::Copy,
                },
                &dir.path().join("missing"),
            ),
            Err(OpError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_paste_onto_itself_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("same.txt");
        fs::write(&source, b"x").unwrap();

        assert!(matches!(
            paste(
                ClipboardState::Pending {
                    source: source.clone(),
                    mode: ClipboardMode::Copy,
                },
                dir.path(),
            ),
            Err(OpError::SelfTarget(_))
        ));
        assert!(source.exists());
    }

    #[test]
    fn test_paste_dir_into_own_subtree_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("outer");
        fs::create_dir_all(source.join("inner")).unwrap();

        assert!(matches!(
            paste(
                ClipboardState::Pending {
                    source: source.clone(),
                    mode: ClipboardMode::Copy,
                },
                &source.join("inner"),
            ),
            Err(OpError::SelfTarget(_))
        ));
    }
}

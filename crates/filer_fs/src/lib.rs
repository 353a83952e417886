//! QuickFiler File System Layer
//!
//! Provides the filesystem-facing half of the engine:
//! - Directory browsing (immediate children, fresh snapshot per call)
//! - Storage volume enumeration with capacity metadata
//! - The single-slot copy/move clipboard
//! - File operations: create, delete, rename, copy, move, paste

mod browser;
mod ops;
mod volumes;

pub use browser::{get_parent, is_root, list_directory, EntryKind, FileEntry};
pub use ops::{
    create_folder, delete_entry, open_external, paste, rename_entry, Clipboard, ClipboardMode,
    ClipboardState, OpError, PasteOutcome,
};
pub use volumes::{format_size, list_volumes, Volume};

use thiserror::Error;

/// File system errors
#[derive(Error, Debug)]
pub enum FsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Path not found: {0}")]
    NotFound(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

pub type Result<T> = std::result::Result<T, FsError>;

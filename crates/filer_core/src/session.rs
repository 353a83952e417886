//! Navigation session
//!
//! Composes path resolution, the clipboard, and file operations into the
//! engine the shell talks to. The session is an explicit object owned by
//! the caller, lives for one run, and is single-threaded; every operation
//! blocks until the filesystem call completes.

use crate::error::AppError;
use crate::navigation::{parent_of, resolve, Listing, Location};
use filer_fs::{Clipboard, ClipboardMode, PasteOutcome, Volume};
use std::path::PathBuf;

pub struct FilerSession {
    location: Location,
    /// Last location that resolved successfully; `back()` from a dead-end
    /// invalid directory recovers here
    last_good: Location,
    clipboard: Clipboard,
}

impl FilerSession {
    /// Start a session at the caller-supplied directory (typically home)
    pub fn new(start_dir: PathBuf) -> Self {
        let location = Location::Directory(start_dir);
        let last_good = if Self::resolvable(&location) {
            location.clone()
        } else {
            Location::VolumesRoot
        };

        Self {
            location,
            last_good,
            clipboard: Clipboard::new(),
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn clipboard(&self) -> &Clipboard {
        &self.clipboard
    }

    /// Resolve the current location, fresh snapshot every call
    pub fn listing(&self) -> Listing {
        resolve(&self.location)
    }

    /// Move to a location. A location that does not resolve becomes the
    /// current dead-end; `last_good` keeps the recovery point for `back()`.
    pub fn navigate(&mut self, location: Location) -> Listing {
        self.location = location;
        let listing = resolve(&self.location);
        if !listing.is_invalid() {
            self.last_good = self.location.clone();
        }
        listing
    }

    /// Enter a child directory by name. Entering a file is not a navigation
    /// transition; the listing is returned unchanged and opening is the
    /// shell's job.
    pub fn enter(&mut self, name: &str) -> Listing {
        if name.is_empty() {
            return self.listing();
        }
        if let Location::Directory(path) = &self.location {
            let child = path.join(name);
            if child.is_dir() {
                return self.navigate(Location::Directory(child));
            }
        }
        self.listing()
    }

    /// Go up one level. From a volume root this lands on the volumes view;
    /// from the volumes view it is a no-op. From an invalid dead-end it
    /// recovers to the last known-good location.
    pub fn back(&mut self) -> Listing {
        if !Self::resolvable(&self.location) {
            self.location = self.last_good.clone();
            return self.listing();
        }

        match parent_of(&self.location) {
            Some(parent) => self.navigate(parent),
            None => self.listing(),
        }
    }

    /// Enter a volume from the volumes view
    pub fn select_volume(&mut self, volume: &Volume) -> Listing {
        self.navigate(Location::Directory(volume.root_path.clone()))
    }

    /// Stage an entry of the current directory for a copy-paste
    pub fn copy(&mut self, name: &str) -> Result<(), AppError> {
        let source = self.entry_path(name)?;
        self.clipboard.set_copy_source(source);
        Ok(())
    }

    /// Stage an entry of the current directory for a move-paste
    pub fn cut(&mut self, name: &str) -> Result<(), AppError> {
        let source = self.entry_path(name)?;
        self.clipboard.set_move_source(source);
        Ok(())
    }

    /// Paste the staged source into the current directory.
    ///
    /// The clipboard is consumed up front, so it is cleared whether or not
    /// the paste goes through. A move follows the item to its destination;
    /// a copy stays where it is.
    pub fn paste(&mut self) -> Result<(PasteOutcome, Listing), AppError> {
        let state = self.clipboard.take();

        let dest_dir = match &self.location {
            Location::Directory(path) if path.is_dir() => path.clone(),
            _ => return Err(AppError::NoCurrentDirectory),
        };

        let outcome = filer_fs::paste(state, &dest_dir)?;

        let listing = match &outcome {
            PasteOutcome::Pasted {
                mode: ClipboardMode::Move,
                ..
            } => self.navigate(Location::Directory(dest_dir)),
            _ => self.listing(),
        };

        Ok((outcome, listing))
    }

    /// Delete an entry of the current directory (recursive for directories)
    pub fn delete(&mut self, name: &str) -> Result<Listing, AppError> {
        let path = self.entry_path(name)?;
        filer_fs::delete_entry(&path)?;
        Ok(self.listing())
    }

    /// Create a folder in the current directory
    pub fn create_folder(&mut self, name: &str) -> Result<Listing, AppError> {
        let dir = self.current_dir()?;
        filer_fs::create_folder(&dir, name)?;
        Ok(self.listing())
    }

    /// Rename an entry of the current directory
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<Listing, AppError> {
        let dir = self.current_dir()?;
        filer_fs::rename_entry(&dir, old_name, new_name)?;
        Ok(self.listing())
    }

    /// Open an entry with the default external application
    pub fn open(&self, name: &str) -> Result<(), AppError> {
        let path = self.entry_path(name)?;
        filer_fs::open_external(&path)?;
        Ok(())
    }

    /// Absolute path of a named entry in the current directory. An empty
    /// name would alias the directory itself, so it is rejected.
    fn entry_path(&self, name: &str) -> Result<PathBuf, AppError> {
        if name.is_empty() || name == "." || name == ".." {
            return Err(filer_fs::OpError::InvalidName(name.to_string()).into());
        }
        Ok(self.current_dir()?.join(name))
    }

    fn current_dir(&self) -> Result<PathBuf, AppError> {
        match &self.location {
            Location::Directory(path) if path.is_dir() => Ok(path.clone()),
            _ => Err(AppError::NoCurrentDirectory),
        }
    }

    fn resolvable(location: &Location) -> bool {
        match location {
            Location::VolumesRoot => true,
            Location::Directory(path) => path.is_dir(),
        }
    }
}

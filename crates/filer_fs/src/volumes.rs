//! Storage volume enumeration with capacity metadata

use std::path::{Path, PathBuf};

/// A storage volume snapshot taken at enumeration time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
    pub root_path: PathBuf,
    pub free_bytes: u64,
    pub total_bytes: u64,
}

impl Volume {
    fn probe<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        let (free_bytes, total_bytes) = disk_space(root);
        Self {
            root_path: root.to_path_buf(),
            free_bytes,
            total_bytes,
        }
    }

    /// Label for display, e.g. `C:\ (120.00 GB free of 500.00 GB)`
    pub fn display_label(&self) -> String {
        format!(
            "{} ({} free of {})",
            self.root_path.display(),
            format_size(self.free_bytes),
            format_size(self.total_bytes)
        )
    }
}

/// List available volumes in whatever order the host OS surfaces them.
///
/// Never fails; a volume whose capacity cannot be probed reports zeroes.
/// Re-queried on every call, no caching.
#[cfg(windows)]
pub fn list_volumes() -> Vec<Volume> {
    let mut volumes = Vec::new();

    for letter in b'A'..=b'Z' {
        let drive = format!("{}:\\", letter as char);
        let path = Path::new(&drive);
        if path.exists() {
            volumes.push(Volume::probe(path));
        }
    }

    volumes
}

#[cfg(not(windows))]
pub fn list_volumes() -> Vec<Volume> {
    vec![Volume::probe("/")]
}

/// (free, total) in bytes; (0, 0) when the probe fails
#[cfg(windows)]
fn disk_space(root: &Path) -> (u64, u64) {
    use std::os::windows::ffi::OsStrExt;
    use windows::core::PCWSTR;
    use windows::Win32::Storage::FileSystem::GetDiskFreeSpaceExW;

    let wide: Vec<u16> = root
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    let mut free = 0u64;
    let mut total = 0u64;

    match unsafe {
        GetDiskFreeSpaceExW(
            PCWSTR(wide.as_ptr()),
            Some(&mut free),
            Some(&mut total),
            None,
        )
    } {
        Ok(()) => (free, total),
        Err(e) => {
            tracing::debug!("GetDiskFreeSpaceExW failed for {}: {}", root.display(), e);
            (0, 0)
        }
    }
}

#[cfg(unix)]
fn disk_space(root: &Path) -> (u64, u64) {
    use std::ffi::CString;
    use std::mem::MaybeUninit;
    use std::os::unix::ffi::OsStrExt;

    let c_path = match CString::new(root.as_os_str().as_bytes()) {
        Ok(p) => p,
        Err(_) => return (0, 0),
    };

    let mut stat: MaybeUninit<libc::statvfs> = MaybeUninit::uninit();
    // SAFETY: statvfs is a standard POSIX function, c_path is valid
    let result = unsafe { libc::statvfs(c_path.as_ptr(), stat.as_mut_ptr()) };
    if result != 0 {
        tracing::debug!("statvfs failed for {}", root.display());
        return (0, 0);
    }

    // SAFETY: statvfs succeeded, stat is initialized
    let stat = unsafe { stat.assume_init() };
    let frsize = stat.f_frsize as u64;
    (
        stat.f_bavail as u64 * frsize,
        stat.f_blocks as u64 * frsize,
    )
}

/// Human-readable byte count, e.g. `1.50 MB`
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    format!("{:.2} {}", size, UNITS[unit])
}

//! Application error types

use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Recoverable Errors (report to user, continue) =====
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Fs(#[from] filer_fs::FsError),

    #[error(transparent)]
    Op(#[from] filer_fs::OpError),

    #[error("No directory is being browsed")]
    NoCurrentDirectory,

    // ===== Fatal Errors (application termination) =====
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Is this error recoverable?
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, AppError::Config(_))
    }

    /// Get a user-friendly message
    pub fn user_message(&self) -> String {
        use filer_fs::OpError;

        match self {
            AppError::Op(OpError::NotFound(p)) => format!("Not found: {}", p.display()),
            AppError::Op(OpError::SourceMissing(p)) => {
                format!("Source no longer exists: {}", p.display())
            }
            AppError::Op(OpError::AlreadyExists(p)) => {
                format!("Already exists: {}", p.display())
            }
            AppError::Op(OpError::TargetCollision(p)) => {
                format!("Name already taken: {}", p.display())
            }
            AppError::Op(OpError::PartialDelete { dir, stuck }) => format!(
                "Could not fully delete {} (stuck on {})",
                dir.display(),
                stuck.display()
            ),
            AppError::NoCurrentDirectory => {
                "This operation needs an open directory".to_string()
            }
            _ => self.to_string(),
        }
    }
}

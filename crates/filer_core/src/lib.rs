//! QuickFiler Core Domain Logic
//!
//! This crate contains:
//! - Location and listing model
//! - Path resolution (including the volumes pseudo-root)
//! - The navigation session (state machine + clipboard + operations)
//! - Configuration
//! - Error types

pub mod config;
pub mod error;
pub mod navigation;
pub mod session;

pub use config::{AppConfig, FilerConfig, GeneralConfig};
pub use error::AppError;
pub use navigation::{parent_of, resolve, Listing, Location};
pub use session::FilerSession;

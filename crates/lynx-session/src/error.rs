//! Session error types
//!
//! Engine-boundary failures are recoverable and leave the session at its
//! last known-good state; tab-store errors signal a programming defect in
//! the caller (an id not taken from the current snapshot). Nothing here
//! is fatal to the process.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Failed to create tab: {0}")]
    TabCreationFailed(String),

    #[error("Failed to close tab: {0}")]
    TabCloseFailed(String),

    #[error("Navigation failed: {0}")]
    NavigationFailed(String),

    #[error("No active tab")]
    NoActiveTab,

    #[error("Tab error: {0}")]
    Tab(#[from] lynx_tabs::TabError),
}

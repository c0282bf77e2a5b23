//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Tab error: {0}")]
    Tab(#[from] lynx_tabs::TabError),

    #[error("Session error: {0}")]
    Session(#[from] lynx_session::SessionError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] lynx_navigation::NavigationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

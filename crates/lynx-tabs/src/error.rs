//! Tab error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    UnknownId(String),

    #[error("Tab id already in use: {0}")]
    DuplicateId(String),
}

//! Lynx Tab Management
//!
//! Holds the ordered tab collection and the active-tab invariant:
//! exactly one tab is active whenever the collection is non-empty.
//! All transitions here are pure in-memory state changes; talking to
//! the rendering engine is the session layer's job.

mod error;
mod store;
mod tab;

pub use error::TabError;
pub use store::TabStore;
pub use tab::{Tab, TabUpdate};

pub type Result<T> = std::result::Result<T, TabError>;

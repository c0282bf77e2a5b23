//! Lynx Session Management
//!
//! Owns the asynchronous boundary with the rendering engine: UI intents
//! go out as engine commands, engine outcomes and push events fold back
//! into the tab store, and the UI re-renders from a read-only snapshot.
//!
//! The controller never trusts itself over the engine: a tab exists only
//! once the engine created it, and it is removed only once the engine
//! confirmed the close.

mod controller;
mod engine;
mod error;
mod session;

pub use controller::SessionController;
pub use engine::{Engine, EngineError, EngineResult, TabDescriptor, TabUpdateEvent};
pub use error::SessionError;
pub use session::{SessionConfig, SessionSnapshot};

pub type Result<T> = std::result::Result<T, SessionError>;

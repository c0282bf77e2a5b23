//! Rendering engine boundary
//!
//! The engine loads and displays pages; this layer only mirrors its
//! state. Commands are request/response and may suspend the caller;
//! updates are pushed over a channel obtained once per session via
//! [`Engine::subscribe`] and released when the receiver is dropped.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

/// Minimal identity returned when the engine creates a tab.
///
/// The id is authoritative: the shell never mints tab ids itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabDescriptor {
    pub id: String,
    pub url: String,
}

/// Pushed whenever the engine's notion of a tab changes, including as a
/// result of loads the shell never asked for (link clicks, redirects).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabUpdateEvent {
    pub tab_id: String,
    pub title: String,
    pub url: String,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

/// Opaque engine-side failure; converted into the session error taxonomy
/// at each command call site, never propagated raw.
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct EngineError(pub String);

pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Commands understood by the rendering engine.
///
/// Callers stay generic over the engine, so test doubles slot in without
/// dynamic dispatch. All commands may fail with an [`EngineError`].
#[allow(async_fn_in_trait)]
pub trait Engine {
    /// Create a new browsing context; the returned descriptor carries the
    /// engine-assigned id and the initial URL.
    async fn create_tab(&self) -> EngineResult<TabDescriptor>;

    /// Destroy a browsing context.
    async fn close_tab(&self, tab_id: &str) -> EngineResult<()>;

    /// Load `url` in the given tab.
    async fn navigate_to(&self, tab_id: &str, url: &str) -> EngineResult<()>;

    /// Step back in the tab's history.
    async fn go_back(&self, tab_id: &str) -> EngineResult<()>;

    /// Step forward in the tab's history.
    async fn go_forward(&self, tab_id: &str) -> EngineResult<()>;

    /// Long-lived update-event subscription, obtained once per session.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<TabUpdateEvent>;
}

//! Lynx Core
//!
//! Entry point for the Lynx browser shell's state layer. The shell owns
//! all tab/session state; the rendering engine behind the
//! [`Engine`] trait is a stateless collaborator that loads pages and
//! reports back.

mod error;

pub use error::CoreError;

// Re-export core components
pub use lynx_navigation::{normalize_url, InputResolver, NavigationError, Resolution, HOME_URL};
pub use lynx_session::{
    Engine, EngineError, SessionConfig, SessionController, SessionError, SessionSnapshot,
    TabDescriptor, TabUpdateEvent,
};
pub use lynx_tabs::{Tab, TabError, TabStore, TabUpdate};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Start a session against `engine`: subscribes to its update events and
/// opens the initial tab.
pub async fn start_session<E: Engine>(
    engine: E,
    config: SessionConfig,
) -> Result<SessionController<E>> {
    Ok(SessionController::start(engine, config).await?)
}

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}

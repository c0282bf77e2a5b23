//! Session controller
//!
//! Translates UI intents into engine commands and folds the outcomes,
//! plus the engine's push events, into the tab store. The engine is the
//! sole authority for titles, URLs and history flags; the store is only
//! ever mutated from confirmed engine results.
//!
//! The state lock is never held across an `.await`, so navigations on
//! different tabs can be in flight at the same time.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tokio::sync::mpsc;

use lynx_navigation::{normalize_url, InputResolver, Resolution};
use lynx_tabs::{Tab, TabUpdate};

use crate::engine::{Engine, TabUpdateEvent};
use crate::error::SessionError;
use crate::session::{SessionConfig, SessionSnapshot, SessionState};
use crate::Result;

pub struct SessionController<E: Engine> {
    engine: E,
    state: Arc<RwLock<SessionState>>,
    /// Update-event subscription, held for the session's lifetime and
    /// released when the controller is dropped
    events: Mutex<mpsc::UnboundedReceiver<TabUpdateEvent>>,
    resolver: InputResolver,
    home_url: String,
}

impl<E: Engine> SessionController<E> {
    /// Start a session: subscribe to engine updates, then open the one
    /// initial tab.
    pub async fn start(engine: E, config: SessionConfig) -> Result<Self> {
        let events = Mutex::new(engine.subscribe());

        let controller = Self {
            engine,
            state: Arc::new(RwLock::new(SessionState::default())),
            events,
            resolver: InputResolver::with_search_engine(config.search_engine),
            home_url: config.home_url,
        };

        controller.new_tab().await?;

        tracing::info!("Session started");

        Ok(controller)
    }

    /// Open a new tab via the engine and activate it.
    ///
    /// Returns the engine-assigned tab id. On engine failure the session
    /// is unchanged.
    pub async fn new_tab(&self) -> Result<String> {
        let descriptor = self.engine.create_tab().await.map_err(|e| {
            tracing::warn!(error = %e, "Tab creation failed");
            SessionError::TabCreationFailed(e.to_string())
        })?;

        let mut state = self.state.write();
        let tab = Tab::new(descriptor.id.clone(), descriptor.url);
        log_defect(state.store.add_tab(tab))?;
        state.mirror_current_url();

        tracing::info!(tab_id = %descriptor.id, "Created new tab");

        Ok(descriptor.id)
    }

    /// Close a tab. The store entry is removed only after the engine
    /// confirms; on failure the tab stays so shell and engine state
    /// cannot diverge.
    pub async fn close_tab(&self, tab_id: &str) -> Result<()> {
        self.engine.close_tab(tab_id).await.map_err(|e| {
            tracing::warn!(tab_id = %tab_id, error = %e, "Tab close failed");
            SessionError::TabCloseFailed(e.to_string())
        })?;

        let mut state = self.state.write();
        // A navigation still in flight for this tab is abandoned; its
        // eventual completion no longer matches and gets discarded.
        state.pending.remove(tab_id);
        log_defect(state.store.remove_tab(tab_id))?;
        state.mirror_current_url();

        tracing::info!(tab_id = %tab_id, "Closed tab");

        Ok(())
    }

    /// Navigate a tab to raw address-bar input.
    ///
    /// A second call on the same tab supersedes the first: whichever
    /// command's marker is still current when its engine call resolves
    /// gets to commit, the other result is discarded. On failure the
    /// stored URL is untouched so the caller can revert the address bar.
    pub async fn navigate(&self, tab_id: &str, raw_input: &str) -> Result<()> {
        let url = normalize_url(raw_input)
            .map_err(|e| SessionError::NavigationFailed(e.to_string()))?;

        let seq = {
            let mut state = self.state.write();
            if state.store.get(tab_id).is_none() {
                return log_defect(Err(lynx_tabs::TabError::UnknownId(tab_id.to_string())));
            }
            state.begin_navigation(tab_id)
        };

        tracing::debug!(tab_id = %tab_id, url = %url, "Navigating");

        let outcome = self.engine.navigate_to(tab_id, &url).await;

        let mut state = self.state.write();
        if !state.finish_navigation(tab_id, seq) {
            tracing::debug!(tab_id = %tab_id, "Discarding superseded navigation result");
            return Ok(());
        }

        match outcome {
            Ok(()) => {
                state.store.apply_update(
                    tab_id,
                    &TabUpdate {
                        url: Some(url),
                        ..Default::default()
                    },
                );
                state.mirror_current_url();
                Ok(())
            }
            Err(e) => {
                tracing::warn!(tab_id = %tab_id, error = %e, "Navigation failed");
                Err(SessionError::NavigationFailed(e.to_string()))
            }
        }
    }

    /// Resolve address-bar input for the active tab: direct address or
    /// search query, then navigate either way.
    pub async fn interpret_input(&self, raw_input: &str) -> Result<()> {
        let active_id = self
            .state
            .read()
            .store
            .active_tab()
            .map(|t| t.id.clone())
            .ok_or(SessionError::NoActiveTab)?;

        let resolution = self
            .resolver
            .resolve(raw_input)
            .map_err(|e| SessionError::NavigationFailed(e.to_string()))?;

        if let Resolution::Search(url) = &resolution {
            tracing::debug!(url = %url, "Treating input as search query");
        }

        self.navigate(&active_id, resolution.url()).await
    }

    /// Switch the active tab and mirror its URL into the address bar.
    pub fn select_tab(&self, tab_id: &str) -> Result<()> {
        let mut state = self.state.write();
        log_defect(state.store.activate(tab_id))?;
        state.mirror_current_url();
        Ok(())
    }

    /// Step back in a tab's history. A no-op while the engine reports
    /// the affordance disabled; not an error.
    pub async fn go_back(&self, tab_id: &str) -> Result<()> {
        if !self.history_flag(tab_id, |t| t.can_go_back)? {
            return Ok(());
        }

        self.engine.go_back(tab_id).await.map_err(|e| {
            tracing::warn!(tab_id = %tab_id, error = %e, "Back navigation failed");
            SessionError::NavigationFailed(e.to_string())
        })
    }

    /// Step forward in a tab's history; same contract as [`go_back`].
    ///
    /// [`go_back`]: SessionController::go_back
    pub async fn go_forward(&self, tab_id: &str) -> Result<()> {
        if !self.history_flag(tab_id, |t| t.can_go_forward)? {
            return Ok(());
        }

        self.engine.go_forward(tab_id).await.map_err(|e| {
            tracing::warn!(tab_id = %tab_id, error = %e, "Forward navigation failed");
            SessionError::NavigationFailed(e.to_string())
        })
    }

    /// Re-issue the tab's current URL.
    pub async fn reload(&self, tab_id: &str) -> Result<()> {
        let url = {
            let state = self.state.read();
            match state.store.get(tab_id) {
                Some(tab) => tab.url.clone(),
                None => {
                    return log_defect(Err(lynx_tabs::TabError::UnknownId(tab_id.to_string())))
                }
            }
        };

        self.navigate(tab_id, &url).await
    }

    /// Navigate the tab home.
    pub async fn go_home(&self, tab_id: &str) -> Result<()> {
        let home = self.home_url.clone();
        self.navigate(tab_id, &home).await
    }

    /// Apply one pushed engine update. Unconditional and idempotent:
    /// duplicates re-apply the same fields, updates for closed tabs are
    /// dropped by the store.
    pub fn on_engine_update(&self, event: TabUpdateEvent) {
        let mut state = self.state.write();

        state.store.apply_update(
            &event.tab_id,
            &TabUpdate {
                title: Some(event.title),
                url: Some(event.url),
                can_go_back: Some(event.can_go_back),
                can_go_forward: Some(event.can_go_forward),
            },
        );

        // The event may have changed the active tab's URL (redirects,
        // in-page link clicks), so keep the address bar in step
        state.mirror_current_url();
    }

    /// Drain queued engine updates without blocking; the shell calls
    /// this before re-rendering. Returns the number applied.
    pub fn pump_events(&self) -> usize {
        let mut events = self.events.lock();
        let mut applied = 0;

        while let Ok(event) = events.try_recv() {
            self.on_engine_update(event);
            applied += 1;
        }

        applied
    }

    /// Read-only view for the UI layer.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.state.read())
    }

    fn history_flag(&self, tab_id: &str, flag: impl Fn(&Tab) -> bool) -> Result<bool> {
        let state = self.state.read();
        match state.store.get(tab_id) {
            Some(tab) => Ok(flag(tab)),
            None => log_defect(Err(lynx_tabs::TabError::UnknownId(tab_id.to_string()))),
        }
    }
}

impl<E: Engine> Drop for SessionController<E> {
    fn drop(&mut self) {
        // The event receiver goes down with us; the engine side observes
        // the channel close and stops pushing.
        tracing::debug!("Session torn down, engine subscription released");
    }
}

/// Tab-store failures mean the caller handed us an id that is not in the
/// current snapshot: a programming defect, logged, session unchanged.
fn log_defect<T>(result: lynx_tabs::Result<T>) -> Result<T> {
    result.map_err(|e| {
        tracing::error!(error = %e, "Tab state defect");
        SessionError::from(e)
    })
}

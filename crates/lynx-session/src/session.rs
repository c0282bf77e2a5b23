//! Session state and its UI-facing snapshot

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use lynx_navigation::HOME_URL;
use lynx_tabs::TabStore;

/// Session-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Search engine URL template (%s replaced with the encoded query)
    pub search_engine: String,
    /// Where new tabs and the home button go
    pub home_url: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search_engine: "https://duckduckgo.com/?q=%s".to_string(),
            home_url: HOME_URL.to_string(),
        }
    }
}

/// Mutable session state, guarded by the controller's lock.
#[derive(Debug, Default)]
pub(crate) struct SessionState {
    pub store: TabStore,
    /// Address-bar text, mirrored from the active tab's URL
    pub current_url: String,
    /// Per-tab marker for the navigation currently in flight. The value
    /// is a sequence number: a completion whose sequence no longer
    /// matches has been superseded and its result is discarded.
    pub pending: HashMap<String, u64>,
    next_nav_seq: u64,
}

impl SessionState {
    /// Mark a navigation in flight for `tab_id`, superseding any earlier
    /// one on the same tab. Returns the marker to match on completion.
    pub fn begin_navigation(&mut self, tab_id: &str) -> u64 {
        let seq = self.next_nav_seq;
        self.next_nav_seq += 1;
        self.pending.insert(tab_id.to_string(), seq);
        seq
    }

    /// Whether the navigation that produced `seq` is still the one in
    /// flight for `tab_id`; clears the marker when it is.
    pub fn finish_navigation(&mut self, tab_id: &str, seq: u64) -> bool {
        if self.pending.get(tab_id) == Some(&seq) {
            self.pending.remove(tab_id);
            true
        } else {
            false
        }
    }

    /// Re-derive the address-bar text from the active tab (empty for the
    /// empty session).
    pub fn mirror_current_url(&mut self) {
        self.current_url = self
            .store
            .active_tab()
            .map(|t| t.url.clone())
            .unwrap_or_default();
    }

    /// Session-wide loading flag: true while any tab is navigating, not
    /// necessarily the active one.
    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Read-only view of the session for the UI layer.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    /// Tabs in display order
    pub tabs: Vec<lynx_tabs::Tab>,
    /// Id of the active tab, absent for the empty session
    pub active_tab_id: Option<String>,
    /// Address-bar text
    pub current_url: String,
    /// True while any tab has a navigation in flight
    pub is_loading: bool,
}

impl SessionSnapshot {
    pub(crate) fn capture(state: &SessionState) -> Self {
        Self {
            tabs: state.store.tabs().to_vec(),
            active_tab_id: state.store.active_tab().map(|t| t.id.clone()),
            current_url: state.current_url.clone(),
            is_loading: state.is_loading(),
        }
    }

    /// JSON form for handing across the UI boundary
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supersede_discards_earlier_marker() {
        let mut state = SessionState::default();

        let first = state.begin_navigation("tab-1");
        let second = state.begin_navigation("tab-1");

        // First completion arrives late: superseded, marker stays put
        assert!(!state.finish_navigation("tab-1", first));
        assert!(state.is_loading());

        assert!(state.finish_navigation("tab-1", second));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_independent_tabs_track_separately() {
        let mut state = SessionState::default();

        let a = state.begin_navigation("tab-a");
        let b = state.begin_navigation("tab-b");

        assert!(state.finish_navigation("tab-a", a));
        assert!(state.is_loading());
        assert!(state.finish_navigation("tab-b", b));
        assert!(!state.is_loading());
    }

    #[test]
    fn test_close_cancels_pending() {
        let mut state = SessionState::default();

        let seq = state.begin_navigation("tab-1");
        state.pending.remove("tab-1");

        assert!(!state.finish_navigation("tab-1", seq));
    }
}

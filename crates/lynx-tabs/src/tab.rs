//! Tab data structure

use serde::{Deserialize, Serialize};

/// Title shown until the engine reports the real one.
pub const PLACEHOLDER_TITLE: &str = "New Tab";

/// One browsing context, mirrored from the rendering engine.
///
/// The engine is authoritative for every field except `is_active`,
/// which is shell-side state maintained by [`TabStore`](crate::TabStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// Engine-assigned identifier, immutable for the tab's lifetime
    pub id: String,
    /// Current URL; `about:blank` is the valid empty/home state
    pub url: String,
    /// Page title, placeholder until the engine reports one
    pub title: String,
    /// Whether the engine's history allows going back
    pub can_go_back: bool,
    /// Whether the engine's history allows going forward
    pub can_go_forward: bool,
    /// Exactly one tab in a non-empty session has this set
    pub is_active: bool,
}

impl Tab {
    /// A freshly created tab on the home page, before the engine has
    /// reported anything about it.
    pub fn new(id: String, url: String) -> Self {
        Self {
            id,
            url,
            title: PLACEHOLDER_TITLE.to_string(),
            can_go_back: false,
            can_go_forward: false,
            is_active: false,
        }
    }

    /// Display title with fallback to the URL
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.url
        } else {
            &self.title
        }
    }

    /// Merge engine-reported fields, last write wins per field.
    pub fn apply(&mut self, update: &TabUpdate) {
        if let Some(title) = &update.title {
            self.title = title.clone();
        }
        if let Some(url) = &update.url {
            self.url = url.clone();
        }
        if let Some(back) = update.can_go_back {
            self.can_go_back = back;
        }
        if let Some(forward) = update.can_go_forward {
            self.can_go_forward = forward;
        }
    }
}

/// Partial set of engine-reported fields to merge into a tab.
///
/// Every field is optional so duplicate or out-of-order delivery stays
/// idempotent: applying the same update twice yields the same tab.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabUpdate {
    pub title: Option<String>,
    pub url: Option<String>,
    pub can_go_back: Option<bool>,
    pub can_go_forward: Option<bool>,
}

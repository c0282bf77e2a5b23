//! Tab store
//!
//! Ordered tab collection with the active-tab invariant. Transitions
//! are pure and synchronous; the caller (session layer) decides when a
//! transition is allowed to happen based on engine command outcomes.

use crate::error::TabError;
use crate::tab::{Tab, TabUpdate};
use crate::Result;

/// Ordered collection of tabs.
///
/// Invariants maintained by every transition:
/// - exactly one tab is active while the store is non-empty, zero when empty
/// - tab ids are unique
#[derive(Debug, Clone, Default)]
pub struct TabStore {
    tabs: Vec<Tab>,
}

impl TabStore {
    pub fn new() -> Self {
        Self { tabs: Vec::new() }
    }

    /// Append a tab and make it the active one.
    ///
    /// Fails with [`TabError::DuplicateId`] if a tab with the same id is
    /// already present; ids are engine-assigned and never reused.
    pub fn add_tab(&mut self, mut tab: Tab) -> Result<()> {
        if self.tabs.iter().any(|t| t.id == tab.id) {
            return Err(TabError::DuplicateId(tab.id));
        }

        for existing in &mut self.tabs {
            existing.is_active = false;
        }
        tab.is_active = true;
        self.tabs.push(tab);

        Ok(())
    }

    /// Remove the tab with `id`.
    ///
    /// If the removed tab was active and tabs remain, activation moves to
    /// the rightmost remaining tab. Chosen over "previously active"
    /// heuristics for predictability.
    pub fn remove_tab(&mut self, id: &str) -> Result<()> {
        let index = self
            .tabs
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| TabError::UnknownId(id.to_string()))?;

        let removed = self.tabs.remove(index);

        if removed.is_active {
            if let Some(last) = self.tabs.last_mut() {
                last.is_active = true;
            }
        }

        Ok(())
    }

    /// Make exactly the tab with `id` active.
    pub fn activate(&mut self, id: &str) -> Result<()> {
        if !self.tabs.iter().any(|t| t.id == id) {
            return Err(TabError::UnknownId(id.to_string()));
        }

        for tab in &mut self.tabs {
            tab.is_active = tab.id == id;
        }

        Ok(())
    }

    /// Merge engine-reported fields into the tab with `id`.
    ///
    /// A no-op when the id is gone: engine events may race with a close
    /// the shell has already confirmed, and that is not an error.
    pub fn apply_update(&mut self, id: &str, update: &TabUpdate) {
        match self.tabs.iter_mut().find(|t| t.id == id) {
            Some(tab) => tab.apply(update),
            None => {
                tracing::debug!(tab_id = %id, "Dropping update for closed tab");
            }
        }
    }

    /// Tabs in display order
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn get(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }

    /// The active tab, absent only for the empty session
    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.is_active)
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn tab(id: &str) -> Tab {
        Tab::new(id.to_string(), "about:blank".to_string())
    }

    #[test]
    fn test_add_activates_new_tab() {
        let mut store = TabStore::new();
        store.add_tab(tab("a")).unwrap();
        store.add_tab(tab("b")).unwrap();

        assert_eq!(store.active_tab().unwrap().id, "b");
        assert!(!store.get("a").unwrap().is_active);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut store = TabStore::new();
        store.add_tab(tab("a")).unwrap();

        let result = store.add_tab(tab("a"));
        assert!(matches!(result, Err(TabError::DuplicateId(_))));
        // Store is unchanged
        assert_eq!(store.len(), 1);
        assert_eq!(store.active_tab().unwrap().id, "a");
    }

    #[test]
    fn test_remove_active_activates_rightmost() {
        let mut store = TabStore::new();
        store.add_tab(tab("a")).unwrap();
        store.add_tab(tab("b")).unwrap();
        store.add_tab(tab("c")).unwrap();
        store.activate("b").unwrap();

        store.remove_tab("b").unwrap();

        assert_eq!(store.active_tab().unwrap().id, "c");
    }

    #[test]
    fn test_remove_inactive_keeps_active() {
        let mut store = TabStore::new();
        store.add_tab(tab("a")).unwrap();
        store.add_tab(tab("b")).unwrap();
        store.activate("a").unwrap();

        store.remove_tab("b").unwrap();

        assert_eq!(store.active_tab().unwrap().id, "a");
    }

    #[test]
    fn test_remove_last_tab_leaves_empty_session() {
        let mut store = TabStore::new();
        store.add_tab(tab("a")).unwrap();
        store.remove_tab("a").unwrap();

        assert!(store.is_empty());
        assert!(store.active_tab().is_none());
    }

    #[test]
    fn test_activate_unknown_id() {
        let mut store = TabStore::new();
        store.add_tab(tab("a")).unwrap();

        assert!(matches!(
            store.activate("missing"),
            Err(TabError::UnknownId(_))
        ));
        // Failed activation leaves the session unchanged
        assert_eq!(store.active_tab().unwrap().id, "a");
    }

    #[test]
    fn test_apply_update_unknown_id_is_noop() {
        let mut store = TabStore::new();
        store.add_tab(tab("a")).unwrap();
        let before = store.tabs().to_vec();

        store.apply_update(
            "gone",
            &TabUpdate {
                title: Some("Late".to_string()),
                ..Default::default()
            },
        );

        assert_eq!(store.tabs(), before.as_slice());
    }

    #[derive(Debug, Clone)]
    enum StoreOp {
        Add(u8),
        Remove(usize),
        Activate(usize),
    }

    fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
        prop_oneof![
            any::<u8>().prop_map(StoreOp::Add),
            (0usize..16).prop_map(StoreOp::Remove),
            (0usize..16).prop_map(StoreOp::Activate),
        ]
    }

    fn apply_op(store: &mut TabStore, next_id: &mut u32, op: &StoreOp) {
        match op {
            StoreOp::Add(_) => {
                *next_id += 1;
                store.add_tab(tab(&format!("tab-{next_id}"))).unwrap();
            }
            StoreOp::Remove(index) => {
                if !store.is_empty() {
                    let id = store.tabs()[index % store.len()].id.clone();
                    store.remove_tab(&id).unwrap();
                }
            }
            StoreOp::Activate(index) => {
                if !store.is_empty() {
                    let id = store.tabs()[index % store.len()].id.clone();
                    store.activate(&id).unwrap();
                }
            }
        }
    }

    proptest! {
        /// Exactly one tab is active after every transition while the
        /// store is non-empty, and ids stay unique.
        #[test]
        fn prop_exactly_one_active(ops in proptest::collection::vec(store_op_strategy(), 0..64)) {
            let mut store = TabStore::new();
            let mut next_id = 0u32;

            for op in &ops {
                apply_op(&mut store, &mut next_id, op);

                let active = store.tabs().iter().filter(|t| t.is_active).count();
                if store.is_empty() {
                    prop_assert_eq!(active, 0);
                } else {
                    prop_assert_eq!(active, 1);
                }

                let mut ids: Vec<&str> = store.tabs().iter().map(|t| t.id.as_str()).collect();
                ids.sort_unstable();
                ids.dedup();
                prop_assert_eq!(ids.len(), store.len());
            }
        }
    }
}

//! UI preference store (theme + sidebar), persisted independently of the
//! session.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use crate::UI_STORAGE_KEY;
use crate::storage::StorageAdapter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UiSnapshot {
    theme: Theme,
    sidebar_collapsed: bool,
}

/// Theme and sidebar-collapse state. Applying the theme to the document is
/// the caller's concern; this store only owns the value.
#[derive(Clone)]
pub struct UiStore {
    state: Arc<RwLock<UiSnapshot>>,
    storage: Arc<dyn StorageAdapter>,
}

impl UiStore {
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        let snapshot = storage
            .get(UI_STORAGE_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        Self {
            state: Arc::new(RwLock::new(snapshot)),
            storage,
        }
    }

    pub fn theme(&self) -> Theme {
        self.state.read().map(|s| s.theme).unwrap_or_default()
    }

    pub fn toggle_theme(&self) -> Theme {
        self.mutate(|s| {
            s.theme = match s.theme {
                Theme::Light => Theme::Dark,
                Theme::Dark => Theme::Light,
            };
        });
        self.theme()
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.state
            .read()
            .map(|s| s.sidebar_collapsed)
            .unwrap_or(false)
    }

    pub fn toggle_sidebar(&self) {
        self.mutate(|s| s.sidebar_collapsed = !s.sidebar_collapsed);
    }

    pub fn set_sidebar_collapsed(&self, collapsed: bool) {
        self.mutate(|s| s.sidebar_collapsed = collapsed);
    }

    fn mutate(&self, apply: impl FnOnce(&mut UiSnapshot)) {
        let mut persisted = None;
        if let Ok(mut state) = self.state.write() {
            apply(&mut state);
            persisted = Some(state.clone());
        }
        if let Some(snapshot) = persisted {
            match serde_json::to_string(&snapshot) {
                Ok(raw) => self.storage.set(UI_STORAGE_KEY, &raw),
                Err(err) => tracing::warn!(%err, "failed to serialize ui snapshot"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn defaults_light_and_expanded() {
        let store = UiStore::new(Arc::new(MemoryStorage::new()));
        assert_eq!(store.theme(), Theme::Light);
        assert!(!store.sidebar_collapsed());
    }

    #[test]
    fn toggles_persist_across_rehydration() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let store = UiStore::new(storage.clone());
            assert_eq!(store.toggle_theme(), Theme::Dark);
            store.toggle_sidebar();
        }

        let rehydrated = UiStore::new(storage);
        assert_eq!(rehydrated.theme(), Theme::Dark);
        assert!(rehydrated.sidebar_collapsed());
    }

    #[test]
    fn set_sidebar_collapsed_is_absolute() {
        let store = UiStore::new(Arc::new(MemoryStorage::new()));
        store.set_sidebar_collapsed(true);
        store.set_sidebar_collapsed(true);
        assert!(store.sidebar_collapsed());
        store.set_sidebar_collapsed(false);
        assert!(!store.sidebar_collapsed());
    }
}

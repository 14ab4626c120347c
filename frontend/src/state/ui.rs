use leptos::*;
use serde::{Deserialize, Serialize};

use crate::utils::storage::{self, SharedStore};

pub const UI_STORAGE_KEY: &str = "expense-ui";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiPreferences {
    pub sidebar_collapsed: bool,
}

#[derive(Clone)]
pub struct UiState {
    pub prefs: RwSignal<UiPreferences>,
    store: SharedStore,
}

impl UiState {
    pub fn new(store: SharedStore) -> Self {
        let initial = storage::load_json::<UiPreferences>(store.as_ref(), UI_STORAGE_KEY)
            .unwrap_or_default();
        Self {
            prefs: create_rw_signal(initial),
            store,
        }
    }

    pub fn sidebar_collapsed(&self) -> bool {
        self.prefs.get().sidebar_collapsed
    }

    pub fn toggle_sidebar(&self) {
        self.prefs.update(|p| p.sidebar_collapsed = !p.sidebar_collapsed);
        self.persist();
    }

    fn persist(&self) {
        let prefs = self.prefs.get_untracked();
        if let Err(err) = storage::save_json(self.store.as_ref(), UI_STORAGE_KEY, &prefs) {
            log::warn!("failed to persist ui preferences: {}", err);
        }
    }
}

pub fn use_ui() -> UiState {
    match use_context::<UiState>() {
        Some(state) => state,
        None => {
            let state = UiState::new(storage::default_store());
            provide_context(state.clone());
            state
        }
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::test_support::ssr::with_runtime;
    use crate::utils::storage::{KeyValueStore, MemoryStorage};
    use std::rc::Rc;

    #[test]
    fn toggle_persists_and_rehydrates() {
        with_runtime(|| {
            let memory = MemoryStorage::new();
            let state = UiState::new(Rc::new(memory.clone()));
            assert!(!state.sidebar_collapsed());

            state.toggle_sidebar();
            assert!(state.sidebar_collapsed());
            assert_eq!(
                memory.get(UI_STORAGE_KEY).as_deref(),
                Some(r#"{"sidebarCollapsed":true}"#)
            );

            let reloaded = UiState::new(Rc::new(memory));
            assert!(reloaded.sidebar_collapsed());
        });
    }

    #[test]
    fn use_ui_provides_single_instance() {
        with_runtime(|| {
            let first = use_ui();
            first.toggle_sidebar();
            assert!(use_ui().sidebar_collapsed());
        });
    }
}

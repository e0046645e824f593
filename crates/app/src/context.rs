//! Application-wide context: one wired instance of every lower-crate
//! handle, plus the reactive mirrors components actually render from.
//!
//! The stores ([`SessionStore`], [`UiStore`]) own persistence but are not
//! reactive; the signals here are the render-facing copies and every write
//! goes through a method that updates both.

use std::sync::Arc;

use leptos::{
    RwSignal, SignalGet, SignalGetUntracked, SignalSet, create_rw_signal, expect_context,
    provide_context,
};

use ticketflow_client::{ApiClient, ReqwestTransport};
use ticketflow_core::{User, UserRole};
use ticketflow_query::QueryCache;
use ticketflow_state::{BrowserStorage, SessionStore, StorageAdapter, Theme, UiStore};

use crate::config;
use crate::notify::Toasts;
use crate::platform::{BrowserNavigator, apply_theme};

#[derive(Clone)]
pub struct AppContext {
    pub client: ApiClient,
    pub cache: QueryCache,
    pub session: SessionStore,
    pub ui: UiStore,
    pub toasts: Toasts,
    user: RwSignal<Option<User>>,
    theme: RwSignal<Theme>,
}

impl AppContext {
    /// Wire the production stack and rehydrate persisted state.
    pub fn init() -> Self {
        let storage: Arc<dyn StorageAdapter> = Arc::new(BrowserStorage::new());
        let client = ApiClient::new(
            config::api_base_url(),
            Arc::new(ReqwestTransport::new()),
            storage.clone(),
            Arc::new(BrowserNavigator),
        );
        let session = SessionStore::new(storage.clone());
        let ui = UiStore::new(storage);

        let user = create_rw_signal(session.current_user());
        let theme = create_rw_signal(ui.theme());
        apply_theme(theme.get_untracked());

        Self {
            client,
            cache: QueryCache::browser(),
            session,
            ui,
            toasts: Toasts::new(),
            user,
            theme,
        }
    }

    pub fn user(&self) -> RwSignal<Option<User>> {
        self.user
    }

    pub fn theme(&self) -> RwSignal<Theme> {
        self.theme
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.get().is_some()
    }

    pub fn has_role(&self, roles: &[UserRole]) -> bool {
        self.user
            .get()
            .map(|user| roles.contains(&user.role))
            .unwrap_or(false)
    }

    /// Record a login in the persistent store and the reactive mirror.
    pub fn sign_in(&self, user: User, access_token: String) {
        self.session.set_auth(user.clone(), access_token);
        self.user.set(Some(user));
    }

    /// Drop the session everywhere.
    pub fn sign_out(&self) {
        self.session.clear_auth();
        self.user.set(None);
    }

    pub fn toggle_theme(&self) {
        let theme = self.ui.toggle_theme();
        self.theme.set(theme);
        apply_theme(theme);
    }
}

pub fn provide_app_context() -> AppContext {
    let ctx = AppContext::init();
    provide_context(ctx.clone());
    ctx
}

/// Panics outside the component tree rooted at [`crate::app::App`].
pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}

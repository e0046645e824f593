//! Authenticated-session store.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};

use ticketflow_core::{User, UserRole};

use crate::storage::StorageAdapter;
use crate::{ACCESS_TOKEN_KEY, AUTH_STORAGE_KEY};

/// Persisted session snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionSnapshot {
    user: Option<User>,
    access_token: Option<String>,
    is_authenticated: bool,
}

/// Holds the current user and bearer token, mirrored into storage so the
/// session survives a reload. The raw token is additionally written under
/// its own key ([`ACCESS_TOKEN_KEY`]) because the HTTP client reads it
/// without a reference to this store.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<SessionSnapshot>>,
    storage: Arc<dyn StorageAdapter>,
}

impl SessionStore {
    /// Create the store, rehydrating any persisted snapshot.
    pub fn new(storage: Arc<dyn StorageAdapter>) -> Self {
        let snapshot = storage
            .get(AUTH_STORAGE_KEY)
            .and_then(|raw| match serde_json::from_str(&raw) {
                Ok(snapshot) => Some(snapshot),
                Err(err) => {
                    tracing::warn!(%err, "discarding corrupt session snapshot");
                    None
                }
            })
            .unwrap_or_default();

        Self {
            state: Arc::new(RwLock::new(snapshot)),
            storage,
        }
    }

    /// Record a successful authentication. Idempotent.
    pub fn set_auth(&self, user: User, access_token: String) {
        self.storage.set(ACCESS_TOKEN_KEY, &access_token);
        let snapshot = SessionSnapshot {
            user: Some(user),
            access_token: Some(access_token),
            is_authenticated: true,
        };
        self.persist(&snapshot);
        if let Ok(mut state) = self.state.write() {
            *state = snapshot;
        }
    }

    /// Drop the session. Idempotent.
    pub fn clear_auth(&self) {
        self.storage.remove(ACCESS_TOKEN_KEY);
        self.storage.remove(AUTH_STORAGE_KEY);
        if let Ok(mut state) = self.state.write() {
            *state = SessionSnapshot::default();
        }
    }

    /// Merge updated profile fields into the current user, if any.
    pub fn update_user(&self, apply: impl FnOnce(&mut User)) {
        let mut updated = None;
        if let Ok(mut state) = self.state.write() {
            if let Some(user) = state.user.as_mut() {
                apply(user);
                updated = Some(state.clone());
            }
        }
        if let Some(snapshot) = updated {
            self.persist(&snapshot);
        }
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.read().ok().and_then(|s| s.user.clone())
    }

    pub fn access_token(&self) -> Option<String> {
        self.state.read().ok().and_then(|s| s.access_token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read().map(|s| s.is_authenticated).unwrap_or(false)
    }

    /// True iff a user is set and their role is in `roles`.
    pub fn has_role(&self, roles: &[UserRole]) -> bool {
        self.current_user()
            .map(|user| roles.contains(&user.role))
            .unwrap_or(false)
    }

    fn persist(&self, snapshot: &SessionSnapshot) {
        match serde_json::to_string(snapshot) {
            Ok(raw) => self.storage.set(AUTH_STORAGE_KEY, &raw),
            Err(err) => tracing::warn!(%err, "failed to serialize session snapshot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::Utc;
    use ticketflow_core::UserStatus;

    fn user(role: UserRole) -> User {
        User {
            id: "u-1".to_owned(),
            name: "Alice".to_owned(),
            email: "alice@example.com".to_owned(),
            role,
            status: UserStatus::Active,
            avatar: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn starts_unauthenticated() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        assert!(!store.is_authenticated());
        assert!(store.current_user().is_none());
        assert!(!store.has_role(&[UserRole::Admin]));
    }

    #[test]
    fn set_auth_persists_token_and_snapshot() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());

        store.set_auth(user(UserRole::Agent), "tok-123".to_owned());

        assert!(store.is_authenticated());
        assert_eq!(storage.get(ACCESS_TOKEN_KEY).as_deref(), Some("tok-123"));
        assert!(storage.get(AUTH_STORAGE_KEY).is_some());
    }

    #[test]
    fn clear_auth_is_idempotent() {
        let storage = Arc::new(MemoryStorage::new());
        let store = SessionStore::new(storage.clone());
        store.set_auth(user(UserRole::User), "tok".to_owned());

        store.clear_auth();
        store.clear_auth();

        assert!(!store.is_authenticated());
        assert!(storage.get(ACCESS_TOKEN_KEY).is_none());
        assert!(storage.get(AUTH_STORAGE_KEY).is_none());
    }

    #[test]
    fn rehydrates_from_persisted_snapshot() {
        let storage = Arc::new(MemoryStorage::new());
        {
            let store = SessionStore::new(storage.clone());
            store.set_auth(user(UserRole::Admin), "tok".to_owned());
        }

        let rehydrated = SessionStore::new(storage);
        assert!(rehydrated.is_authenticated());
        assert_eq!(rehydrated.current_user().unwrap().id, "u-1");
        assert_eq!(rehydrated.access_token().as_deref(), Some("tok"));
    }

    #[test]
    fn corrupt_snapshot_is_discarded() {
        let storage = Arc::new(MemoryStorage::new());
        storage.set(AUTH_STORAGE_KEY, "{not json");

        let store = SessionStore::new(storage);
        assert!(!store.is_authenticated());
    }

    #[test]
    fn has_role_checks_membership() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        store.set_auth(user(UserRole::Agent), "tok".to_owned());

        assert!(store.has_role(&[UserRole::Agent]));
        assert!(store.has_role(&[UserRole::Admin, UserRole::Agent]));
        assert!(!store.has_role(&[UserRole::Admin]));
    }

    #[test]
    fn update_user_merges_fields() {
        let store = SessionStore::new(Arc::new(MemoryStorage::new()));
        store.set_auth(user(UserRole::User), "tok".to_owned());

        store.update_user(|u| u.name = "Alice B".to_owned());
        assert_eq!(store.current_user().unwrap().name, "Alice B");
    }
}

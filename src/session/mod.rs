pub mod store;

use crate::api::{ApiClient, ApiError};
use crate::models::{LoginRequest, SessionUser};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};

/// Store key holding the serialized session record
pub const SESSION_KEY: &str = "user";

/// The single signed-in user, if any.
///
/// Shared as `Arc<AuthSession>`. Only `login`, `logout` and the 401
/// interceptor write to it, and each write replaces the whole record.
pub struct AuthSession {
    store: Arc<dyn KeyValueStore>,
    user: RwLock<Option<SessionUser>>,
}

impl AuthSession {
    /// Rehydrates from the store. Unreadable or corrupt data is dropped
    /// and the session starts signed out.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let user = rehydrate(store.as_ref());
        Self {
            store,
            user: RwLock::new(user),
        }
    }

    /// Exchanges credentials for a token and persists the result. On any
    /// failure the previous state is kept and the error returned.
    pub async fn login(
        &self,
        api: &ApiClient,
        credentials: &LoginRequest,
    ) -> Result<SessionUser, ApiError> {
        let user = SessionUser::from(api.login(credentials).await?);

        let json = serde_json::to_string(&user)?;
        self.store.set(SESSION_KEY, &json)?;
        *self.user.write().unwrap_or_else(PoisonError::into_inner) = Some(user.clone());

        info!("Signed in as {} ({})", user.email, user.role.code());
        Ok(user)
    }

    /// Clears memory and storage. Storage errors are only logged.
    pub fn logout(&self) {
        if let Err(e) = self.store.remove(SESSION_KEY) {
            warn!("Failed to clear stored session: {}", e);
        }
        let previous = self.user.write().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(user) = previous {
            info!("Signed out {}", user.email);
        }
    }

    pub fn current(&self) -> Option<SessionUser> {
        self.user.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn token(&self) -> Option<String> {
        self.user
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|u| u.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}

fn rehydrate(store: &dyn KeyValueStore) -> Option<SessionUser> {
    let raw = match store.get(SESSION_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!("Error reading stored session: {}", e);
            discard(store);
            return None;
        }
    };

    match serde_json::from_str::<SessionUser>(&raw) {
        Ok(user) => {
            info!("Restored session for {}", user.email);
            Some(user)
        }
        Err(e) => {
            warn!("Error parsing stored user data: {}", e);
            discard(store);
            None
        }
    }
}

fn discard(store: &dyn KeyValueStore) {
    if let Err(e) = store.remove(SESSION_KEY) {
        warn!("Failed to discard stored session: {}", e);
    }
}

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};

use super::types::UserResponse;
use crate::utils::storage::{self, SharedStore};

pub const AUTH_STORAGE_KEY: &str = "expense-auth";

/// What survives a page reload: the signed-in user and their tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedAuth {
    pub user: Option<UserResponse>,
    pub token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub is_authenticated: bool,
}

#[derive(Clone)]
pub struct SessionStore {
    store: SharedStore,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(storage::default_store())
    }
}

impl SessionStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Returns the stored session, discarding it when the access token has
    /// expired and no refresh token can renew it.
    pub fn load(&self) -> Option<PersistedAuth> {
        let auth: PersistedAuth = storage::load_json(self.store.as_ref(), AUTH_STORAGE_KEY)?;
        let token = auth.token.as_deref()?;
        if !auth.is_authenticated {
            return None;
        }
        if token_expired(token, chrono::Utc::now().timestamp()) && auth.refresh_token.is_none() {
            log::info!("stored session expired");
            self.clear();
            return None;
        }
        Some(auth)
    }

    pub fn save(&self, auth: &PersistedAuth) {
        if let Err(err) = storage::save_json(self.store.as_ref(), AUTH_STORAGE_KEY, auth) {
            log::warn!("failed to persist session: {}", err);
        }
    }

    pub fn sign_in(&self, user: UserResponse, token: String, refresh_token: Option<String>) {
        self.save(&PersistedAuth {
            user: Some(user),
            token: Some(token),
            refresh_token,
            is_authenticated: true,
        });
    }

    pub fn update_user(&self, user: UserResponse) {
        if let Some(mut auth) = self.load() {
            auth.user = Some(user);
            self.save(&auth);
        }
    }

    pub fn replace_tokens(&self, token: String, refresh_token: Option<String>) {
        if let Some(mut auth) = self.load() {
            auth.token = Some(token);
            if refresh_token.is_some() {
                auth.refresh_token = refresh_token;
            }
            self.save(&auth);
        }
    }

    pub fn clear(&self) {
        self.store.remove(AUTH_STORAGE_KEY);
    }

    pub fn token(&self) -> Option<String> {
        self.load().and_then(|auth| auth.token)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.load().and_then(|auth| auth.refresh_token)
    }

    pub fn user(&self) -> Option<UserResponse> {
        self.load().and_then(|auth| auth.user)
    }
}

#[derive(Deserialize)]
struct Claims {
    exp: Option<i64>,
}

/// Tokens that cannot be decoded are treated as opaque and never expire here;
/// the backend rejects them with 401 if they are stale.
pub fn token_expired(token: &str, now: i64) -> bool {
    let payload = match token.split('.').nth(1) {
        Some(p) => p,
        None => return false,
    };
    let decoded = match URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')) {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    match serde_json::from_slice::<Claims>(&decoded) {
        Ok(Claims { exp: Some(exp) }) => exp <= now,
        _ => false,
    }
}

#[cfg(test)]
pub(crate) fn encode_test_token(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"u1","exp":{}}}"#, exp));
    format!("{}.{}.sig", header, payload)
}

// SPDX-License-Identifier: MIT

//! Session resolution.
//!
//! The client owns the token: it generates a UUID locally, persists it,
//! and registers it with the API. If the persisted token turns out to be
//! unknown server-side (a wiped database, typically), the stale token is
//! discarded and a fresh one is minted, exactly once.

use uuid::Uuid;

use crate::client::api::ApiClient;
use crate::client::local::LocalStorage;
use crate::client::Result;
use crate::routes::session::SessionResponse;

pub struct SessionResolver<'a> {
    api: &'a ApiClient,
    storage: &'a LocalStorage,
}

impl<'a> SessionResolver<'a> {
    pub fn new(api: &'a ApiClient, storage: &'a LocalStorage) -> Self {
        Self { api, storage }
    }

    /// Resolve the session, creating one if needed.
    ///
    /// A persisted token is verified first, so the same storage always
    /// yields the same user. A token the server no longer knows is never
    /// re-registered: it is dropped and a fresh UUID is minted, exactly
    /// once.
    pub async fn get_or_create_session(&self) -> Result<SessionResponse> {
        if let Some(token) = self.storage.session_token() {
            self.api.set_session_token(Some(token));
            if let Some(session) = self.api.lookup_session().await? {
                return Ok(session);
            }
            tracing::warn!("Persisted session token unknown server-side, starting fresh");
        }

        let token = Uuid::new_v4().to_string();
        self.storage.set_session_token(&token)?;
        self.api.create_session(Some(&token)).await
    }

    /// The persisted token, if any.
    pub fn session_token(&self) -> Option<String> {
        self.storage.session_token()
    }

    /// Forget the local session. The server-side user is untouched.
    pub fn clear_session(&self) -> Result<()> {
        self.api.set_session_token(None);
        self.storage.clear_session_token()
    }
}

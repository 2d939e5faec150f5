// SPDX-License-Identifier: MIT

//! Thin HTTP client over the API.
//!
//! Holds the current session token and attaches it to every request via
//! the `x-session-token` header. Non-2xx responses are turned into
//! `ClientError::Api` with the server's `error` message when one is
//! present.

use reqwest::{Response, StatusCode};
use serde_json::json;
use std::sync::Mutex;

use crate::client::{ClientError, Result};
use crate::middleware::session::SESSION_HEADER;
use crate::models::entry::{DataEntry, DataEntryUpdate, NewDataEntry};
use crate::models::girl::{Girl, GirlUpdate, NewGirl};
use crate::models::leaderboard::{LeaderboardGroup, LeaderboardStats};
use crate::routes::leaderboards::{GroupResponse, JoinGroupResponse};
use crate::routes::session::SessionResponse;
use crate::routes::SuccessResponse;

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session_token: Mutex<Option<String>>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            session_token: Mutex::new(None),
        }
    }

    pub fn session_token(&self) -> Option<String> {
        self.session_token
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn set_session_token(&self, token: Option<String>) {
        *self
            .session_token
            .lock()
            .unwrap_or_else(|e| e.into_inner()) = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn with_token(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session_token() {
            Some(token) => builder.header(SESSION_HEADER, token),
            None => builder,
        }
    }

    /// Surface non-2xx responses as `ClientError::Api`.
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        #[derive(serde::Deserialize)]
        struct ErrorBody {
            error: String,
            details: Option<String>,
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.details.unwrap_or(body.error),
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    // ─── Session ─────────────────────────────────────────────────

    /// `POST /api/session`, optionally bringing a locally generated token.
    /// The returned token becomes the client's current session.
    pub async fn create_session(&self, token: Option<&str>) -> Result<SessionResponse> {
        let body = match token {
            Some(token) => json!({ "sessionToken": token }),
            None => json!({}),
        };

        let response = self
            .with_token(self.http.post(self.url("/api/session")))
            .json(&body)
            .send()
            .await?;
        let session: SessionResponse = Self::check(response).await?.json().await?;
        self.set_session_token(Some(session.session_token.clone()));
        Ok(session)
    }

    /// `GET /api/session`. Ok(None) when the current token is unknown.
    pub async fn lookup_session(&self) -> Result<Option<SessionResponse>> {
        let response = self
            .with_token(self.http.get(self.url("/api/session")))
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        let session = Self::check(response).await?.json().await?;
        Ok(Some(session))
    }

    // ─── Girls ───────────────────────────────────────────────────

    pub async fn girls(&self) -> Result<Vec<Girl>> {
        let response = self
            .with_token(self.http.get(self.url("/api/girls")))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_girl(&self, girl: &NewGirl) -> Result<Girl> {
        let response = self
            .with_token(self.http.post(self.url("/api/girls")))
            .json(girl)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn update_girl(&self, id: &str, update: &GirlUpdate) -> Result<Girl> {
        let response = self
            .with_token(self.http.put(self.url(&format!("/api/girls/{}", id))))
            .json(update)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn delete_girl(&self, id: &str) -> Result<bool> {
        let response = self
            .with_token(self.http.delete(self.url(&format!("/api/girls/{}", id))))
            .send()
            .await?;
        let body: SuccessResponse = Self::check(response).await?.json().await?;
        Ok(body.success)
    }

    // ─── Data Entries ────────────────────────────────────────────

    pub async fn data_entries(&self) -> Result<Vec<DataEntry>> {
        let response = self
            .with_token(self.http.get(self.url("/api/data-entries")))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_entry(&self, entry: &NewDataEntry) -> Result<DataEntry> {
        let response = self
            .with_token(self.http.post(self.url("/api/data-entries")))
            .json(entry)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn update_entry(&self, id: &str, update: &DataEntryUpdate) -> Result<DataEntry> {
        let response = self
            .with_token(
                self.http
                    .put(self.url(&format!("/api/data-entries/{}", id))),
            )
            .json(update)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn delete_entry(&self, id: &str) -> Result<bool> {
        let response = self
            .with_token(
                self.http
                    .delete(self.url(&format!("/api/data-entries/{}", id))),
            )
            .send()
            .await?;
        let body: SuccessResponse = Self::check(response).await?.json().await?;
        Ok(body.success)
    }

    // ─── Leaderboards ────────────────────────────────────────────

    pub async fn my_groups(&self) -> Result<Vec<LeaderboardGroup>> {
        let response = self
            .with_token(self.http.get(self.url("/api/leaderboards")))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn create_group(&self, name: &str) -> Result<LeaderboardGroup> {
        let response = self
            .with_token(self.http.post(self.url("/api/leaderboards")))
            .json(&json!({ "name": name }))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn join_group(
        &self,
        invite_token: &str,
        username: &str,
    ) -> Result<JoinGroupResponse> {
        let response = self
            .with_token(self.http.post(self.url("/api/leaderboards/join")))
            .json(&json!({ "inviteToken": invite_token, "username": username }))
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn group_members(&self, group_id: &str) -> Result<GroupResponse> {
        let response = self
            .with_token(
                self.http
                    .get(self.url(&format!("/api/leaderboards/{}", group_id))),
            )
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    pub async fn push_member_stats(
        &self,
        group_id: &str,
        stats: &LeaderboardStats,
    ) -> Result<bool> {
        let response = self
            .with_token(
                self.http
                    .put(self.url(&format!("/api/leaderboards/{}", group_id))),
            )
            .json(stats)
            .send()
            .await?;
        let body: SuccessResponse = Self::check(response).await?.json().await?;
        Ok(body.success)
    }
}

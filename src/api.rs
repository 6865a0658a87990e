// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Blocking client for the finance REST API.
//!
//! The client never reads ambient credentials: the caller hands it a
//! [`Session`] (or none) and it attaches that session's bearer token to every
//! resource request.

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::Config;
use crate::error::ApiError;
use crate::models::{Credentials, ProfileUpdate, Registration, Resource, User};
use crate::session::Session;
use crate::utils::http_client;

const REGISTER_PATH: &str = "/auth/register";
const LOGIN_PATH: &str = "/auth/login";
const PROFILE_PATH: &str = "/users/profile";

/// Reply of the auth and profile endpoints: the user plus, usually, a token.
#[derive(Debug, Deserialize)]
struct AuthReply {
    #[serde(rename = "_id", alias = "id", default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

impl AuthReply {
    fn user(self, path: &str) -> Result<(User, Option<String>), ApiError> {
        let id = self.id.filter(|s| !s.is_empty()).ok_or_else(|| ApiError::Decode {
            path: path.to_string(),
            reason: "reply carries no user id".into(),
        })?;
        let user = User {
            id,
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
        };
        Ok((user, self.token.filter(|t| !t.is_empty())))
    }
}

/// Pulls a human-readable message out of an error body.
fn server_message(body: &str) -> Option<String> {
    if let Ok(v) = serde_json::from_str::<Value>(body) {
        return v
            .get("message")
            .or_else(|| v.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string);
    }
    let body = body.trim();
    (!body.is_empty()).then(|| body.chars().take(200).collect())
}

pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(config: &Config, session: Option<Session>) -> Result<Self, ApiError> {
        Ok(Self {
            http: http_client(config.timeout_secs)?,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn set_session(&mut self, session: Option<Session>) {
        self.session = session;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, rb: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let session = self.session.as_ref().ok_or(ApiError::NotAuthenticated)?;
        Ok(rb.header(AUTHORIZATION, session.bearer()))
    }

    /// Sends the request and maps non-success statuses. A 401 on an
    /// authenticated request means the session is no longer valid.
    fn dispatch(&self, rb: RequestBuilder, path: &str, authed: bool) -> Result<Response, ApiError> {
        let resp = rb.send().inspect_err(|e| {
            tracing::warn!(path, error = %e, "request failed");
        })?;
        let status = resp.status();
        tracing::debug!(path, status = status.as_u16(), "api response");
        if authed && status == StatusCode::UNAUTHORIZED {
            tracing::warn!(path, "session rejected");
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let body = resp.text().unwrap_or_default();
            let message = server_message(&body).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
            tracing::warn!(path, status = status.as_u16(), %message, "request rejected");
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(resp)
    }

    fn read_json<T: DeserializeOwned>(resp: Response, path: &str) -> Result<T, ApiError> {
        let body = resp.text()?;
        serde_json::from_str(&body).map_err(|e| ApiError::Decode {
            path: path.to_string(),
            reason: e.to_string(),
        })
    }

    // ============= Auth =============

    fn authenticate<B: Serialize>(&mut self, path: &str, body: &B) -> Result<Session, ApiError> {
        tracing::debug!(path, "POST");
        let rb = self.http.post(self.url(path)).json(body);
        let resp = self.dispatch(rb, path, false)?;
        let (user, token) = Self::read_json::<AuthReply>(resp, path)?.user(path)?;
        let token = token.ok_or_else(|| ApiError::Decode {
            path: path.to_string(),
            reason: "reply carries no token".into(),
        })?;
        let session = Session::new(token, user);
        tracing::info!(user = %session.user.email, "authenticated");
        self.session = Some(session.clone());
        Ok(session)
    }

    pub fn register(&mut self, registration: &Registration) -> Result<Session, ApiError> {
        self.authenticate(REGISTER_PATH, registration)
    }

    pub fn login(&mut self, credentials: &Credentials) -> Result<Session, ApiError> {
        self.authenticate(LOGIN_PATH, credentials)
    }

    /// Drops the session held by this client and returns it.
    pub fn logout(&mut self) -> Option<Session> {
        self.session.take()
    }

    /// Updates the profile and returns the refreshed session. The existing
    /// token is kept unless the server issues a new one.
    pub fn update_profile(&mut self, update: &ProfileUpdate) -> Result<Session, ApiError> {
        tracing::debug!(path = PROFILE_PATH, "PUT");
        let rb = self.authorized(self.http.put(self.url(PROFILE_PATH)).json(update))?;
        let resp = self.dispatch(rb, PROFILE_PATH, true)?;
        let (user, token) = Self::read_json::<AuthReply>(resp, PROFILE_PATH)?.user(PROFILE_PATH)?;
        let token = match (token, self.session.as_ref()) {
            (Some(t), _) => t,
            (None, Some(s)) => s.token.clone(),
            (None, None) => return Err(ApiError::NotAuthenticated),
        };
        let session = Session::new(token, user);
        self.session = Some(session.clone());
        Ok(session)
    }

    // ============= Resources =============

    fn record_path<R: Resource>(id: &str) -> String {
        format!("{}/{}", R::PATH, id)
    }

    /// All records of `R` visible to the session's user.
    pub fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        tracing::debug!(path = R::PATH, "GET");
        let rb = self.authorized(self.http.get(self.url(R::PATH)))?;
        let resp = self.dispatch(rb, R::PATH, true)?;
        let wires: Vec<R::Wire> = Self::read_json(resp, R::PATH)?;
        let records = wires
            .into_iter()
            .map(R::from_wire)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(kind = R::KIND, count = records.len(), "records fetched");
        Ok(records)
    }

    pub fn create<R: Resource>(&self, draft: &R::Draft) -> Result<R, ApiError> {
        tracing::debug!(path = R::PATH, "POST");
        let rb = self.authorized(self.http.post(self.url(R::PATH)).json(draft))?;
        let resp = self.dispatch(rb, R::PATH, true)?;
        let record = R::from_wire(Self::read_json(resp, R::PATH)?)?;
        tracing::info!(kind = R::KIND, id = record.id(), "record created");
        Ok(record)
    }

    pub fn update<R: Resource>(&self, id: &str, draft: &R::Draft) -> Result<R, ApiError> {
        let path = Self::record_path::<R>(id);
        tracing::debug!(%path, "PUT");
        let rb = self.authorized(self.http.put(self.url(&path)).json(draft))?;
        let resp = self.dispatch(rb, &path, true)?;
        let record = R::from_wire(Self::read_json(resp, &path)?)?;
        tracing::info!(kind = R::KIND, id = record.id(), "record updated");
        Ok(record)
    }

    pub fn delete<R: Resource>(&self, id: &str) -> Result<(), ApiError> {
        let path = Self::record_path::<R>(id);
        tracing::debug!(%path, "DELETE");
        let rb = self.authorized(self.http.delete(self.url(&path)))?;
        self.dispatch(rb, &path, true)?;
        tracing::info!(kind = R::KIND, id, "record deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_prefers_message_field() {
        assert_eq!(
            server_message(r#"{"message":"Invalid credentials"}"#).as_deref(),
            Some("Invalid credentials")
        );
        assert_eq!(server_message("Bad Gateway").as_deref(), Some("Bad Gateway"));
        assert_eq!(server_message("   "), None);
    }

    #[test]
    fn base_url_drops_trailing_slash() {
        let cfg = Config {
            api_url: "http://localhost:5000/".into(),
            ..Config::default()
        };
        let api = ApiClient::new(&cfg, None).unwrap();
        assert_eq!(api.url("/goals"), "http://localhost:5000/goals");
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::User;

/// An authenticated user and the bearer token the API issued for them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// On-disk home of the current session between CLI invocations.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_location() -> Result<Self> {
        Ok(Self::at(crate::config::data_dir()?.join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the saved session. An unreadable file is discarded and treated
    /// as logged out.
    pub fn load(&self) -> Result<Option<Session>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Read session at {}", self.path.display()))?;
        match serde_json::from_str::<Session>(&data) {
            Ok(s) => Ok(Some(s)),
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "discarding unreadable session");
                self.clear()?;
                Ok(None)
            }
        }
    }

    /// Like [`load`](Self::load), but any failure is logged and read as
    /// logged out, so commands that need no session still run.
    pub fn load_or_logged_out(&self) -> Option<Session> {
        self.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, path = %self.path.display(), "could not read session");
            None
        })
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).context("Failed to create session dir")?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)
            .with_context(|| format!("Write session at {}", self.path.display()))?;
        tracing::info!(user = %session.user.email, "session saved");
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Remove session at {}", self.path.display()))?;
            tracing::info!("session cleared");
        }
        Ok(())
    }
}

// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::DEFAULT_RECENT_LIMIT;

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Pennywise", "pennywise"));

pub const DEFAULT_API_URL: &str = "https://pfm-backend-0qd8.onrender.com";
pub const ENV_API_URL: &str = "PENNYWISE_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub timeout_secs: u64,
    pub recent_limit: usize,
    pub currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            timeout_secs: 15,
            recent_limit: DEFAULT_RECENT_LIMIT,
            currency: "INR".into(),
        }
    }
}

impl Config {
    /// Reads `path`, falling back to defaults when it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("Read config at {}", path.display()))?;
        serde_json::from_str(&data).with_context(|| format!("Parse config at {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config dir")?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Write config at {}", path.display()))?;
        tracing::info!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Applies an API URL override such as the value of `PENNYWISE_API_URL`.
    pub fn with_api_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) {
            tracing::debug!(%url, "API url overridden from environment");
            self.api_url = url;
        }
        self
    }

    /// Config from the platform config dir plus environment overrides.
    pub fn resolve() -> Result<Self> {
        let cfg = Self::load_from(&config_path()?)?;
        Ok(cfg.with_api_override(std::env::var(ENV_API_URL).ok()))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific app dirs")
}

pub fn config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.json"))
}

/// Platform data dir. Not created here; writers create it on first save.
pub fn data_dir() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().to_path_buf())
}

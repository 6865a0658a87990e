// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Record id used in validation errors for input that has not been saved yet.
pub const UNSAVED: &str = "(new)";

/// A record (or draft) failed shape or business-rule validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field} on {record}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub record: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: &'static str, record: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field,
            record: record.into(),
            reason: reason.into(),
        }
    }

    pub fn unsaved(field: &'static str, reason: impl Into<String>) -> Self {
        Self::new(field, UNSAVED, reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

/// Failures talking to the remote finance API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("not logged in; run `pennywise auth login` first")]
    NotAuthenticated,
    #[error("session rejected by the server; please log in again")]
    Unauthorized,
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response from {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

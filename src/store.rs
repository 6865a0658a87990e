// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Cached record lists with explicit refresh.
//!
//! A [`RecordSet`] only talks to the API when asked to. After a successful
//! create/update/delete it patches its local copy the same way a fresh
//! `refresh()` would, so callers need not refetch after every write.

use chrono::{DateTime, Utc};

use crate::api::ApiClient;
use crate::engine::{self, Dashboard};
use crate::error::ApiError;
use crate::models::{Budget, Expense, Goal, Income, Resource};

#[derive(Debug, Clone)]
pub struct RecordSet<R> {
    items: Vec<R>,
}

impl<R> Default for RecordSet<R> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<R: Resource> RecordSet<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<R>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&R> {
        self.items.iter().find(|r| r.id() == id)
    }

    /// Replaces the local copy with the server's current list. On failure the
    /// previous items are kept.
    pub fn refresh(&mut self, api: &ApiClient) -> Result<&[R], ApiError> {
        self.items = api.list::<R>()?;
        tracing::debug!(kind = R::KIND, count = self.items.len(), "refreshed");
        Ok(&self.items)
    }

    pub fn add(&mut self, api: &ApiClient, draft: &R::Draft) -> Result<&R, ApiError> {
        let created = api.create::<R>(draft)?;
        self.items.push(created);
        let last = self.items.len() - 1;
        Ok(&self.items[last])
    }

    pub fn update(&mut self, api: &ApiClient, id: &str, draft: &R::Draft) -> Result<R, ApiError> {
        let updated = api.update::<R>(id, draft)?;
        for item in self.items.iter_mut().filter(|r| r.id() == id) {
            *item = updated.clone();
        }
        Ok(updated)
    }

    pub fn remove(&mut self, api: &ApiClient, id: &str) -> Result<(), ApiError> {
        api.delete::<R>(id)?;
        self.items.retain(|r| r.id() != id);
        Ok(())
    }
}

/// The four record collections a user owns.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub incomes: RecordSet<Income>,
    pub expenses: RecordSet<Expense>,
    pub budgets: RecordSet<Budget>,
    pub goals: RecordSet<Goal>,
}

impl Snapshot {
    pub fn fetch(api: &ApiClient) -> Result<Self, ApiError> {
        let mut snap = Self::default();
        snap.refresh(api)?;
        Ok(snap)
    }

    pub fn refresh(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        self.incomes.refresh(api)?;
        self.expenses.refresh(api)?;
        self.budgets.refresh(api)?;
        self.goals.refresh(api)?;
        Ok(())
    }

    pub fn dashboard(&self, now: DateTime<Utc>, recent_limit: usize) -> Dashboard {
        engine::dashboard(
            self.incomes.items(),
            self.expenses.items(),
            self.budgets.items(),
            self.goals.items(),
            now,
            recent_limit,
        )
    }
}

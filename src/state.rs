// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::storage::WhitelistDatabase;

/// Shared handler state.
///
/// Holds the process-wide store handle. It is opened once in `main`, cloned
/// cheaply into every request, and closed when the last clone is dropped.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<WhitelistDatabase>,
}

impl AppState {
    pub fn new(db: WhitelistDatabase) -> Self {
        Self { db: Arc::new(db) }
    }
}

#[cfg(test)]
impl AppState {
    /// State backed by a throwaway database. Keep the returned directory
    /// alive for as long as the state is used.
    pub fn for_tests() -> (Self, tempfile::TempDir) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let db = WhitelistDatabase::open(&dir.path().join("whitelist.redb"))
            .expect("open test database");
        (Self::new(db), dir)
    }
}

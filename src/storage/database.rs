// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Embedded record store backed by redb (pure Rust, ACID).
//!
//! ## Table Layout
//!
//! - `whitelist_entries`: lowercase address → serialized WhitelistEntry
//! - `users`: lowercase address → serialized User
//!
//! redb runs one write transaction at a time, so the existence check and
//! the put inside [`WhitelistDatabase::insert_whitelist_entry`] and
//! [`WhitelistDatabase::insert_user`] cannot interleave with another insert.
//! That makes the table key the uniqueness constraint for concurrent
//! submissions.

use std::path::Path;

use redb::{
    Database, ReadableDatabase, ReadableTable, ReadableTableMetadata, TableDefinition,
};

use crate::models::{address_key, User, WhitelistEntry};

// =============================================================================
// Table Definitions
// =============================================================================

/// Whitelist signups: lowercase address → WhitelistEntry (JSON bytes).
const WHITELIST_ENTRIES: TableDefinition<&str, &[u8]> = TableDefinition::new("whitelist_entries");

/// Users: lowercase address → User (JSON bytes).
const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

// =============================================================================
// Error Type
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("redb error: {0}")]
    Redb(#[from] redb::Error),

    #[error("redb database error: {0}")]
    RedbDatabase(#[from] redb::DatabaseError),

    #[error("redb transaction error: {0}")]
    RedbTransaction(#[from] redb::TransactionError),

    #[error("redb table error: {0}")]
    RedbTable(#[from] redb::TableError),

    #[error("redb storage error: {0}")]
    RedbStorage(#[from] redb::StorageError),

    #[error("redb commit error: {0}")]
    RedbCommit(#[from] redb::CommitError),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("could not create data directory: {0}")]
    Io(#[from] std::io::Error),

    /// A record already exists under this address key.
    #[error("duplicate key: {0}")]
    Duplicate(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// One page of a key-ordered whitelist scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhitelistPage {
    pub entries: Vec<WhitelistEntry>,
    /// Key of the last entry returned; `None` once the scan is exhausted.
    pub next_cursor: Option<String>,
}

// =============================================================================
// WhitelistDatabase
// =============================================================================

/// Embedded ACID store for whitelist entries and users.
pub struct WhitelistDatabase {
    db: Database,
}

impl WhitelistDatabase {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let db = Database::create(path)?;

        // Pre-create all tables so later read transactions don't fail
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(WHITELIST_ENTRIES)?;
            let _ = write_txn.open_table(USERS)?;
        }
        write_txn.commit()?;

        Ok(Self { db })
    }

    // =========================================================================
    // Whitelist entries
    // =========================================================================

    /// Look up a whitelist entry by address (case-insensitive).
    pub fn get_whitelist_entry(&self, address: &str) -> StoreResult<Option<WhitelistEntry>> {
        let key = address_key(address);
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(WHITELIST_ENTRIES)?;
        match table.get(key.as_str())? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Insert a whitelist entry unless one already exists for its address.
    ///
    /// Fails with [`StoreError::Duplicate`] and writes nothing on conflict.
    pub fn insert_whitelist_entry(&self, entry: &WhitelistEntry) -> StoreResult<()> {
        let key = address_key(&entry.address);
        let json = serde_json::to_vec(entry)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(WHITELIST_ENTRIES)?;
            if table.get(key.as_str())?.is_some() {
                return Err(StoreError::Duplicate(entry.address.clone()));
            }
            table.insert(key.as_str(), json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Key-ordered page of whitelist entries starting after `cursor`.
    ///
    /// Pass the previous page's `next_cursor` to continue. A `limit` of zero
    /// is treated as one.
    pub fn list_whitelist_page(
        &self,
        cursor: Option<&str>,
        limit: usize,
    ) -> StoreResult<WhitelistPage> {
        let limit = limit.max(1);
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(WHITELIST_ENTRIES)?;

        let range = match cursor {
            Some(after) => table.range(after..)?,
            None => table.iter()?,
        };

        let mut entries = Vec::with_capacity(limit);
        let mut last_key: Option<String> = None;

        for item in range {
            let (key, value) = item?;
            // The range is inclusive of the cursor key itself
            if cursor == Some(key.value()) {
                continue;
            }

            let entry: WhitelistEntry = serde_json::from_slice(value.value())?;
            entries.push(entry);
            last_key = Some(key.value().to_string());

            if entries.len() >= limit {
                break;
            }
        }

        let next_cursor = if entries.len() >= limit { last_key } else { None };

        Ok(WhitelistPage {
            entries,
            next_cursor,
        })
    }

    pub fn count_whitelist_entries(&self) -> StoreResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(WHITELIST_ENTRIES)?;
        Ok(table.len()?)
    }

    // =========================================================================
    // Users
    // =========================================================================

    /// Look up a user by address (case-insensitive).
    pub fn get_user(&self, address: &str) -> StoreResult<Option<User>> {
        let key = address_key(address);
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(USERS)?;
        match table.get(key.as_str())? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Insert a user unless one already exists for its address.
    pub fn insert_user(&self, user: &User) -> StoreResult<()> {
        let key = address_key(&user.address);
        let json = serde_json::to_vec(user)?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(USERS)?;
            if table.get(key.as_str())?.is_some() {
                return Err(StoreError::Duplicate(user.address.clone()));
            }
            table.insert(key.as_str(), json.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub fn count_users(&self) -> StoreResult<u64> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(USERS)?;
        Ok(table.len()?)
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Confirm the store can serve a read transaction.
    pub fn check_health(&self) -> StoreResult<()> {
        let read_txn = self.db.begin_read()?;
        let _ = read_txn.open_table(WHITELIST_ENTRIES)?;
        let _ = read_txn.open_table(USERS)?;
        Ok(())
    }
}

#[cfg(test)]
impl WhitelistDatabase {
    /// Write raw bytes under a whitelist key, bypassing serialization.
    pub(crate) fn put_raw_whitelist_value(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(WHITELIST_ENTRIES)?;
            table.insert(key, value)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    pub(crate) fn remove_whitelist_key(&self, key: &str) -> StoreResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(WHITELIST_ENTRIES)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

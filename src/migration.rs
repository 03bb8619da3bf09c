// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Whitelist → User Migration
//!
//! Promotes every whitelist entry to a user record keyed by the same
//! address. Entries are scanned page by page in key order, so memory use is
//! bounded by the page size regardless of table size.
//!
//! The run is idempotent: addresses that already have a user are counted
//! and skipped, and a user insert that loses a race with another writer is
//! treated the same way. Re-running after a full or partial run converges
//! on one user per whitelisted address.
//!
//! Any other store error aborts the remaining batch and is returned to the
//! caller.

use crate::models::User;
use crate::storage::{StoreError, StoreResult, WhitelistDatabase};

/// Outcome of a migration run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationReport {
    /// Whitelist entries visited.
    pub scanned: u64,
    /// Users created during this run.
    pub created: u64,
    /// Entries whose address already had a user.
    pub existing: u64,
}

/// Per-entry result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    Created,
    AlreadyExists,
}

/// Ensure a user exists for `address`.
pub fn ensure_user(db: &WhitelistDatabase, address: &str) -> StoreResult<EntryOutcome> {
    if db.get_user(address)?.is_some() {
        return Ok(EntryOutcome::AlreadyExists);
    }

    match db.insert_user(&User::new(address)) {
        Ok(()) => Ok(EntryOutcome::Created),
        Err(StoreError::Duplicate(_)) => Ok(EntryOutcome::AlreadyExists),
        Err(e) => Err(e),
    }
}

/// Create a user for every whitelist entry that does not have one yet.
pub fn migrate_whitelist_to_users(
    db: &WhitelistDatabase,
    page_size: usize,
) -> StoreResult<MigrationReport> {
    let total = db.count_whitelist_entries()?;
    tracing::info!(
        entries = total,
        page_size,
        "Starting migration of whitelist entries to users"
    );

    let mut report = MigrationReport::default();
    let mut cursor: Option<String> = None;

    loop {
        let page = db.list_whitelist_page(cursor.as_deref(), page_size)?;

        for entry in &page.entries {
            report.scanned += 1;
            match ensure_user(db, &entry.address)? {
                EntryOutcome::Created => {
                    report.created += 1;
                    tracing::info!(address = %entry.address, "Created new user");
                }
                EntryOutcome::AlreadyExists => {
                    report.existing += 1;
                    tracing::info!(address = %entry.address, "User already exists");
                }
            }
        }

        match page.next_cursor {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    tracing::info!(
        scanned = report.scanned,
        created = report.created,
        existing = report.existing,
        "Migration completed successfully"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SubmitWhitelistRequest, WhitelistEntry};

    fn temp_db() -> (WhitelistDatabase, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let db = WhitelistDatabase::open(&dir.path().join("migrate.redb")).unwrap();
        (db, dir)
    }

    fn seed_whitelist(db: &WhitelistDatabase, n: usize) {
        for i in 0..n {
            let entry = WhitelistEntry::from_submission(
                SubmitWhitelistRequest::default(),
                format!("0x{i:040x}"),
            );
            db.insert_whitelist_entry(&entry).unwrap();
        }
    }

    #[test]
    fn second_run_creates_nothing() {
        let (db, _dir) = temp_db();
        seed_whitelist(&db, 7);

        let first = migrate_whitelist_to_users(&db, 3).unwrap();
        assert_eq!(
            first,
            MigrationReport {
                scanned: 7,
                created: 7,
                existing: 0
            }
        );
        assert_eq!(db.count_users().unwrap(), 7);

        let second = migrate_whitelist_to_users(&db, 3).unwrap();
        assert_eq!(
            second,
            MigrationReport {
                scanned: 7,
                created: 0,
                existing: 7
            }
        );
        assert_eq!(db.count_users().unwrap(), 7);
    }

    #[test]
    fn resumes_after_partial_run() {
        let (db, _dir) = temp_db();
        seed_whitelist(&db, 4);

        // Simulate a run that stopped after two entries
        ensure_user(&db, &format!("0x{:040x}", 0)).unwrap();
        ensure_user(&db, &format!("0x{:040x}", 1)).unwrap();

        let report = migrate_whitelist_to_users(&db, 100).unwrap();
        assert_eq!(report.created, 2);
        assert_eq!(report.existing, 2);
        assert_eq!(db.count_users().unwrap(), 4);
    }

    #[test]
    fn existing_user_with_different_case_is_reused() {
        let (db, _dir) = temp_db();
        let entry = WhitelistEntry::from_submission(
            SubmitWhitelistRequest::default(),
            "0xABCDEF0123456789ABCDEF0123456789ABCDEF01".to_string(),
        );
        db.insert_whitelist_entry(&entry).unwrap();
        db.insert_user(&User::new("0xabcdef0123456789abcdef0123456789abcdef01"))
            .unwrap();

        let report = migrate_whitelist_to_users(&db, 10).unwrap();
        assert_eq!(report.existing, 1);
        assert_eq!(db.count_users().unwrap(), 1);
    }

    #[test]
    fn store_error_aborts_remaining_batch() {
        let (db, _dir) = temp_db();
        let key = |i: usize| format!("0x{i:040x}");
        for i in [0, 1, 3, 4] {
            let entry =
                WhitelistEntry::from_submission(SubmitWhitelistRequest::default(), key(i));
            db.insert_whitelist_entry(&entry).unwrap();
        }
        db.put_raw_whitelist_value(&key(2), b"{corrupt").unwrap();

        let err = migrate_whitelist_to_users(&db, 1).unwrap_err();
        assert!(matches!(err, StoreError::Serde(_)));

        // Rows before the bad one were migrated, rows after it were not
        assert!(db.get_user(&key(0)).unwrap().is_some());
        assert!(db.get_user(&key(1)).unwrap().is_some());
        assert!(db.get_user(&key(3)).unwrap().is_none());
        assert!(db.get_user(&key(4)).unwrap().is_none());
        assert_eq!(db.count_users().unwrap(), 2);

        db.remove_whitelist_key(&key(2)).unwrap();
        let report = migrate_whitelist_to_users(&db, 1).unwrap();
        assert_eq!(
            report,
            MigrationReport {
                scanned: 4,
                created: 2,
                existing: 2
            }
        );
        assert_eq!(db.count_users().unwrap(), 4);
    }

    #[test]
    fn empty_whitelist_is_a_no_op() {
        let (db, _dir) = temp_db();
        let report = migrate_whitelist_to_users(&db, 10).unwrap();
        assert_eq!(report, MigrationReport::default());
        assert_eq!(db.count_users().unwrap(), 0);
    }

    #[test]
    fn page_size_equal_to_table_size_terminates() {
        let (db, _dir) = temp_db();
        seed_whitelist(&db, 5);
        let report = migrate_whitelist_to_users(&db, 5).unwrap();
        assert_eq!(report.scanned, 5);
        assert_eq!(report.created, 5);
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! One-shot migration: create a user for every whitelisted address.
//!
//! Takes no arguments; reads the same environment as the server. Exits
//! non-zero if the run does not complete.

use std::process::ExitCode;

use bao_whitelist_server::{
    config::Config, logging::init_tracing, migration::migrate_whitelist_to_users,
    storage::WhitelistDatabase,
};

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(config.log_format);

    let db_path = config.database_path();
    let db = match WhitelistDatabase::open(&db_path) {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(path = %db_path.display(), error = %e, "Failed to open database");
            return ExitCode::FAILURE;
        }
    };

    let result = migrate_whitelist_to_users(&db, config.migration_page_size);
    drop(db);

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Migration failed");
            ExitCode::FAILURE
        }
    }
}

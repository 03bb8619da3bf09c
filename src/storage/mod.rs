// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Record Store
//!
//! Persistent storage for whitelist entries and users in a single redb
//! file. The handle is opened once per process and shared by reference;
//! dropping it closes the file.

pub mod database;

pub use database::{StoreError, StoreResult, WhitelistDatabase, WhitelistPage};

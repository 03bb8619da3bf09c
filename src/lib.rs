// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bao Whitelist - Signup Funnel Backend
//!
//! HTTP API behind the landing page's whitelist form, plus the batch job
//! that promotes whitelist entries to user records.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `storage` - Embedded record store (redb)
//! - `migration` - Whitelist → user reconciliation
//! - `validation` - Wallet address syntax checks

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod migration;
pub mod models;
pub mod state;
pub mod storage;
pub mod validation;

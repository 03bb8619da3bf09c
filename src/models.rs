// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Data Models
//!
//! Persisted records and the request/response bodies of the REST API. All
//! JSON field names are camelCase, matching what the landing page sends.
//!
//! ## Model Categories
//!
//! - **Whitelist entries**: signups captured by the landing page form
//! - **Users**: canonical account records promoted from whitelist entries

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

// =============================================================================
// Address Keys
// =============================================================================

/// Storage key for a wallet address.
///
/// Hex digits are case-insensitive, so `0xAB..` and `0xab..` name the same
/// wallet and must map to the same key.
pub fn address_key(address: &str) -> String {
    address.to_ascii_lowercase()
}

// =============================================================================
// Whitelist Models
// =============================================================================

/// A whitelist signup.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WhitelistEntry {
    /// Unique identifier assigned at creation.
    pub id: String,
    /// Telegram handle, as typed by the user.
    pub telegram: Option<String>,
    /// Twitter handle, as typed by the user.
    pub twitter: Option<String>,
    /// Wallet address, as submitted (`0x` + 40 hex digits).
    pub address: String,
    /// Whether the user wants to start their own Bao.
    pub wants_to_start_bao: bool,
    /// When the entry was created.
    pub created_at: DateTime<Utc>,
}

impl WhitelistEntry {
    /// Build a fresh entry from a submission whose address has been validated.
    pub fn from_submission(request: SubmitWhitelistRequest, address: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            telegram: request.telegram,
            twitter: request.twitter,
            address,
            wants_to_start_bao: request.wants_to_start_bao.unwrap_or(false),
            created_at: Utc::now(),
        }
    }
}

/// Body of `POST /whitelist`.
///
/// The body must be a JSON object. Fields are read leniently: a missing or
/// mistyped field becomes `None`, so a non-string address is reported as an
/// invalid address rather than a malformed body.
#[derive(Debug, Clone, Default, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubmitWhitelistRequest {
    pub telegram: Option<String>,
    pub twitter: Option<String>,
    pub address: Option<String>,
    pub wants_to_start_bao: Option<bool>,
}

impl<'de> Deserialize<'de> for SubmitWhitelistRequest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::<String, Value>::deserialize(deserializer).map(Self::from)
    }
}

impl From<Map<String, Value>> for SubmitWhitelistRequest {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            telegram: take_string(&mut body, "telegram"),
            twitter: take_string(&mut body, "twitter"),
            address: take_string(&mut body, "address"),
            wants_to_start_bao: body.get("wantsToStartBao").and_then(Value::as_bool),
        }
    }
}

fn take_string(body: &mut Map<String, Value>, key: &str) -> Option<String> {
    match body.remove(key) {
        Some(Value::String(value)) => Some(value),
        _ => None,
    }
}

/// Response of `GET /whitelist`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ExistsResponse {
    pub exists: bool,
}

// =============================================================================
// User Models
// =============================================================================

/// Canonical account record keyed by wallet address.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier.
    pub id: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            address: address.into(),
            created_at: Utc::now(),
        }
    }
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Whitelist signup endpoints.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::ApiError,
    models::{ExistsResponse, SubmitWhitelistRequest, WhitelistEntry},
    state::AppState,
    storage::StoreError,
    validation::is_valid_address,
};

pub const ADDRESS_REQUIRED: &str = "Address is required";
pub const INVALID_ADDRESS: &str = "Invalid Ethereum address";
pub const ALREADY_WHITELISTED: &str = "Address already whitelisted";
pub const INVALID_BODY: &str = "Invalid request body";
const CHECK_FAILED: &str = "Error checking address";
const CREATE_FAILED: &str = "Error creating whitelist entry";

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AddressQuery {
    /// Wallet address to look up.
    pub address: Option<String>,
}

/// Report whether an address is already on the whitelist.
///
/// The address is not syntax-checked here; an unknown or malformed address
/// simply does not exist. Lookups ignore hex case, so `0xAB..` finds an
/// entry submitted as `0xab..`.
#[utoipa::path(
    get,
    path = "/whitelist",
    params(AddressQuery),
    tag = "Whitelist",
    responses(
        (status = 200, description = "Lookup result", body = ExistsResponse),
        (status = 400, description = "Address is required"),
        (status = 500, description = "Error checking address")
    )
)]
pub async fn check_address(
    State(state): State<AppState>,
    query: Result<Query<AddressQuery>, QueryRejection>,
) -> Result<Json<ExistsResponse>, ApiError> {
    let Query(params) = query.map_err(|_| ApiError::bad_request(ADDRESS_REQUIRED))?;
    let address = params
        .address
        .filter(|a| !a.is_empty())
        .ok_or_else(|| ApiError::bad_request(ADDRESS_REQUIRED))?;

    let existing = state.db.get_whitelist_entry(&address).map_err(|e| {
        tracing::error!(error = %e, address = %address, "Error checking address");
        ApiError::internal(CHECK_FAILED)
    })?;

    Ok(Json(ExistsResponse {
        exists: existing.is_some(),
    }))
}

/// Add a wallet to the whitelist.
///
/// Telegram and Twitter handles are optional. `wantsToStartBao` defaults to
/// `false`.
#[utoipa::path(
    post,
    path = "/whitelist",
    request_body = SubmitWhitelistRequest,
    tag = "Whitelist",
    responses(
        (status = 200, description = "Entry created", body = WhitelistEntry),
        (status = 400, description = "Invalid address, duplicate address, or malformed body"),
        (status = 500, description = "Error creating whitelist entry")
    )
)]
pub async fn submit_whitelist(
    State(state): State<AppState>,
    payload: Result<Json<SubmitWhitelistRequest>, JsonRejection>,
) -> Result<Json<WhitelistEntry>, ApiError> {
    let Json(mut request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected whitelist submission body");
        ApiError::bad_request(INVALID_BODY)
    })?;

    let address = match request.address.take() {
        Some(address) if is_valid_address(&address) => address,
        _ => return Err(ApiError::bad_request(INVALID_ADDRESS)),
    };

    let existing = state.db.get_whitelist_entry(&address).map_err(|e| {
        tracing::error!(error = %e, address = %address, "Error checking for duplicate address");
        ApiError::internal(CREATE_FAILED)
    })?;
    if existing.is_some() {
        return Err(ApiError::bad_request(ALREADY_WHITELISTED));
    }

    let entry = WhitelistEntry::from_submission(request, address);

    // A concurrent submission can win between the check above and this insert
    match state.db.insert_whitelist_entry(&entry) {
        Ok(()) => {}
        Err(StoreError::Duplicate(_)) => return Err(ApiError::bad_request(ALREADY_WHITELISTED)),
        Err(e) => {
            tracing::error!(error = %e, address = %entry.address, "Error creating whitelist entry");
            return Err(ApiError::internal(CREATE_FAILED));
        }
    }

    tracing::info!(
        id = %entry.id,
        address = %entry.address,
        wants_to_start_bao = entry.wants_to_start_bao,
        "Whitelist entry created"
    );

    Ok(Json(entry))
}

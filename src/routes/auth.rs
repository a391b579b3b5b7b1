// ABOUTME: Trainer identity extraction for route handlers
// ABOUTME: Reads the X-Trainer-Id header set by the authenticating gateway
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

//! Sessions are issued upstream; this server trusts the gateway-supplied
//! trainer id and scopes every query by it.

use axum::http::HeaderMap;
use uuid::Uuid;

use crate::constants::headers::TRAINER_ID;
use crate::errors::{AppError, AppResult};

/// Resolve the requesting trainer
///
/// # Errors
///
/// Returns `AuthRequired` if the header is absent and `AuthInvalid` if it is not a UUID
pub fn authenticate(headers: &HeaderMap) -> AppResult<Uuid> {
    let value = headers
        .get(TRAINER_ID)
        .ok_or_else(AppError::auth_required)?
        .to_str()
        .map_err(|_| AppError::auth_invalid("Trainer id header is not valid text"))?;

    Uuid::parse_str(value.trim())
        .map_err(|_| AppError::auth_invalid("Trainer id header is not a valid UUID"))
}

/// Parse a path segment as a resource id
///
/// # Errors
///
/// Returns `InvalidInput` if `raw` is not a UUID
pub fn parse_id(raw: &str, resource: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::invalid_input(format!("Invalid {resource} id: {raw}")))
}

// ABOUTME: Readiness check-in domain service
// ABOUTME: Verifies client ownership, scores the check-in, and appends it to history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use uuid::Uuid;

use crate::database::Database;
use crate::errors::AppResult;
use crate::logging::AppLogger;
use crate::models::ReadinessScore;
use trainwise_intelligence::{DeductionTable, ReadinessCalculator, ReadinessInput};

/// Score and store one daily check-in.
///
/// Business rules:
/// - The client must belong to the requesting trainer
/// - Malformed levels were already normalized during deserialization
/// - The stored record is never updated afterwards
///
/// # Errors
///
/// Returns `AppError::NotFound` if the client does not exist for this trainer.
/// Returns database errors on persistence failure.
pub async fn submit_readiness_check_in(
    database: &Database,
    table: &DeductionTable,
    owner_id: Uuid,
    client_id: Uuid,
    input: &ReadinessInput,
) -> AppResult<ReadinessScore> {
    database.clients().require(owner_id, client_id).await?;

    let assessment = ReadinessCalculator::score(input, table);
    let record = ReadinessScore::new(owner_id, client_id, input, &assessment);
    database.readiness().insert(&record).await?;

    AppLogger::log_readiness_check_in(owner_id, client_id, record.score, record.band.as_str());
    Ok(record)
}

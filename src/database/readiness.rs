// ABOUTME: Append-only readiness score history per client
// ABOUTME: Inserts scored check-ins and reads history newest-first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::ReadinessScore;
use trainwise_intelligence::{EnergyLevel, MuscleSoreness, ReadinessBand, StressLevel};

const SELECT_COLUMNS: &str = r"
    SELECT id, owner_id, client_id, date, sleep_hours, stress_level, muscle_soreness,
           energy_level, score, band, recommendation, created_at
    FROM readiness_scores
";

/// Database manager for the `readiness_scores` table
pub struct ReadinessManager {
    pool: SqlitePool,
}

impl ReadinessManager {
    /// Create a new readiness manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a scored check-in
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn insert(&self, score: &ReadinessScore) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO readiness_scores (
                id, owner_id, client_id, date, sleep_hours, stress_level, muscle_soreness,
                energy_level, score, band, recommendation, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            ",
        )
        .bind(score.id.to_string())
        .bind(score.owner_id.to_string())
        .bind(score.client_id.to_string())
        .bind(score.date.to_rfc3339())
        .bind(score.sleep_hours)
        .bind(score.stress_level.as_str())
        .bind(score.muscle_soreness.as_str())
        .bind(score.energy_level.as_str())
        .bind(i64::from(score.score))
        .bind(score.band.as_str())
        .bind(&score.recommendation)
        .bind(score.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store readiness score: {e}")))?;

        Ok(())
    }

    /// History for one client ordered by check-in date, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn history(
        &self,
        owner_id: Uuid,
        client_id: Uuid,
        limit: u32,
    ) -> AppResult<Vec<ReadinessScore>> {
        let query = format!(
            "{SELECT_COLUMNS} WHERE owner_id = $1 AND client_id = $2 \
             ORDER BY date DESC, created_at DESC LIMIT $3"
        );
        let rows = sqlx::query(&query)
            .bind(owner_id.to_string())
            .bind(client_id.to_string())
            .bind(i64::from(limit))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list readiness history: {e}")))?;

        rows.iter().map(row_to_score).collect()
    }

    /// Most recent check-in for one client
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn latest(&self, owner_id: Uuid, client_id: Uuid) -> AppResult<Option<ReadinessScore>> {
        Ok(self.history(owner_id, client_id, 1).await?.into_iter().next())
    }
}

fn row_to_score(row: &SqliteRow) -> AppResult<ReadinessScore> {
    let id: String = row.get("id");
    let owner_id: String = row.get("owner_id");
    let client_id: String = row.get("client_id");
    let date: String = row.get("date");
    let created_at: String = row.get("created_at");
    let stress: String = row.get("stress_level");
    let soreness: String = row.get("muscle_soreness");
    let energy: String = row.get("energy_level");
    let band: String = row.get("band");
    let score: i64 = row.get("score");
    let score = u8::try_from(score.clamp(0, 100)).unwrap_or(0);

    Ok(ReadinessScore {
        id: parse_uuid(&id, "readiness_scores.id")?,
        owner_id: parse_uuid(&owner_id, "readiness_scores.owner_id")?,
        client_id: parse_uuid(&client_id, "readiness_scores.client_id")?,
        date: parse_timestamp(&date, "readiness_scores.date")?,
        sleep_hours: row.get("sleep_hours"),
        stress_level: StressLevel::from_str_lossy(&stress),
        muscle_soreness: MuscleSoreness::from_str_lossy(&soreness),
        energy_level: EnergyLevel::from_str_lossy(&energy),
        score,
        band: ReadinessBand::parse_or_derive(&band, score),
        recommendation: row.get("recommendation"),
        created_at: parse_timestamp(&created_at, "readiness_scores.created_at")?,
    })
}

// ABOUTME: Storage for generated programs and nutrition plans
// ABOUTME: Writes the current envelope and decodes legacy documents on read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::warn;
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{ArtifactFilter, NewArtifact, StoredArtifact};
use trainwise_core::models::{ArtifactEnvelope, ArtifactKind};

const SELECT_COLUMNS: &str = r"
    SELECT id, owner_id, client_id, kind, schema_version, document, parameters,
           model, attempts, created_at
    FROM artifacts
";

/// Database manager for the `artifacts` table
pub struct ArtifactsManager {
    pool: SqlitePool,
}

impl ArtifactsManager {
    /// Create a new artifacts manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a validated artifact
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the insert fails
    pub async fn insert(&self, artifact: &NewArtifact) -> AppResult<StoredArtifact> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let document = artifact.envelope.to_json()?;
        let parameters = serde_json::to_string(&artifact.parameters)?;

        sqlx::query(
            r"
            INSERT INTO artifacts (
                id, owner_id, client_id, kind, schema_version, document, parameters,
                model, attempts, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(id.to_string())
        .bind(artifact.owner_id.to_string())
        .bind(artifact.client_id.to_string())
        .bind(artifact.kind().as_str())
        .bind(i64::from(artifact.envelope.schema_version))
        .bind(&document)
        .bind(&parameters)
        .bind(&artifact.model)
        .bind(i64::from(artifact.attempts))
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to store artifact: {e}")))?;

        Ok(StoredArtifact {
            id,
            owner_id: artifact.owner_id,
            client_id: artifact.client_id,
            kind: artifact.kind(),
            schema_version: artifact.envelope.schema_version,
            document: artifact.envelope.document.clone(),
            parameters: artifact.parameters.clone(),
            model: artifact.model.clone(),
            attempts: artifact.attempts,
            created_at,
        })
    }

    /// Get an artifact by ID if `owner_id` owns it
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored document cannot be decoded
    pub async fn get(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<StoredArtifact>> {
        let query = format!("{SELECT_COLUMNS} WHERE id = $1 AND owner_id = $2");
        let row = sqlx::query(&query)
            .bind(id.to_string())
            .bind(owner_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get artifact: {e}")))?;

        row.map(|r| row_to_artifact(&r)).transpose()
    }

    /// List artifacts of `owner_id`, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored document cannot be decoded
    pub async fn list(&self, owner_id: Uuid, filter: &ArtifactFilter) -> AppResult<Vec<StoredArtifact>> {
        let mut conditions = vec!["owner_id = ?"];
        let mut bind_values = vec![owner_id.to_string()];

        if let Some(client_id) = filter.client_id {
            conditions.push("client_id = ?");
            bind_values.push(client_id.to_string());
        }
        if let Some(kind) = filter.kind {
            conditions.push("kind = ?");
            bind_values.push(kind.as_str().to_owned());
        }

        let query = format!(
            "{SELECT_COLUMNS} WHERE {} ORDER BY created_at DESC LIMIT ? OFFSET ?",
            conditions.join(" AND ")
        );

        let mut sql_query = sqlx::query(&query);
        for value in &bind_values {
            sql_query = sql_query.bind(value);
        }
        sql_query = sql_query
            .bind(i64::from(filter.limit))
            .bind(i64::from(filter.offset));

        let rows = sql_query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list artifacts: {e}")))?;

        rows.iter().map(row_to_artifact).collect()
    }

    /// Delete an artifact
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM artifacts WHERE id = $1 AND owner_id = $2")
            .bind(id.to_string())
            .bind(owner_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete artifact: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_artifact(row: &SqliteRow) -> AppResult<StoredArtifact> {
    let id: String = row.get("id");
    let owner_id: String = row.get("owner_id");
    let client_id: String = row.get("client_id");
    let kind: String = row.get("kind");
    let document: String = row.get("document");
    let parameters: String = row.get("parameters");
    let attempts: i64 = row.get("attempts");
    let created_at: String = row.get("created_at");

    let kind: ArtifactKind = kind.parse()?;
    let envelope = ArtifactEnvelope::decode(kind, &document).map_err(|e| {
        warn!(artifact_id = %id, error = %e, "Stored artifact could not be decoded");
        AppError::from(e).with_resource_id(id.clone())
    })?;

    Ok(StoredArtifact {
        id: parse_uuid(&id, "artifacts.id")?,
        owner_id: parse_uuid(&owner_id, "artifacts.owner_id")?,
        client_id: parse_uuid(&client_id, "artifacts.client_id")?,
        kind,
        schema_version: envelope.schema_version,
        document: envelope.document,
        parameters: serde_json::from_str(&parameters).unwrap_or(serde_json::Value::Null),
        model: row.get("model"),
        attempts: u32::try_from(attempts).unwrap_or(0),
        created_at: parse_timestamp(&created_at, "artifacts.created_at")?,
    })
}

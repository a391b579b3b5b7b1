// ABOUTME: Trainer-scoped client CRUD
// ABOUTME: Create, fetch, list, and delete clients filtered by owning trainer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

use super::{parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{Client, CreateClientRequest};

/// Database manager for the `clients` table
pub struct ClientsManager {
    pool: SqlitePool,
}

impl ClientsManager {
    /// Create a new clients manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a client for `owner_id`
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn create(&self, owner_id: Uuid, request: &CreateClientRequest) -> AppResult<Client> {
        let client = Client {
            id: Uuid::new_v4(),
            owner_id,
            name: request.name.trim().to_owned(),
            goals: request
                .goals
                .as_deref()
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_owned),
            created_at: Utc::now(),
        };

        sqlx::query(
            r"
            INSERT INTO clients (id, owner_id, name, goals, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(client.id.to_string())
        .bind(owner_id.to_string())
        .bind(&client.name)
        .bind(&client.goals)
        .bind(client.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create client: {e}")))?;

        Ok(client)
    }

    /// Get a client by ID if `owner_id` owns it
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get(&self, owner_id: Uuid, id: Uuid) -> AppResult<Option<Client>> {
        let row = sqlx::query(
            r"
            SELECT id, owner_id, name, goals, created_at
            FROM clients
            WHERE id = $1 AND owner_id = $2
            ",
        )
        .bind(id.to_string())
        .bind(owner_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get client: {e}")))?;

        row.map(|r| row_to_client(&r)).transpose()
    }

    /// Like [`ClientsManager::get`] but a missing client is an error
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the client does not exist for this owner
    pub async fn require(&self, owner_id: Uuid, id: Uuid) -> AppResult<Client> {
        self.get(owner_id, id)
            .await?
            .ok_or_else(|| AppError::not_found("Client").with_resource_id(id.to_string()))
    }

    /// List clients of `owner_id`, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list(&self, owner_id: Uuid) -> AppResult<Vec<Client>> {
        let rows = sqlx::query(
            r"
            SELECT id, owner_id, name, goals, created_at
            FROM clients
            WHERE owner_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(owner_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list clients: {e}")))?;

        rows.iter().map(row_to_client).collect()
    }

    /// Delete a client and, by cascade, its history and artifacts
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1 AND owner_id = $2")
            .bind(id.to_string())
            .bind(owner_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to delete client: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_client(row: &SqliteRow) -> AppResult<Client> {
    let id: String = row.get("id");
    let owner_id: String = row.get("owner_id");
    let created_at: String = row.get("created_at");

    Ok(Client {
        id: parse_uuid(&id, "clients.id")?,
        owner_id: parse_uuid(&owner_id, "clients.owner_id")?,
        name: row.get("name"),
        goals: row.get("goals"),
        created_at: parse_timestamp(&created_at, "clients.created_at")?,
    })
}

// ABOUTME: SQLite persistence for clients, readiness history, and generated artifacts
// ABOUTME: Owns the connection pool, creates tables at startup, and hands out per-table managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

//! # Database Management
//!
//! Every query takes the trainer's `owner_id` and filters on it. A row owned by
//! another trainer is indistinguishable from a missing row.

mod artifacts;
mod clients;
mod readiness;

pub use artifacts::ArtifactsManager;
pub use clients::ClientsManager;
pub use readiness::ReadinessManager;

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};
use crate::generation::ArtifactSink;
use crate::models::{NewArtifact, StoredArtifact};

/// Connection pool plus schema management
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect and create tables
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created, the connection
    /// fails, or a migration fails
    pub async fn new(url: &DatabaseUrl) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&url.to_connection_string())
            .map_err(|e| AppError::config(format!("Invalid DATABASE_URL '{url}': {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if url.is_memory() {
            // Each in-memory connection is its own database
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            if let DatabaseUrl::SQLite { path } = url {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        AppError::database(format!(
                            "Failed to create database directory {}: {e}",
                            parent.display()
                        ))
                    })?;
                }
            }
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to {url}: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!("Database ready at {url}");
        Ok(db)
    }

    /// In-memory database with tables created
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or a migration fails
    pub async fn in_memory() -> AppResult<Self> {
        Self::new(&DatabaseUrl::Memory).await
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Client table operations
    #[must_use]
    pub fn clients(&self) -> ClientsManager {
        ClientsManager::new(self.pool.clone())
    }

    /// Readiness history operations
    #[must_use]
    pub fn readiness(&self) -> ReadinessManager {
        ReadinessManager::new(self.pool.clone())
    }

    /// Artifact table operations
    #[must_use]
    pub fn artifacts(&self) -> ArtifactsManager {
        ArtifactsManager::new(self.pool.clone())
    }

    /// Create all tables and indexes
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_clients().await?;
        self.migrate_readiness().await?;
        self.migrate_artifacts().await?;
        debug!("Database migrations applied");
        Ok(())
    }

    async fn execute_ddl(&self, label: &str, statements: &[&str]) -> AppResult<()> {
        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::database(format!("Failed to migrate {label}: {e}")))?;
        }
        Ok(())
    }

    async fn migrate_clients(&self) -> AppResult<()> {
        self.execute_ddl(
            "clients",
            &[
                r"
                CREATE TABLE IF NOT EXISTS clients (
                    id TEXT PRIMARY KEY,
                    owner_id TEXT NOT NULL,
                    name TEXT NOT NULL,
                    goals TEXT,
                    created_at TEXT NOT NULL
                )
                ",
                "CREATE INDEX IF NOT EXISTS idx_clients_owner ON clients(owner_id)",
            ],
        )
        .await
    }

    async fn migrate_readiness(&self) -> AppResult<()> {
        self.execute_ddl(
            "readiness_scores",
            &[
                r"
                CREATE TABLE IF NOT EXISTS readiness_scores (
                    id TEXT PRIMARY KEY,
                    owner_id TEXT NOT NULL,
                    client_id TEXT NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
                    date TEXT NOT NULL,
                    sleep_hours REAL NOT NULL,
                    stress_level TEXT NOT NULL,
                    muscle_soreness TEXT NOT NULL,
                    energy_level TEXT NOT NULL,
                    score INTEGER NOT NULL CHECK (score BETWEEN 0 AND 100),
                    band TEXT NOT NULL,
                    recommendation TEXT NOT NULL,
                    created_at TEXT NOT NULL
                )
                ",
                r"
                CREATE INDEX IF NOT EXISTS idx_readiness_client_date
                    ON readiness_scores(owner_id, client_id, date DESC)
                ",
            ],
        )
        .await
    }

    async fn migrate_artifacts(&self) -> AppResult<()> {
        self.execute_ddl(
            "artifacts",
            &[
                r"
                CREATE TABLE IF NOT EXISTS artifacts (
                    id TEXT PRIMARY KEY,
                    owner_id TEXT NOT NULL,
                    client_id TEXT NOT NULL REFERENCES clients(id) ON DELETE CASCADE,
                    kind TEXT NOT NULL,
                    schema_version INTEGER NOT NULL,
                    document TEXT NOT NULL,
                    parameters TEXT NOT NULL,
                    model TEXT NOT NULL,
                    attempts INTEGER NOT NULL,
                    created_at TEXT NOT NULL
                )
                ",
                r"
                CREATE INDEX IF NOT EXISTS idx_artifacts_owner_client
                    ON artifacts(owner_id, client_id, created_at DESC)
                ",
            ],
        )
        .await
    }
}

#[async_trait]
impl ArtifactSink for Database {
    async fn insert_artifact(&self, artifact: &NewArtifact) -> AppResult<StoredArtifact> {
        self.artifacts().insert(artifact).await
    }
}

/// Parse a UUID column
fn parse_uuid(raw: &str, column: &str) -> AppResult<uuid::Uuid> {
    uuid::Uuid::parse_str(raw)
        .map_err(|e| AppError::internal(format!("Invalid UUID in {column}: {e}")))
}

/// Parse an RFC 3339 timestamp column
fn parse_timestamp(raw: &str, column: &str) -> AppResult<chrono::DateTime<chrono::Utc>> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(|e| AppError::internal(format!("Invalid timestamp in {column}: {e}")))
}

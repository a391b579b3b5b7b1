// ABOUTME: Shared server resources handed to every route handler
// ABOUTME: Bundles the database, generation orchestrator, readiness table, and config
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::database::Database;
use crate::generation::GenerationOrchestrator;
use crate::llm::LlmProvider;
use trainwise_intelligence::DeductionTable;

/// Resources built once at startup and shared across requests
pub struct ServerResources {
    /// SQLite persistence
    pub database: Database,
    /// Bounded generation against the configured provider
    pub orchestrator: GenerationOrchestrator,
    /// Deduction table resolved from `READINESS_TABLE`
    pub readiness_table: DeductionTable,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wire resources together; the database doubles as the artifact sink
    #[must_use]
    pub fn new(database: Database, provider: Arc<dyn LlmProvider>, config: ServerConfig) -> Self {
        let orchestrator = GenerationOrchestrator::new(
            provider,
            Arc::new(database.clone()),
            config.generation.clone(),
        );

        Self {
            database,
            orchestrator,
            readiness_table: config.readiness.table(),
            config: Arc::new(config),
        }
    }
}

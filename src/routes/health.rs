// ABOUTME: Health check route handler for service monitoring
// ABOUTME: Reports service status, version, and database reachability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::constants::service::{SERVICE_NAME, SERVICE_VERSION};
use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create the health check route
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .with_state(resources)
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Json<Value> {
        let database_ok = sqlx::query("SELECT 1")
            .execute(resources.database.pool())
            .await
            .is_ok();

        Json(json!({
            "status": if database_ok { "healthy" } else { "degraded" },
            "service": SERVICE_NAME,
            "version": SERVICE_VERSION,
            "llm_provider": resources.orchestrator.provider().name(),
            "database": if database_ok { "ok" } else { "unreachable" },
            "timestamp": chrono::Utc::now().to_rfc3339()
        }))
    }
}

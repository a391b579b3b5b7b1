// ABOUTME: Route handlers for daily readiness check-ins and history
// ABOUTME: Scores submissions and lists a client's scores newest-first
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::auth::{authenticate, parse_id};
use super::extract::JsonBody;
use crate::constants::limits::{DEFAULT_HISTORY_LIMIT, MAX_PAGE_SIZE};
use crate::errors::AppError;
use crate::models::ReadinessScore;
use crate::resources::ServerResources;
use crate::services;
use trainwise_intelligence::ReadinessInput;

/// Query parameters for readiness history
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Maximum entries, default 30
    pub limit: Option<u32>,
}

/// Response for readiness history
#[derive(Debug, Serialize)]
pub struct ReadinessHistoryResponse {
    /// Scores ordered by check-in date, newest first
    pub scores: Vec<ReadinessScore>,
    /// Number of scores returned
    pub total: usize,
}

/// Readiness routes
pub struct ReadinessRoutes;

impl ReadinessRoutes {
    /// Create all readiness routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/clients/:id/readiness",
                get(Self::handle_history).post(Self::handle_check_in),
            )
            .route("/api/clients/:id/readiness/latest", get(Self::handle_latest))
            .with_state(resources)
    }

    /// Handle POST /api/clients/:id/readiness
    async fn handle_check_in(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        JsonBody(input): JsonBody<ReadinessInput>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers)?;
        let client_id = parse_id(&id, "client")?;

        let score = services::submit_readiness_check_in(
            &resources.database,
            &resources.readiness_table,
            owner_id,
            client_id,
            &input,
        )
        .await?;

        Ok((StatusCode::CREATED, Json(score)).into_response())
    }

    /// Handle GET /api/clients/:id/readiness
    async fn handle_history(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Query(query): Query<HistoryQuery>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers)?;
        let client_id = parse_id(&id, "client")?;
        resources.database.clients().require(owner_id, client_id).await?;

        let limit = query
            .limit
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
            .clamp(1, MAX_PAGE_SIZE);
        let scores = resources
            .database
            .readiness()
            .history(owner_id, client_id, limit)
            .await?;

        let response = ReadinessHistoryResponse {
            total: scores.len(),
            scores,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/clients/:id/readiness/latest
    async fn handle_latest(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers)?;
        let client_id = parse_id(&id, "client")?;
        resources.database.clients().require(owner_id, client_id).await?;

        let latest = resources
            .database
            .readiness()
            .latest(owner_id, client_id)
            .await?
            .ok_or_else(|| AppError::not_found("Readiness score"))?;

        Ok((StatusCode::OK, Json(latest)).into_response())
    }
}

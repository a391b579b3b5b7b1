// ABOUTME: Route handlers for stored programs and nutrition plans
// ABOUTME: Paged listing with client and kind filters, lookup, and delete
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
use crate::constants::limits::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::errors::AppError;
use crate::models::{ArtifactFilter, StoredArtifact};
use crate::resources::ServerResources;
use trainwise_core::models::ArtifactKind;

/// Query parameters for `GET /api/artifacts`
#[derive(Debug, Deserialize)]
pub struct ListArtifactsQuery {
    /// Only this client's artifacts
    pub client_id: Option<String>,
    /// `program` or `nutrition_plan`
    pub kind: Option<String>,
    /// Page size, default 20, at most 100
    pub limit: Option<u32>,
    /// Rows to skip
    pub offset: Option<u32>,
}

impl ListArtifactsQuery {
    fn into_filter(self) -> Result<ArtifactFilter, AppError> {
        Ok(ArtifactFilter {
            client_id: self
                .client_id
                .as_deref()
                .map(|id| parse_id(id, "client"))
                .transpose()?,
            kind: self
                .kind
                .as_deref()
                .map(str::parse::<ArtifactKind>)
                .transpose()?,
            limit: self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            offset: self.offset.unwrap_or(0),
        })
    }
}

/// Response for artifact listing
#[derive(Debug, Serialize)]
pub struct ListArtifactsResponse {
    /// Artifacts, newest first
    pub artifacts: Vec<StoredArtifact>,
    /// Number of artifacts in this page
    pub total: usize,
    /// Page size applied
    pub limit: u32,
    /// Offset applied
    pub offset: u32,
}

/// Artifact routes
pub struct ArtifactRoutes;

impl ArtifactRoutes {
    /// Create all artifact routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/artifacts", get(Self::handle_list))
            .route(
                "/api/artifacts/:id",
                get(Self::handle_get).delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle GET /api/artifacts
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListArtifactsQuery>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers)?;
        let filter = query.into_filter()?;

        let artifacts = resources
            .database
            .artifacts()
            .list(owner_id, &filter)
            .await?;

        let response = ListArtifactsResponse {
            total: artifacts.len(),
            artifacts,
            limit: filter.limit,
            offset: filter.offset,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/artifacts/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers)?;
        let id = parse_id(&id, "artifact")?;

        let artifact = resources
            .database
            .artifacts()
            .get(owner_id, id)
            .await?
            .ok_or_else(|| AppError::not_found("Artifact").with_resource_id(id.to_string()))?;

        Ok((StatusCode::OK, Json(artifact)).into_response())
    }

    /// Handle DELETE /api/artifacts/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers)?;
        let id = parse_id(&id, "artifact")?;

        if !resources.database.artifacts().delete(owner_id, id).await? {
            return Err(AppError::not_found("Artifact").with_resource_id(id.to_string()));
        }
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}

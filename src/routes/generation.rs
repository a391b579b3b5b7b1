// ABOUTME: Route handlers for AI-generated programs and nutrition plans
// ABOUTME: Delegates to the generation service and maps failures to user-safe errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use super::auth::{authenticate, parse_id};
use super::extract::JsonBody;
use crate::errors::AppError;
use crate::generation::{NutritionParameters, ProgramParameters};
use crate::resources::ServerResources;
use crate::services;

/// Generation routes
pub struct GenerationRoutes;

impl GenerationRoutes {
    /// Create all generation routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/clients/:id/programs", post(Self::handle_program))
            .route(
                "/api/clients/:id/nutrition-plans",
                post(Self::handle_nutrition_plan),
            )
            .with_state(resources)
    }

    /// Handle POST /api/clients/:id/programs
    async fn handle_program(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        JsonBody(params): JsonBody<ProgramParameters>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers)?;
        let client_id = parse_id(&id, "client")?;

        let artifact = services::generate_program(
            &resources.database,
            &resources.orchestrator,
            owner_id,
            client_id,
            &params,
        )
        .await?;

        Ok((StatusCode::CREATED, Json(artifact)).into_response())
    }

    /// Handle POST /api/clients/:id/nutrition-plans
    async fn handle_nutrition_plan(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        JsonBody(params): JsonBody<NutritionParameters>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers)?;
        let client_id = parse_id(&id, "client")?;

        let artifact = services::generate_nutrition_plan(
            &resources.database,
            &resources.orchestrator,
            owner_id,
            client_id,
            &params,
        )
        .await?;

        Ok((StatusCode::CREATED, Json(artifact)).into_response())
    }
}

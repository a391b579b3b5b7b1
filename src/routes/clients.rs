// ABOUTME: Route handlers for the trainer's client roster
// ABOUTME: Create, list, fetch, and delete clients scoped to the requesting trainer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use super::auth::{authenticate, parse_id};
use super::extract::JsonBody;
use crate::errors::AppError;
use crate::models::{Client, CreateClientRequest};
use crate::resources::ServerResources;

/// Response for `GET /api/clients`
#[derive(Debug, Serialize)]
pub struct ListClientsResponse {
    /// Clients, newest first
    pub clients: Vec<Client>,
    /// Number of clients returned
    pub total: usize,
}

/// Client routes
pub struct ClientRoutes;

impl ClientRoutes {
    /// Create all client routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/clients",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/api/clients/:id",
                get(Self::handle_get).delete(Self::handle_delete),
            )
            .with_state(resources)
    }

    /// Handle POST /api/clients
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        JsonBody(body): JsonBody<CreateClientRequest>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers)?;
        body.validate()?;

        let client = resources.database.clients().create(owner_id, &body).await?;
        Ok((StatusCode::CREATED, Json(client)).into_response())
    }

    /// Handle GET /api/clients
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers)?;
        let clients = resources.database.clients().list(owner_id).await?;

        let response = ListClientsResponse {
            total: clients.len(),
            clients,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/clients/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers)?;
        let id = parse_id(&id, "client")?;

        let client = resources.database.clients().require(owner_id, id).await?;
        Ok((StatusCode::OK, Json(client)).into_response())
    }

    /// Handle DELETE /api/clients/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let owner_id = authenticate(&headers)?;
        let id = parse_id(&id, "client")?;

        if !resources.database.clients().delete(owner_id, id).await? {
            return Err(AppError::not_found("Client").with_resource_id(id.to_string()));
        }
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}

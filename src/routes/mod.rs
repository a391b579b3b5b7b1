// ABOUTME: HTTP route assembly for the Trainwise REST API
// ABOUTME: Merges domain routers and applies CORS, request id, tracing, and timeout layers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

//! # Routes
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/health` | [`HealthRoutes`] |
//! | GET, POST | `/api/clients` | [`ClientRoutes`] |
//! | GET, DELETE | `/api/clients/:id` | [`ClientRoutes`] |
//! | GET, POST | `/api/clients/:id/readiness` | [`ReadinessRoutes`] |
//! | GET | `/api/clients/:id/readiness/latest` | [`ReadinessRoutes`] |
//! | POST | `/api/clients/:id/programs` | [`GenerationRoutes`] |
//! | POST | `/api/clients/:id/nutrition-plans` | [`GenerationRoutes`] |
//! | GET | `/api/artifacts` | [`ArtifactRoutes`] |
//! | GET, DELETE | `/api/artifacts/:id` | [`ArtifactRoutes`] |
//!
//! Every `/api` route requires the `X-Trainer-Id` header.

/// Artifact listing, lookup, and delete
pub mod artifacts;
/// Trainer identity extraction
pub mod auth;
/// Client roster
pub mod clients;
/// JSON body extraction
pub mod extract;
/// Program and nutrition plan generation
pub mod generation;
/// Health check
pub mod health;
/// Readiness check-ins and history
pub mod readiness;

pub use artifacts::ArtifactRoutes;
pub use clients::ClientRoutes;
pub use generation::GenerationRoutes;
pub use health::HealthRoutes;
pub use readiness::ReadinessRoutes;

use std::sync::Arc;

use axum::Router;

use crate::middleware::{setup_cors, with_request_layers};
use crate::resources::ServerResources;

/// Build the complete application router
#[must_use]
pub fn build_router(resources: &Arc<ServerResources>) -> Router {
    let router = Router::new()
        .merge(HealthRoutes::routes(Arc::clone(resources)))
        .merge(ClientRoutes::routes(Arc::clone(resources)))
        .merge(ReadinessRoutes::routes(Arc::clone(resources)))
        .merge(GenerationRoutes::routes(Arc::clone(resources)))
        .merge(ArtifactRoutes::routes(Arc::clone(resources)));

    with_request_layers(router, resources.config.request_timeout)
        .layer(setup_cors(&resources.config.cors))
}

// ABOUTME: Program and nutrition plan generation domain service
// ABOUTME: Validates parameters, renders prompts, and runs the bounded orchestrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use serde::Serialize;
use tracing::warn;
use uuid::Uuid;

use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::generation::prompts::{
    nutrition_user_prompt, program_user_prompt, NUTRITION_SYSTEM_PROMPT, PROGRAM_SYSTEM_PROMPT,
};
use crate::generation::{
    GenerationFailure, GenerationOrchestrator, GenerationRequest, NutritionParameters,
    ProgramParameters,
};
use crate::logging::AppLogger;
use crate::models::StoredArtifact;
use trainwise_core::models::ArtifactKind;

/// Why a generation call produced no stored artifact
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// Rejected before any provider call
    #[error(transparent)]
    Rejected(#[from] AppError),
    /// Generation or persistence failed
    #[error(transparent)]
    Failed(#[from] GenerationFailure),
}

impl From<GenerateError> for AppError {
    fn from(error: GenerateError) -> Self {
        match error {
            GenerateError::Rejected(e) => e,
            GenerateError::Failed(f) => f.into(),
        }
    }
}

/// Generate and store a workout program for a client.
///
/// A failed save is retried once from the already generated document.
///
/// # Errors
///
/// Returns [`GenerateError::Rejected`] for invalid parameters or an unknown
/// client, and [`GenerateError::Failed`] when the orchestrator gives up.
pub async fn generate_program(
    database: &Database,
    orchestrator: &GenerationOrchestrator,
    owner_id: Uuid,
    client_id: Uuid,
    params: &ProgramParameters,
) -> Result<StoredArtifact, GenerateError> {
    params.validate()?;
    let client = database.clients().require(owner_id, client_id).await?;

    let request = build_request(
        owner_id,
        client_id,
        ArtifactKind::Program,
        PROGRAM_SYSTEM_PROMPT,
        program_user_prompt(&client.name, params),
        params,
    )?;
    run(orchestrator, request).await
}

/// Generate and store a nutrition plan for a client.
///
/// A failed save is retried once from the already generated document.
///
/// # Errors
///
/// Returns [`GenerateError::Rejected`] for invalid parameters or an unknown
/// client, and [`GenerateError::Failed`] when the orchestrator gives up.
pub async fn generate_nutrition_plan(
    database: &Database,
    orchestrator: &GenerationOrchestrator,
    owner_id: Uuid,
    client_id: Uuid,
    params: &NutritionParameters,
) -> Result<StoredArtifact, GenerateError> {
    params.validate()?;
    let client = database.clients().require(owner_id, client_id).await?;

    let request = build_request(
        owner_id,
        client_id,
        ArtifactKind::NutritionPlan,
        NUTRITION_SYSTEM_PROMPT,
        nutrition_user_prompt(&client.name, params),
        params,
    )?;
    run(orchestrator, request).await
}

fn build_request(
    owner_id: Uuid,
    subject_id: Uuid,
    kind: ArtifactKind,
    system_prompt: &str,
    user_prompt: String,
    params: &impl Serialize,
) -> AppResult<GenerationRequest> {
    Ok(GenerationRequest {
        owner_id,
        subject_id,
        kind,
        system_prompt: system_prompt.to_owned(),
        user_prompt,
        parameters: serde_json::to_value(params)?,
    })
}

async fn run(
    orchestrator: &GenerationOrchestrator,
    request: GenerationRequest,
) -> Result<StoredArtifact, GenerateError> {
    let (owner_id, client_id, kind) = (request.owner_id, request.subject_id, request.kind);

    let outcome = match orchestrator.generate(request).await {
        Err(GenerationFailure::PersistenceFailure { artifact, reason }) => {
            warn!(client.id = %client_id, error = %reason, "Retrying artifact save once");
            orchestrator.retry_persist(*artifact).await
        }
        other => other,
    };

    match outcome {
        Ok(stored) => {
            AppLogger::log_artifact_stored(
                owner_id,
                client_id,
                stored.id,
                kind.as_str(),
                stored.attempts,
            );
            Ok(stored)
        }
        Err(failure) => {
            AppLogger::log_generation_failed(owner_id, client_id, kind.as_str(), &failure.to_string());
            Err(failure.into())
        }
    }
}

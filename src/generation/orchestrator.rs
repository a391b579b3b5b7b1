// ABOUTME: Bounded generation loop racing each provider call against a timeout with backoff retries
// ABOUTME: Persists exactly one artifact on success and none on exhaustion
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

//! # Generation Orchestrator
//!
//! ```text
//! Idle -> Attempting(n) -> Succeeded
//!                       -> RetryScheduled(n + 1) -> Attempting(n + 1)
//!                       -> Failed
//! ```
//!
//! Attempts are strictly sequential. Each one races the provider call against
//! the policy timeout with `tokio::time::timeout`; when the timer wins the
//! provider future is dropped, so a late reply can never reach the sink.
//! Dropping the future returned by [`GenerationOrchestrator::generate`]
//! abandons the in-flight call and any pending backoff.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use super::extraction::parse_document;
use super::GenerationPolicy;
use crate::constants::generation::{BUSY_MESSAGE, GENERATION_MAX_TOKENS, GENERATION_TEMPERATURE};
use crate::errors::{AppError, AppResult};
use crate::llm::{ChatMessage, ChatRequest, LlmProvider};
use crate::models::{NewArtifact, StoredArtifact};
use trainwise_core::models::{ArtifactDocument, ArtifactEnvelope, ArtifactKind};

/// Destination for validated artifacts
#[async_trait]
pub trait ArtifactSink: Send + Sync {
    /// Insert one artifact and return the stored record
    async fn insert_artifact(&self, artifact: &NewArtifact) -> AppResult<StoredArtifact>;
}

/// One generation request, ready to send
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Requesting trainer
    pub owner_id: Uuid,
    /// Client the artifact is for
    pub subject_id: Uuid,
    /// Expected document kind
    pub kind: ArtifactKind,
    /// Schema-describing system prompt
    pub system_prompt: String,
    /// Rendered constraints
    pub user_prompt: String,
    /// Parameters stored alongside the artifact
    pub parameters: Value,
}

impl GenerationRequest {
    fn chat_request(&self) -> ChatRequest {
        ChatRequest::new(vec![
            ChatMessage::system(self.system_prompt.clone()),
            ChatMessage::user(self.user_prompt.clone()),
        ])
        .with_temperature(GENERATION_TEMPERATURE)
        .with_max_tokens(GENERATION_MAX_TOKENS)
        .with_json_mode()
    }
}

/// Terminal failure of a generation request
#[derive(Debug, thiserror::Error)]
pub enum GenerationFailure {
    /// The final attempt exceeded its wall-clock budget
    #[error("generation timed out after {attempts} attempt(s) of {timeout_secs}s")]
    TimeoutExceeded {
        /// Provider calls made
        attempts: u32,
        /// Per-attempt budget
        timeout_secs: u64,
    },
    /// The final attempt returned an error or an unusable document
    #[error("generation provider failed after {attempts} attempt(s): {reason}")]
    ProviderError {
        /// Provider calls made
        attempts: u32,
        /// Last provider or schema error, for logs only
        reason: String,
    },
    /// Generation succeeded but the insert failed
    #[error("generated artifact could not be saved: {reason}")]
    PersistenceFailure {
        /// The validated artifact, for [`GenerationOrchestrator::retry_persist`]
        artifact: Box<NewArtifact>,
        /// Sink error
        reason: String,
    },
}

impl GenerationFailure {
    /// Text safe to show a trainer; provider detail stays in the logs
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::TimeoutExceeded { .. } | Self::ProviderError { .. } => BUSY_MESSAGE,
            Self::PersistenceFailure { .. } => {
                "Your plan was generated but could not be saved. Please retry saving it."
            }
        }
    }

    /// Provider calls made before giving up, if generation was the failing step
    #[must_use]
    pub const fn attempts(&self) -> Option<u32> {
        match self {
            Self::TimeoutExceeded { attempts, .. } | Self::ProviderError { attempts, .. } => {
                Some(*attempts)
            }
            Self::PersistenceFailure { .. } => None,
        }
    }

    /// True when the model never produced a usable document
    #[must_use]
    pub const fn is_generation_failure(&self) -> bool {
        !matches!(self, Self::PersistenceFailure { .. })
    }
}

impl From<GenerationFailure> for AppError {
    fn from(failure: GenerationFailure) -> Self {
        let message = failure.user_message();
        match failure {
            GenerationFailure::TimeoutExceeded { attempts, .. } => {
                Self::service_unavailable(message)
                    .with_details(serde_json::json!({ "reason": "timeout", "attempts": attempts }))
            }
            GenerationFailure::ProviderError { attempts, .. } => {
                Self::service_unavailable(message).with_details(
                    serde_json::json!({ "reason": "provider_error", "attempts": attempts }),
                )
            }
            GenerationFailure::PersistenceFailure { artifact, .. } => Self::database(message)
                .with_details(serde_json::json!({
                    "reason": "persistence",
                    "kind": artifact.kind().as_str(),
                })),
        }
    }
}

/// Why a single attempt failed
#[derive(Debug)]
enum AttemptFailure {
    Timeout,
    Provider(String),
}

impl AttemptFailure {
    const fn outcome(&self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Provider(_) => "provider_error",
        }
    }

    fn into_terminal(self, attempts: u32, policy: &GenerationPolicy) -> GenerationFailure {
        match self {
            Self::Timeout => GenerationFailure::TimeoutExceeded {
                attempts,
                timeout_secs: policy.attempt_timeout.as_secs(),
            },
            Self::Provider(reason) => GenerationFailure::ProviderError { attempts, reason },
        }
    }
}

/// Runs bounded generation against a provider and a sink
#[derive(Clone)]
pub struct GenerationOrchestrator {
    provider: Arc<dyn LlmProvider>,
    sink: Arc<dyn ArtifactSink>,
    policy: GenerationPolicy,
}

impl GenerationOrchestrator {
    /// Create an orchestrator
    #[must_use]
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        sink: Arc<dyn ArtifactSink>,
        policy: GenerationPolicy,
    ) -> Self {
        Self {
            provider,
            sink,
            policy,
        }
    }

    /// Active policy
    #[must_use]
    pub const fn policy(&self) -> &GenerationPolicy {
        &self.policy
    }

    /// Provider used for generation
    #[must_use]
    pub fn provider(&self) -> &dyn LlmProvider {
        self.provider.as_ref()
    }

    /// Generate, validate, and persist one artifact
    ///
    /// # Errors
    ///
    /// Returns [`GenerationFailure`] once every attempt has failed, or
    /// immediately if the insert fails after a successful attempt
    #[instrument(
        skip_all,
        fields(
            subject_id = %request.subject_id,
            artifact_kind = %request.kind,
            provider = self.provider.name(),
        )
    )]
    pub async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<StoredArtifact, GenerationFailure> {
        let max_attempts = self.policy.max_attempts.max(1);
        let chat = request.chat_request();
        let mut attempt = 1;

        loop {
            match self.attempt(&chat, request.kind).await {
                Ok((document, model)) => {
                    info!(attempt, max_attempts, outcome = "succeeded", "Generation attempt finished");
                    let artifact = NewArtifact {
                        owner_id: request.owner_id,
                        client_id: request.subject_id,
                        envelope: ArtifactEnvelope::new(document),
                        parameters: request.parameters,
                        model,
                        attempts: attempt,
                    };
                    return self.persist(artifact).await;
                }
                Err(failure) if attempt >= max_attempts => {
                    warn!(
                        attempt,
                        max_attempts,
                        outcome = failure.outcome(),
                        "Generation attempts exhausted"
                    );
                    return Err(failure.into_terminal(attempt, &self.policy));
                }
                Err(failure) => {
                    let backoff = self.policy.backoff_after(attempt);
                    warn!(
                        attempt,
                        max_attempts,
                        outcome = failure.outcome(),
                        backoff_ms = u64::try_from(backoff.as_millis()).unwrap_or(u64::MAX),
                        "Generation attempt failed, retrying"
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Insert an artifact whose first save failed, without regenerating it
    ///
    /// # Errors
    ///
    /// Returns [`GenerationFailure::PersistenceFailure`] if the insert fails again
    pub async fn retry_persist(
        &self,
        artifact: NewArtifact,
    ) -> Result<StoredArtifact, GenerationFailure> {
        self.persist(artifact).await
    }

    async fn attempt(
        &self,
        chat: &ChatRequest,
        kind: ArtifactKind,
    ) -> Result<(ArtifactDocument, String), AttemptFailure> {
        let response =
            match tokio::time::timeout(self.policy.attempt_timeout, self.provider.complete(chat))
                .await
            {
                Err(_elapsed) => return Err(AttemptFailure::Timeout),
                Ok(Err(e)) => return Err(AttemptFailure::Provider(e.to_string())),
                Ok(Ok(response)) => response,
            };

        let document = parse_document(kind, &response.content)
            .map_err(|e| AttemptFailure::Provider(e.to_string()))?;
        Ok((document, response.model))
    }

    async fn persist(&self, artifact: NewArtifact) -> Result<StoredArtifact, GenerationFailure> {
        match self.sink.insert_artifact(&artifact).await {
            Ok(stored) => {
                info!(artifact_id = %stored.id, attempts = stored.attempts, "Artifact persisted");
                Ok(stored)
            }
            Err(e) => {
                error!(error = %e, "Generated artifact could not be persisted");
                Err(GenerationFailure::PersistenceFailure {
                    artifact: Box::new(artifact),
                    reason: e.to_string(),
                })
            }
        }
    }
}

// ABOUTME: Persisted domain records for clients, readiness history, and generated artifacts
// ABOUTME: Shared by the database managers, services, and HTTP routes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

//! # Data Models
//!
//! Every record carries the `owner_id` of the trainer it belongs to. Reads and
//! writes are always scoped by that id.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::constants::limits::{MAX_NAME_LENGTH, MAX_TEXT_LENGTH};
use crate::errors::{AppError, AppResult};
use trainwise_core::models::{ArtifactDocument, ArtifactEnvelope, ArtifactKind};
use trainwise_intelligence::{
    EnergyLevel, MuscleSoreness, ReadinessAssessment, ReadinessBand, ReadinessInput, StressLevel,
};

// ============================================================================
// Clients
// ============================================================================

/// A trainer's client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    /// Client id
    pub id: Uuid,
    /// Owning trainer
    pub owner_id: Uuid,
    /// Display name
    pub name: String,
    /// Free-form goals
    pub goals: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/clients`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClientRequest {
    /// Display name
    pub name: String,
    /// Free-form goals
    #[serde(default)]
    pub goals: Option<String>,
}

impl CreateClientRequest {
    /// Trim and bound the fields
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a blank or oversized name, or oversized goals
    pub fn validate(&self) -> AppResult<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(AppError::invalid_input("name is required"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(AppError::invalid_input(format!(
                "name must be at most {MAX_NAME_LENGTH} characters"
            )));
        }
        if self
            .goals
            .as_deref()
            .is_some_and(|g| g.chars().count() > MAX_TEXT_LENGTH)
        {
            return Err(AppError::invalid_input(format!(
                "goals must be at most {MAX_TEXT_LENGTH} characters"
            )));
        }
        Ok(())
    }
}

// ============================================================================
// Readiness
// ============================================================================

/// A scored check-in, immutable once stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessScore {
    /// Record id
    pub id: Uuid,
    /// Owning trainer
    pub owner_id: Uuid,
    /// Client the check-in belongs to
    pub client_id: Uuid,
    /// Day the check-in refers to
    pub date: DateTime<Utc>,
    /// Hours slept
    pub sleep_hours: f64,
    /// Stress level
    pub stress_level: StressLevel,
    /// Muscle soreness
    pub muscle_soreness: MuscleSoreness,
    /// Energy level
    pub energy_level: EnergyLevel,
    /// Score in `[0, 100]`
    pub score: u8,
    /// Band for `score`
    pub band: ReadinessBand,
    /// Recommendation text for `band`
    pub recommendation: String,
    /// Insert time
    pub created_at: DateTime<Utc>,
}

impl ReadinessScore {
    /// Build a new record from a check-in and its assessment
    #[must_use]
    pub fn new(
        owner_id: Uuid,
        client_id: Uuid,
        input: &ReadinessInput,
        assessment: &ReadinessAssessment,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            client_id,
            date: input.date,
            sleep_hours: input.sleep_hours,
            stress_level: input.stress_level,
            muscle_soreness: input.muscle_soreness,
            energy_level: input.energy_level,
            score: assessment.score,
            band: assessment.band,
            recommendation: assessment.recommendation.to_owned(),
            created_at: Utc::now(),
        }
    }
}

// ============================================================================
// Artifacts
// ============================================================================

/// A validated artifact waiting to be inserted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewArtifact {
    /// Owning trainer
    pub owner_id: Uuid,
    /// Client the artifact was generated for
    pub client_id: Uuid,
    /// Document at the current schema version
    pub envelope: ArtifactEnvelope,
    /// Parameters the document was generated from
    pub parameters: Value,
    /// Model that produced the document
    pub model: String,
    /// Provider calls it took
    pub attempts: u32,
}

impl NewArtifact {
    /// Kind of the wrapped document
    #[must_use]
    pub const fn kind(&self) -> ArtifactKind {
        self.envelope.kind
    }
}

/// An artifact as stored
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredArtifact {
    /// Artifact id
    pub id: Uuid,
    /// Owning trainer
    pub owner_id: Uuid,
    /// Client the artifact was generated for
    pub client_id: Uuid,
    /// Document kind
    pub kind: ArtifactKind,
    /// Schema version the stored document was read from
    pub schema_version: u32,
    /// The document
    pub document: ArtifactDocument,
    /// Parameters the document was generated from
    pub parameters: Value,
    /// Model that produced the document
    pub model: String,
    /// Provider calls it took
    pub attempts: u32,
    /// Insert time
    pub created_at: DateTime<Utc>,
}

/// Listing filter for artifacts
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactFilter {
    /// Only artifacts for this client
    pub client_id: Option<Uuid>,
    /// Only artifacts of this kind
    pub kind: Option<ArtifactKind>,
    /// Page size
    pub limit: u32,
    /// Rows to skip
    pub offset: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_client_name_rejected() {
        let request = CreateClientRequest {
            name: "   ".to_owned(),
            goals: None,
        };
        assert!(request.validate().is_err());
    }
}

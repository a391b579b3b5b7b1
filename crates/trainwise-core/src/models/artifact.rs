// ABOUTME: Versioned artifact envelope wrapping generated programs and nutrition plans
// ABOUTME: Handles kind tagging, schema version migration, and decode defaulting rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

//! Versioned artifact schema
//!
//! Generated documents are stored wrapped in an [`ArtifactEnvelope`]:
//!
//! ```json
//! { "schema_version": 2, "kind": "program", "document": { ... } }
//! ```
//!
//! Decoding rules:
//! - an envelope at the current version is read as is
//! - a bare document (no envelope) is a version 1 payload and gets wrapped
//! - absent collections decode as empty, absent optional fields as `None`
//! - a version newer than [`CURRENT_ARTIFACT_SCHEMA_VERSION`] is rejected

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{NutritionPlan, Program};
use crate::constants::schema::{CURRENT_ARTIFACT_SCHEMA_VERSION, LEGACY_ARTIFACT_SCHEMA_VERSION};
use crate::errors::{AppError, ErrorCode};

/// Errors raised while decoding or validating artifact documents
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArtifactSchemaError {
    /// Payload is not JSON or does not match the document shape
    #[error("malformed artifact document: {0}")]
    Malformed(String),
    /// Stored envelope was written by a newer build
    #[error("unsupported artifact schema version {found} (supported up to {supported})")]
    UnsupportedVersion {
        /// Version found in the envelope
        found: u64,
        /// Highest version this build reads
        supported: u32,
    },
    /// Envelope kind differs from the kind recorded alongside it
    #[error("artifact kind mismatch: expected {expected}, found {found}")]
    KindMismatch {
        /// Kind the caller asked for
        expected: ArtifactKind,
        /// Kind written in the envelope
        found: String,
    },
    /// Kind string is not recognised
    #[error("unknown artifact kind '{0}'")]
    UnknownKind(String),
    /// Document decoded but breaks a structural rule
    #[error("invalid artifact document: {0}")]
    Invalid(String),
}

impl ArtifactSchemaError {
    /// Structural rule violation
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

impl From<ArtifactSchemaError> for AppError {
    fn from(error: ArtifactSchemaError) -> Self {
        let code = match &error {
            ArtifactSchemaError::UnknownKind(_) => ErrorCode::InvalidInput,
            _ => ErrorCode::SerializationError,
        };
        Self::new(code, error.to_string())
    }
}

/// Kind of generated artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactKind {
    /// Multi-week workout program
    Program,
    /// Daily nutrition plan
    NutritionPlan,
}

impl ArtifactKind {
    /// Storage and wire representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Program => "program",
            Self::NutritionPlan => "nutrition_plan",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtifactKind {
    type Err = ArtifactSchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "program" => Ok(Self::Program),
            "nutrition_plan" | "nutrition" => Ok(Self::NutritionPlan),
            other => Err(ArtifactSchemaError::UnknownKind(other.to_owned())),
        }
    }
}

/// A generated document of either kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArtifactDocument {
    /// Workout program
    Program(Program),
    /// Nutrition plan
    NutritionPlan(NutritionPlan),
}

impl ArtifactDocument {
    /// Kind tag for this document
    #[must_use]
    pub const fn kind(&self) -> ArtifactKind {
        match self {
            Self::Program(_) => ArtifactKind::Program,
            Self::NutritionPlan(_) => ArtifactKind::NutritionPlan,
        }
    }

    /// Decode a raw JSON value as a document of the given kind
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactSchemaError::Malformed`] if the value does not fit the shape
    pub fn from_value(kind: ArtifactKind, value: Value) -> Result<Self, ArtifactSchemaError> {
        if !value.is_object() {
            return Err(ArtifactSchemaError::Malformed(format!(
                "expected a JSON object for {kind}"
            )));
        }
        let decoded = match kind {
            ArtifactKind::Program => serde_json::from_value(value).map(Self::Program),
            ArtifactKind::NutritionPlan => serde_json::from_value(value).map(Self::NutritionPlan),
        };
        decoded.map_err(|e| ArtifactSchemaError::Malformed(e.to_string()))
    }

    /// Apply the structural rules for this document's kind
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactSchemaError::Invalid`] on the first violated rule
    pub fn validate(&self) -> Result<(), ArtifactSchemaError> {
        match self {
            Self::Program(program) => program.validate(),
            Self::NutritionPlan(plan) => plan.validate(),
        }
    }

    /// Borrow the program if this is one
    #[must_use]
    pub const fn as_program(&self) -> Option<&Program> {
        match self {
            Self::Program(p) => Some(p),
            Self::NutritionPlan(_) => None,
        }
    }

    /// Borrow the nutrition plan if this is one
    #[must_use]
    pub const fn as_nutrition_plan(&self) -> Option<&NutritionPlan> {
        match self {
            Self::NutritionPlan(p) => Some(p),
            Self::Program(_) => None,
        }
    }
}

/// Versioned wrapper persisted for every artifact
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtifactEnvelope {
    /// Schema version the document was decoded from
    pub schema_version: u32,
    /// Document kind
    pub kind: ArtifactKind,
    /// The document itself
    pub document: ArtifactDocument,
}

impl ArtifactEnvelope {
    /// Wrap a freshly generated document at the current schema version
    #[must_use]
    pub const fn new(document: ArtifactDocument) -> Self {
        Self {
            schema_version: CURRENT_ARTIFACT_SCHEMA_VERSION,
            kind: document.kind(),
            document,
        }
    }

    /// Serialize to the stored JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decode stored JSON text for an artifact of the given kind
    ///
    /// # Errors
    ///
    /// Returns [`ArtifactSchemaError`] if the text is not JSON, was written by a
    /// newer schema, or carries a different kind
    pub fn decode(kind: ArtifactKind, raw: &str) -> Result<Self, ArtifactSchemaError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| ArtifactSchemaError::Malformed(e.to_string()))?;
        Self::decode_value(kind, value)
    }

    /// Decode an already-parsed JSON value
    ///
    /// # Errors
    ///
    /// See [`ArtifactEnvelope::decode`]
    pub fn decode_value(kind: ArtifactKind, value: Value) -> Result<Self, ArtifactSchemaError> {
        let Value::Object(mut map) = value else {
            return Err(ArtifactSchemaError::Malformed(
                "stored artifact is not a JSON object".to_owned(),
            ));
        };

        let Some(version) = map.get("schema_version").cloned() else {
            // Bare document
            let document = ArtifactDocument::from_value(kind, Value::Object(map))?;
            return Ok(Self {
                schema_version: LEGACY_ARTIFACT_SCHEMA_VERSION,
                kind,
                document,
            });
        };

        let version = version.as_u64().ok_or_else(|| {
            ArtifactSchemaError::Malformed("schema_version must be a positive integer".to_owned())
        })?;
        if version > u64::from(CURRENT_ARTIFACT_SCHEMA_VERSION) {
            return Err(ArtifactSchemaError::UnsupportedVersion {
                found: version,
                supported: CURRENT_ARTIFACT_SCHEMA_VERSION,
            });
        }
        if version == 0 {
            return Err(ArtifactSchemaError::Malformed(
                "schema_version must be a positive integer".to_owned(),
            ));
        }

        if let Some(found) = map.get("kind").and_then(Value::as_str) {
            if found.parse::<ArtifactKind>().ok() != Some(kind) {
                return Err(ArtifactSchemaError::KindMismatch {
                    expected: kind,
                    found: found.to_owned(),
                });
            }
        }

        let document = map.remove("document").unwrap_or(Value::Object(serde_json::Map::new()));
        let document = ArtifactDocument::from_value(kind, document)?;

        Ok(Self {
            schema_version: u32::try_from(version).unwrap_or(CURRENT_ARTIFACT_SCHEMA_VERSION),
            kind,
            document,
        })
    }
}

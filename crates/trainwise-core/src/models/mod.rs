// ABOUTME: Core data models for generated coaching artifacts
// ABOUTME: Re-exports program, nutrition plan, and the versioned artifact envelope
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

/// Versioned envelope, artifact kinds, and schema errors
pub mod artifact;
/// Nutrition plan document
pub mod nutrition;
/// Workout program document
pub mod program;

pub use artifact::{ArtifactDocument, ArtifactEnvelope, ArtifactKind, ArtifactSchemaError};
pub use nutrition::{MealSuggestion, NutritionPlan};
pub use program::{Exercise, Program, ProgramWeek, Workout};

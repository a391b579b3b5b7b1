// ABOUTME: AI-assisted generation of workout programs and nutrition plans
// ABOUTME: Policy, prompts, reply parsing, and the bounded retry orchestrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

/// Reply parsing and schema validation
pub mod extraction;
/// Bounded retry loop and persistence hand-off
pub mod orchestrator;
/// Typed trainer constraints
pub mod parameters;
/// Timeout, attempt, and backoff settings
pub mod policy;
/// System and user prompts
pub mod prompts;

pub use orchestrator::{ArtifactSink, GenerationFailure, GenerationOrchestrator, GenerationRequest};
pub use parameters::{ActivityLevel, ExperienceLevel, NutritionParameters, ProgramParameters};
pub use policy::GenerationPolicy;

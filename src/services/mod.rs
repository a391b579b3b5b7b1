// ABOUTME: Domain service layer between HTTP routes and persistence
// ABOUTME: Readiness check-ins and artifact generation with ownership checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

//! Domain services
//!
//! Route handlers stay thin: they authenticate, parse, and delegate here.

/// Program and nutrition plan generation
pub mod generation;
/// Readiness check-in scoring and storage
pub mod readiness;

pub use generation::{generate_nutrition_plan, generate_program, GenerateError};
pub use readiness::submit_readiness_check_in;

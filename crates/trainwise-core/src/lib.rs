// ABOUTME: Core types and constants for the Trainwise coaching platform
// ABOUTME: Foundation crate with error handling, constants, and artifact schema models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

#![deny(unsafe_code)]

//! # Trainwise Core
//!
//! Shared types for the Trainwise workspace. This crate changes rarely so the
//! server crate gets incremental compilation benefits.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Defaults and limits organized by domain
//! - **models**: Generated artifact documents and their versioned envelope

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Artifact schema models (Program, `NutritionPlan`, envelope)
pub mod models;

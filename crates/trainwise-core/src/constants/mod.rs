// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for limits, schema versions, generation defaults, and headers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

//! Constants module
//!
//! Application constants grouped by domain. Values that operators can change at
//! runtime live in configuration; the numbers here are the defaults that
//! configuration falls back to.

/// Service identity
pub mod service {
    /// Service name used in logs and health responses
    pub const SERVICE_NAME: &str = "trainwise";
    /// Crate version reported in health responses
    pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// HTTP header names
pub mod headers {
    /// Header carrying the authenticated trainer id, set by the upstream gateway
    pub const TRAINER_ID: &str = "x-trainer-id";
    /// Header carrying the request correlation id
    pub const REQUEST_ID: &str = "x-request-id";
}

/// Artifact schema versions
pub mod schema {
    /// Version written by this build
    pub const CURRENT_ARTIFACT_SCHEMA_VERSION: u32 = 2;
    /// Version assigned to bare documents stored without an envelope
    pub const LEGACY_ARTIFACT_SCHEMA_VERSION: u32 = 1;
}

/// Generation orchestrator defaults
pub mod generation {
    /// Wall-clock budget for one provider call
    pub const DEFAULT_ATTEMPT_TIMEOUT_SECS: u64 = 120;
    /// Provider calls per request
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
    /// Wait after failed attempt `n` is entry `n - 1`
    pub const DEFAULT_BACKOFF_SECS: [u64; 3] = [2, 5, 10];
    /// Sampling temperature for structured generation
    pub const GENERATION_TEMPERATURE: f32 = 0.4;
    /// Completion token ceiling for one artifact
    pub const GENERATION_MAX_TOKENS: u32 = 6000;
    /// Fixed message shown when generation could not complete
    pub const BUSY_MESSAGE: &str =
        "The coaching assistant is experiencing high demand. Please try again shortly.";
}

/// Listing and validation limits
pub mod limits {
    /// Default number of readiness entries returned by history listings
    pub const DEFAULT_HISTORY_LIMIT: u32 = 30;
    /// Default page size for artifact listings
    pub const DEFAULT_PAGE_SIZE: u32 = 20;
    /// Upper bound for any listing page
    pub const MAX_PAGE_SIZE: u32 = 100;
    /// Maximum length of client names
    pub const MAX_NAME_LENGTH: usize = 200;
    /// Maximum length of free-text fields
    pub const MAX_TEXT_LENGTH: usize = 2000;
    /// Longest program a trainer can request
    pub const MAX_PROGRAM_WEEKS: u32 = 52;
    /// Longest training session a trainer can request
    pub const MAX_SESSION_MINUTES: u32 = 300;
    /// Maximum meals per day for nutrition plans
    pub const MAX_MEALS_PER_DAY: u32 = 8;
}

// ABOUTME: Coaching intelligence for the Trainwise platform
// ABOUTME: Hosts the pure readiness scoring engine with no I/O dependencies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

#![deny(unsafe_code)]

//! # Trainwise Intelligence
//!
//! Deterministic scoring logic extracted from the server crate for parallel
//! compilation. Nothing here performs I/O or holds state.

/// Daily readiness scoring engine
pub mod readiness;

pub use readiness::{
    DeductionPreset, DeductionTable, EnergyLevel, MuscleSoreness, ReadinessAssessment,
    ReadinessBand, ReadinessCalculator, ReadinessConfig, ReadinessDeductions, ReadinessInput,
    SleepThreshold, StressLevel, UnknownPresetError,
};

// ABOUTME: Application constants re-exported from trainwise-core
// ABOUTME: Service identity, headers, generation defaults, and input limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

pub use trainwise_core::constants::*;

// ABOUTME: HTTP middleware for request tracing and cross-origin access
// ABOUTME: Provides request ID generation, span creation, timeouts, and CORS
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

/// CORS configuration
pub mod cors;
/// Request id, tracing span, and timeout layers
pub mod tracing;

pub use cors::setup_cors;
pub use self::tracing::{create_request_span, with_request_layers};

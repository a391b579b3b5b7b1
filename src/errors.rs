// ABOUTME: Unified error handling re-exported from trainwise-core
// ABOUTME: Keeps `crate::errors` paths stable for the server crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

//! Error types live in `trainwise-core` so the library crates share them.
//! Enable the `http-response` feature there for axum `IntoResponse`.

pub use trainwise_core::errors::*;

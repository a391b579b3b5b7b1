// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports environment-driven server, database, and LLM configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

//! Configuration module for the Trainwise server
//!
//! Configuration is environment-only. `.env` files are honoured in development.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    CorsConfig, DatabaseUrl, Environment, LlmConfig, LlmProviderType, ServerConfig,
};

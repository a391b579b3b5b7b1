// ABOUTME: Main library entry point for the Trainwise coaching server
// ABOUTME: Readiness scoring, bounded AI generation, persistence, and the REST API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

#![deny(unsafe_code)]

//! # Trainwise Server
//!
//! Backend for personal trainers: manage clients, record daily readiness
//! check-ins, and generate workout programs and nutrition plans with an LLM.
//!
//! ## Architecture
//!
//! - **`trainwise-core`**: errors, constants, artifact schema
//! - **`trainwise-intelligence`**: the pure readiness scoring engine
//! - **generation**: bounded retry orchestrator around an [`llm::LlmProvider`]
//! - **database**: `SQLite` storage scoped by trainer
//! - **routes**: axum REST surface
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use trainwise_server::config::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Trainwise configured on port {}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// Application constants
pub mod constants;

/// SQLite persistence
pub mod database;

/// Unified error handling
pub mod errors;

/// Program and nutrition plan generation
pub mod generation;

/// LLM provider abstraction
pub mod llm;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Persisted domain records
pub mod models;

/// Shared server resources
pub mod resources;

/// REST routes
pub mod routes;

/// HTTP server lifecycle
pub mod server;

/// Domain services
pub mod services;

pub use trainwise_intelligence as intelligence;

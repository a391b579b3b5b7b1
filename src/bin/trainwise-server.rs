// ABOUTME: Trainwise server binary
// ABOUTME: Loads configuration, initializes logging, storage, and the LLM provider, then serves HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

//! # Trainwise Server Binary
//!
//! Starts the REST API for trainers with `SQLite` storage and the configured
//! LLM provider.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use trainwise_server::{
    config::ServerConfig, database::Database, llm::create_provider, logging,
    resources::ServerResources, server,
};

#[derive(Parser)]
#[command(name = "trainwise-server")]
#[command(about = "Trainwise - readiness scoring and AI-assisted program design for trainers")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Containers sometimes pass arguments clap does not expect
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Argument parsing failed: {e}");
            eprintln!("Using default configuration");
            Args { http_port: None }
        }
    };

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Trainwise server");
    info!("{}", config.summary());

    let database = Database::new(&config.database_url).await?;
    let provider = create_provider(&config.llm, config.generation.attempt_timeout)?;
    info!(
        "LLM provider ready: {} (default model {})",
        provider.display_name(),
        provider.default_model()
    );

    display_available_endpoints(&config);

    let resources = Arc::new(ServerResources::new(database, provider, config));
    if let Err(e) = server::run(resources).await {
        error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}

/// Log every endpoint with its full URL
#[allow(clippy::cognitive_complexity)]
fn display_available_endpoints(config: &ServerConfig) {
    let base = format!("http://{}:{}", config.host, config.http_port);

    info!("=== Available API Endpoints ===");
    info!("   Health:            GET    {base}/health");
    info!("   Clients:           GET    {base}/api/clients");
    info!("   Create Client:     POST   {base}/api/clients");
    info!("   Client:            GET    {base}/api/clients/{{id}}");
    info!("   Delete Client:     DELETE {base}/api/clients/{{id}}");
    info!("   Readiness Check-in: POST  {base}/api/clients/{{id}}/readiness");
    info!("   Readiness History: GET    {base}/api/clients/{{id}}/readiness");
    info!("   Latest Readiness:  GET    {base}/api/clients/{{id}}/readiness/latest");
    info!("   Generate Program:  POST   {base}/api/clients/{{id}}/programs");
    info!("   Generate Nutrition: POST  {base}/api/clients/{{id}}/nutrition-plans");
    info!("   Artifacts:         GET    {base}/api/artifacts");
    info!("   Artifact:          GET    {base}/api/artifacts/{{id}}");
    info!("   Delete Artifact:   DELETE {base}/api/artifacts/{{id}}");
    info!("=== End of Endpoint List ===");
}

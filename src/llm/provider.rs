// ABOUTME: LLM provider selection from server configuration
// ABOUTME: Builds the Groq or local OpenAI-compatible provider behind the LlmProvider trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use super::{LlmProvider, OpenAiCompatibleConfig, OpenAiCompatibleProvider};
use crate::config::{LlmConfig, LlmProviderType};
use crate::errors::AppError;

/// Build the configured provider
///
/// The HTTP client's own timeout is sized from `attempt_timeout` so a slow
/// reply is always reported as a generation timeout rather than a transport
/// failure.
///
/// # Errors
///
/// Returns a config error when Groq is selected without `GROQ_API_KEY`, or an
/// internal error if the HTTP client cannot be built
pub fn create_provider(
    config: &LlmConfig,
    attempt_timeout: Duration,
) -> Result<Arc<dyn LlmProvider>, AppError> {
    let provider_config = match config.provider {
        LlmProviderType::Groq => {
            let api_key = config.groq_api_key.clone().ok_or_else(|| {
                AppError::config(format!(
                    "GROQ_API_KEY is required when {} is 'groq'",
                    LlmProviderType::ENV_VAR
                ))
            })?;
            OpenAiCompatibleConfig::groq(api_key, config.groq_model.clone())
        }
        LlmProviderType::Local => OpenAiCompatibleConfig::local(
            config.local_base_url.clone(),
            config.local_model.clone(),
            config.local_api_key.clone(),
        ),
    };

    let provider_config = provider_config.with_attempt_timeout(attempt_timeout);

    info!(
        "Initializing LLM provider: {} (base_url={}, model={}; set {} to change)",
        provider_config.display_name,
        provider_config.base_url,
        provider_config.default_model,
        LlmProviderType::ENV_VAR
    );

    let provider = OpenAiCompatibleProvider::new(provider_config)?;
    Ok(Arc::new(provider))
}

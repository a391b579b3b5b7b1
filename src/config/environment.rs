// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses server, database, LLM, generation, and readiness settings from env vars
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

//! Environment-based configuration management

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};
use trainwise_intelligence::{DeductionPreset, ReadinessConfig};

use crate::generation::GenerationPolicy;

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is production
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatabaseUrl {
    /// `SQLite` database file
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from a `DATABASE_URL` value
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to an sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_owned(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Default for DatabaseUrl {
    fn default() -> Self {
        Self::SQLite {
            path: PathBuf::from("./data/trainwise.db"),
        }
    }
}

impl fmt::Display for DatabaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_connection_string())
    }
}

/// Which LLM backend generates artifacts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmProviderType {
    /// Groq cloud inference (default)
    #[default]
    Groq,
    /// Local `OpenAI`-compatible endpoint (Ollama, vLLM, `LocalAI`)
    Local,
}

impl LlmProviderType {
    /// Environment variable name for LLM provider selection
    pub const ENV_VAR: &'static str = "TRAINWISE_LLM_PROVIDER";

    /// Parse from string with fallback to default
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "local" | "ollama" | "vllm" | "localai" => Self::Local,
            _ => Self::Groq,
        }
    }

    /// Load from environment variable
    #[must_use]
    pub fn from_env() -> Self {
        env::var(Self::ENV_VAR)
            .map(|s| Self::from_str_or_default(&s))
            .unwrap_or_default()
    }
}

impl fmt::Display for LlmProviderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Groq => write!(f, "groq"),
            Self::Local => write!(f, "local"),
        }
    }
}

/// LLM provider settings
#[derive(Debug, Clone, Default)]
pub struct LlmConfig {
    /// Selected backend
    pub provider: LlmProviderType,
    /// `GROQ_API_KEY`
    pub groq_api_key: Option<String>,
    /// `GROQ_MODEL` override
    pub groq_model: Option<String>,
    /// `LOCAL_LLM_BASE_URL` override
    pub local_base_url: Option<String>,
    /// `LOCAL_LLM_MODEL` override
    pub local_model: Option<String>,
    /// `LOCAL_LLM_API_KEY`
    pub local_api_key: Option<String>,
}

impl LlmConfig {
    /// Load LLM settings from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            provider: LlmProviderType::from_env(),
            groq_api_key: non_empty_var("GROQ_API_KEY"),
            groq_model: non_empty_var("GROQ_MODEL"),
            local_base_url: non_empty_var("LOCAL_LLM_BASE_URL"),
            local_model: non_empty_var("LOCAL_LLM_MODEL"),
            local_api_key: non_empty_var("LOCAL_LLM_API_KEY"),
        }
    }
}

/// CORS settings
#[derive(Debug, Clone)]
pub struct CorsConfig {
    /// Comma-separated origins, or `*`
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "*".to_owned(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Database location
    pub database_url: DatabaseUrl,
    /// LLM provider settings
    pub llm: LlmConfig,
    /// Generation bounds
    pub generation: GenerationPolicy,
    /// Readiness scoring settings
    pub readiness: ReadinessConfig,
    /// Whole-request timeout applied by the HTTP layer
    pub request_timeout: Duration,
    /// CORS settings
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let generation = GenerationPolicy::default();
        Self {
            http_port: 8081,
            host: "0.0.0.0".to_owned(),
            environment: Environment::default(),
            database_url: DatabaseUrl::default(),
            llm: LlmConfig::default(),
            request_timeout: default_request_timeout(&generation),
            generation,
            readiness: ReadinessConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but unparseable, or if the
    /// resulting configuration fails validation
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {e}");
        }

        let generation = GenerationPolicy {
            attempt_timeout: Duration::from_secs(
                env_var_or("GENERATION_TIMEOUT_SECS", "120")
                    .parse()
                    .context("Invalid GENERATION_TIMEOUT_SECS value")?,
            ),
            max_attempts: env_var_or("GENERATION_MAX_ATTEMPTS", "3")
                .parse()
                .context("Invalid GENERATION_MAX_ATTEMPTS value")?,
            backoff_schedule: GenerationPolicy::parse_backoff_schedule(&env_var_or(
                "GENERATION_BACKOFF_SECS",
                "2,5,10",
            ))
            .context("Invalid GENERATION_BACKOFF_SECS value")?,
        };

        let readiness = ReadinessConfig {
            preset: env_var_or("READINESS_TABLE", DeductionPreset::Standard.as_str())
                .parse()
                .context("Invalid READINESS_TABLE value")?,
        };

        let request_timeout = match env::var("HTTP_REQUEST_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse()
                    .context("Invalid HTTP_REQUEST_TIMEOUT_SECS value")?,
            ),
            Err(_) => default_request_timeout(&generation),
        };

        let config = Self {
            http_port: env_var_or("HTTP_PORT", "8081")
                .parse()
                .context("Invalid HTTP_PORT value")?,
            host: env_var_or("HOST", "0.0.0.0"),
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            database_url: DatabaseUrl::parse_url(&env_var_or(
                "DATABASE_URL",
                "sqlite:./data/trainwise.db",
            )),
            llm: LlmConfig::from_env(),
            generation,
            readiness,
            request_timeout,
            cors: CorsConfig {
                allowed_origins: env_var_or("CORS_ALLOWED_ORIGINS", "*"),
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error for settings the server cannot run with
    pub fn validate(&self) -> Result<()> {
        self.generation
            .validate()
            .map_err(|e| anyhow::anyhow!(e.message))?;

        if self.host.trim().is_empty() {
            return Err(anyhow::anyhow!("HOST cannot be empty"));
        }

        if self.llm.provider == LlmProviderType::Groq && self.llm.groq_api_key.is_none() {
            warn!("GROQ_API_KEY is not set; program and nutrition generation will fail");
        }

        if self.request_timeout < self.generation.worst_case_duration() {
            warn!(
                "HTTP request timeout ({}s) is shorter than worst-case generation ({}s); \
                 slow generations will be cut off by the HTTP layer",
                self.request_timeout.as_secs(),
                self.generation.worst_case_duration().as_secs()
            );
        }

        Ok(())
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        let backoff: Vec<String> = self
            .generation
            .backoff_schedule
            .iter()
            .map(|d| d.as_secs().to_string())
            .collect();

        format!(
            "Trainwise Server Configuration:\n\
             - Environment: {}\n\
             - Bind: {}:{}\n\
             - Database: {}\n\
             - LLM Provider: {} ({})\n\
             - Generation: timeout {}s, {} attempts, backoff [{}]s\n\
             - Readiness Table: {}\n\
             - Request Timeout: {}s",
            self.environment,
            self.host,
            self.http_port,
            if self.database_url.is_memory() {
                "SQLite (in-memory)"
            } else {
                "SQLite"
            },
            self.llm.provider,
            if self.llm.groq_api_key.is_some() || self.llm.provider == LlmProviderType::Local {
                "configured"
            } else {
                "missing credentials"
            },
            self.generation.attempt_timeout.as_secs(),
            self.generation.max_attempts,
            backoff.join(", "),
            self.readiness.preset,
            self.request_timeout.as_secs(),
        )
    }
}

/// HTTP timeout leaves headroom over the slowest possible generation
fn default_request_timeout(generation: &GenerationPolicy) -> Duration {
    generation.worst_case_duration() + Duration::from_secs(30)
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

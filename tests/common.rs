// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, in-memory databases, scripted LLM providers, and recording sinks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `trainwise_server`

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use trainwise_server::{
    config::ServerConfig,
    database::Database,
    errors::{AppError, AppResult},
    generation::{ArtifactSink, GenerationPolicy},
    llm::{ChatRequest, ChatResponse, LlmCapabilities, LlmProvider},
    models::{NewArtifact, StoredArtifact},
    resources::ServerResources,
};
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::in_memory().await.expect("in-memory database")
}

/// A workout program reply that passes validation
pub const VALID_PROGRAM_JSON: &str = r#"{
    "name": "Foundations",
    "goal": "General strength",
    "duration_weeks": 1,
    "weeks": [
        {
            "week_number": 1,
            "focus": "Technique",
            "workouts": [
                {
                    "day": "Monday",
                    "name": "Full body A",
                    "exercises": [
                        {"name": "Goblet squat", "sets": 3, "reps": "10", "rest": "90s"},
                        {"name": "Push-up", "sets": 3, "reps": 8, "rest": 60}
                    ]
                }
            ]
        }
    ]
}"#;

/// A nutrition plan reply that passes validation
pub const VALID_NUTRITION_JSON: &str = r#"{
    "daily_calories": 2300,
    "protein_g": 170,
    "carbs_g": 240,
    "fats_g": 70,
    "meal_suggestions": [
        {"meal": "Breakfast", "name": "Oats", "description": "Oats with whey and banana", "calories": 600}
    ]
}"#;

/// One scripted provider behaviour
#[derive(Debug, Clone)]
pub enum Step {
    /// Reply immediately with this content
    Reply(String),
    /// Reply with this content after a delay
    DelayedReply(Duration, String),
    /// Return a provider error
    Fail,
    /// Never answer
    Hang,
}

/// LLM provider that plays back a script, one step per call
pub struct ScriptedProvider {
    steps: Mutex<VecDeque<Step>>,
    calls: AtomicU32,
}

impl ScriptedProvider {
    pub fn new(steps: impl IntoIterator<Item = Step>) -> Arc<Self> {
        Arc::new(Self {
            steps: Mutex::new(steps.into_iter().collect()),
            calls: AtomicU32::new(0),
        })
    }

    /// Provider that always returns `content`
    pub fn always(content: &str) -> Arc<Self> {
        Self::new(std::iter::repeat(Step::Reply(content.to_owned())).take(16))
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn display_name(&self) -> &'static str {
        "Scripted"
    }

    fn capabilities(&self) -> LlmCapabilities {
        LlmCapabilities::JSON_MODE | LlmCapabilities::SYSTEM_MESSAGES
    }

    fn default_model(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, _request: &ChatRequest) -> Result<ChatResponse, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.lock().unwrap().pop_front().unwrap_or(Step::Fail);

        let content = match step {
            Step::Reply(content) => content,
            Step::DelayedReply(delay, content) => {
                tokio::time::sleep(delay).await;
                content
            }
            Step::Fail => {
                return Err(AppError::external_service("Scripted", "upstream exploded"));
            }
            Step::Hang => std::future::pending().await,
        };

        Ok(ChatResponse {
            content,
            model: "scripted-model".to_owned(),
            usage: None,
            finish_reason: Some("stop".to_owned()),
        })
    }
}

/// Sink that keeps inserted artifacts in memory and can fail on demand
#[derive(Default)]
pub struct RecordingSink {
    inserted: Mutex<Vec<NewArtifact>>,
    failures_remaining: AtomicU32,
    insert_calls: AtomicU32,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Sink whose first `n` inserts fail
    pub fn failing(n: u32) -> Arc<Self> {
        let sink = Self::default();
        sink.failures_remaining.store(n, Ordering::SeqCst);
        Arc::new(sink)
    }

    pub fn inserted(&self) -> Vec<NewArtifact> {
        self.inserted.lock().unwrap().clone()
    }

    pub fn insert_calls(&self) -> u32 {
        self.insert_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ArtifactSink for RecordingSink {
    async fn insert_artifact(&self, artifact: &NewArtifact) -> AppResult<StoredArtifact> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        let remaining = self.failures_remaining.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures_remaining.store(remaining - 1, Ordering::SeqCst);
            return Err(AppError::database("disk I/O error"));
        }

        self.inserted.lock().unwrap().push(artifact.clone());
        Ok(StoredArtifact {
            id: Uuid::new_v4(),
            owner_id: artifact.owner_id,
            client_id: artifact.client_id,
            kind: artifact.kind(),
            schema_version: artifact.envelope.schema_version,
            document: artifact.envelope.document.clone(),
            parameters: artifact.parameters.clone(),
            model: artifact.model.clone(),
            attempts: artifact.attempts,
            created_at: Utc::now(),
        })
    }
}

/// Generation policy with short timings for real-time tests
pub fn fast_policy() -> GenerationPolicy {
    GenerationPolicy {
        attempt_timeout: Duration::from_secs(5),
        max_attempts: 3,
        backoff_schedule: vec![Duration::from_millis(10)],
    }
}

/// Server resources over an in-memory database and a scripted provider
pub async fn create_test_resources(provider: Arc<dyn LlmProvider>) -> Arc<ServerResources> {
    let database = create_test_database().await;
    let config = ServerConfig {
        generation: fast_policy(),
        ..ServerConfig::default()
    };
    Arc::new(ServerResources::new(database, provider, config))
}

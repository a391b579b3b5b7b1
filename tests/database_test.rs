// ABOUTME: Integration tests for SQLite storage of clients, readiness scores, and artifacts
// ABOUTME: Verifies owner scoping, listing filters, cascade deletes, and legacy document decoding
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use chrono::Utc;
use serde_json::json;
use trainwise_core::constants::schema::{
    CURRENT_ARTIFACT_SCHEMA_VERSION, LEGACY_ARTIFACT_SCHEMA_VERSION,
};
use trainwise_core::models::{ArtifactDocument, ArtifactEnvelope, ArtifactKind};
use trainwise_server::config::DatabaseUrl;
use trainwise_server::database::Database;
use trainwise_server::errors::ErrorCode;
use trainwise_server::generation::ArtifactSink;
use trainwise_server::intelligence::{
    DeductionTable, EnergyLevel, MuscleSoreness, ReadinessCalculator, ReadinessInput, StressLevel,
};
use trainwise_server::models::{
    ArtifactFilter, Client, CreateClientRequest, NewArtifact, ReadinessScore,
};
use uuid::Uuid;

async fn create_client(database: &Database, owner: Uuid, name: &str) -> Client {
    database
        .clients()
        .create(
            owner,
            &CreateClientRequest {
                name: name.to_owned(),
                goals: None,
            },
        )
        .await
        .unwrap()
}

fn new_artifact(owner: Uuid, client: Uuid, raw: &str, kind: ArtifactKind) -> NewArtifact {
    let value: serde_json::Value = serde_json::from_str(raw).unwrap();
    NewArtifact {
        owner_id: owner,
        client_id: client,
        envelope: ArtifactEnvelope::new(ArtifactDocument::from_value(kind, value).unwrap()),
        parameters: json!({ "goal": "strength" }),
        model: "test-model".to_owned(),
        attempts: 1,
    }
}

fn score(owner: Uuid, client: Uuid) -> ReadinessScore {
    let input = ReadinessInput {
        sleep_hours: 7.5,
        stress_level: StressLevel::Medium,
        muscle_soreness: MuscleSoreness::Mild,
        energy_level: EnergyLevel::High,
        date: Utc::now(),
    };
    let assessment = ReadinessCalculator::score(&input, &DeductionTable::standard());
    ReadinessScore::new(owner, client, &input, &assessment)
}

#[tokio::test]
async fn test_clients_are_scoped_to_owner() {
    let database = common::create_test_database().await;
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let client = create_client(&database, alice, "  Riley  ").await;
    create_client(&database, bob, "Morgan").await;

    assert_eq!(client.name, "Riley");
    assert_eq!(database.clients().list(alice).await.unwrap().len(), 1);
    assert!(database.clients().get(bob, client.id).await.unwrap().is_none());

    let err = database.clients().require(bob, client.id).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);

    assert!(!database.clients().delete(bob, client.id).await.unwrap());
    assert!(database.clients().delete(alice, client.id).await.unwrap());
    assert!(database.clients().get(alice, client.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_client_list_contains_only_own_clients() {
    let database = common::create_test_database().await;
    let owner = Uuid::new_v4();
    for name in ["Avery", "Jordan", "Quinn"] {
        create_client(&database, owner, name).await;
    }
    create_client(&database, Uuid::new_v4(), "Stranger").await;

    let clients = database.clients().list(owner).await.unwrap();
    assert_eq!(clients.len(), 3);
    assert!(clients.iter().all(|c| c.owner_id == owner));
}

#[tokio::test]
async fn test_readiness_history_respects_limit_and_owner() {
    let database = common::create_test_database().await;
    let owner = Uuid::new_v4();
    let client = create_client(&database, owner, "Casey").await;

    for _ in 0..5 {
        database.readiness().insert(&score(owner, client.id)).await.unwrap();
    }

    let limited = database.readiness().history(owner, client.id, 3).await.unwrap();
    assert_eq!(limited.len(), 3);
    assert!(limited.windows(2).all(|w| w[0].date >= w[1].date));

    let foreign = database
        .readiness()
        .history(Uuid::new_v4(), client.id, 30)
        .await
        .unwrap();
    assert!(foreign.is_empty());
}

#[tokio::test]
async fn test_readiness_record_round_trips_levels() {
    let database = common::create_test_database().await;
    let owner = Uuid::new_v4();
    let client = create_client(&database, owner, "Casey").await;
    let record = score(owner, client.id);
    database.readiness().insert(&record).await.unwrap();

    let stored = database.readiness().latest(owner, client.id).await.unwrap().unwrap();
    assert_eq!(stored.id, record.id);
    assert_eq!(stored.score, 100 - 12 - 7);
    assert_eq!(stored.stress_level, StressLevel::Medium);
    assert_eq!(stored.muscle_soreness, MuscleSoreness::Mild);
    assert_eq!(stored.band, record.band);
    assert_eq!(stored.recommendation, record.recommendation);
}

#[tokio::test]
async fn test_artifact_insert_and_get() {
    let database = common::create_test_database().await;
    let owner = Uuid::new_v4();
    let client = create_client(&database, owner, "Drew").await;

    let stored = database
        .insert_artifact(&new_artifact(
            owner,
            client.id,
            common::VALID_PROGRAM_JSON,
            ArtifactKind::Program,
        ))
        .await
        .unwrap();
    assert_eq!(stored.schema_version, CURRENT_ARTIFACT_SCHEMA_VERSION);

    let fetched = database.artifacts().get(owner, stored.id).await.unwrap().unwrap();
    assert_eq!(fetched.kind, ArtifactKind::Program);
    assert_eq!(fetched.document, stored.document);
    assert_eq!(fetched.parameters["goal"], "strength");
    assert_eq!(fetched.model, "test-model");

    assert!(database
        .artifacts()
        .get(Uuid::new_v4(), stored.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_artifact_list_filters() {
    let database = common::create_test_database().await;
    let owner = Uuid::new_v4();
    let first = create_client(&database, owner, "Emery").await;
    let second = create_client(&database, owner, "Finley").await;
    let artifacts = database.artifacts();

    artifacts
        .insert(&new_artifact(owner, first.id, common::VALID_PROGRAM_JSON, ArtifactKind::Program))
        .await
        .unwrap();
    artifacts
        .insert(&new_artifact(
            owner,
            first.id,
            common::VALID_NUTRITION_JSON,
            ArtifactKind::NutritionPlan,
        ))
        .await
        .unwrap();
    artifacts
        .insert(&new_artifact(owner, second.id, common::VALID_PROGRAM_JSON, ArtifactKind::Program))
        .await
        .unwrap();

    let all = artifacts
        .list(
            owner,
            &ArtifactFilter {
                limit: 20,
                ..ArtifactFilter::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let programs = artifacts
        .list(
            owner,
            &ArtifactFilter {
                kind: Some(ArtifactKind::Program),
                limit: 20,
                ..ArtifactFilter::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(programs.len(), 2);

    let first_client_plans = artifacts
        .list(
            owner,
            &ArtifactFilter {
                client_id: Some(first.id),
                kind: Some(ArtifactKind::NutritionPlan),
                limit: 20,
                offset: 0,
            },
        )
        .await
        .unwrap();
    assert_eq!(first_client_plans.len(), 1);

    let paged = artifacts
        .list(
            owner,
            &ArtifactFilter {
                limit: 2,
                offset: 2,
                ..ArtifactFilter::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(paged.len(), 1);

    let foreign = artifacts
        .list(
            Uuid::new_v4(),
            &ArtifactFilter {
                limit: 20,
                ..ArtifactFilter::default()
            },
        )
        .await
        .unwrap();
    assert!(foreign.is_empty());
}

#[tokio::test]
async fn test_deleting_client_cascades() {
    let database = common::create_test_database().await;
    let owner = Uuid::new_v4();
    let client = create_client(&database, owner, "Harper").await;

    database.readiness().insert(&score(owner, client.id)).await.unwrap();
    let artifact = database
        .artifacts()
        .insert(&new_artifact(owner, client.id, common::VALID_PROGRAM_JSON, ArtifactKind::Program))
        .await
        .unwrap();

    assert!(database.clients().delete(owner, client.id).await.unwrap());

    assert!(database.readiness().latest(owner, client.id).await.unwrap().is_none());
    assert!(database.artifacts().get(owner, artifact.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_artifact_for_unknown_client_is_rejected() {
    let database = common::create_test_database().await;
    let err = database
        .artifacts()
        .insert(&new_artifact(
            Uuid::new_v4(),
            Uuid::new_v4(),
            common::VALID_PROGRAM_JSON,
            ArtifactKind::Program,
        ))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DatabaseError);
}

#[tokio::test]
async fn test_legacy_bare_document_decodes_as_version_one() {
    let database = common::create_test_database().await;
    let owner = Uuid::new_v4();
    let client = create_client(&database, owner, "Jules").await;
    let id = Uuid::new_v4();

    // Written before documents were wrapped in an envelope; meal calories absent
    let legacy = json!({
        "daily_calories": 2100,
        "protein_g": 150,
        "carbs_g": 220,
        "fats_g": 65,
        "meal_suggestions": [{ "meal": "Lunch", "name": "Rice bowl", "description": "Chicken and rice" }]
    });

    sqlx::query(
        "INSERT INTO artifacts (id, owner_id, client_id, kind, schema_version, document, \
         parameters, model, attempts, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(owner.to_string())
    .bind(client.id.to_string())
    .bind("nutrition_plan")
    .bind(1_i64)
    .bind(legacy.to_string())
    .bind("{}")
    .bind("legacy-model")
    .bind(1_i64)
    .bind(Utc::now().to_rfc3339())
    .execute(database.pool())
    .await
    .unwrap();

    let stored = database.artifacts().get(owner, id).await.unwrap().unwrap();
    assert_eq!(stored.schema_version, LEGACY_ARTIFACT_SCHEMA_VERSION);
    let plan = stored.document.as_nutrition_plan().unwrap();
    assert_eq!(plan.meal_suggestions[0].calories, None);
    assert!(plan.notes.is_none());
}

#[tokio::test]
async fn test_file_database_creates_parent_directory() {
    common::init_test_logging();
    let dir = std::env::temp_dir().join(format!("trainwise-test-{}", Uuid::new_v4()));
    let path = dir.join("nested").join("trainwise.db");

    let database = Database::new(&DatabaseUrl::SQLite { path: path.clone() })
        .await
        .unwrap();
    let owner = Uuid::new_v4();
    create_client(&database, owner, "Kai").await;
    drop(database);

    let reopened = Database::new(&DatabaseUrl::SQLite { path: path.clone() })
        .await
        .unwrap();
    assert_eq!(reopened.clients().list(owner).await.unwrap().len(), 1);

    drop(reopened);
    let _ = std::fs::remove_dir_all(&dir);
}

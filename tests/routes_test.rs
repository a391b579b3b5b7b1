// ABOUTME: HTTP-level tests for the REST API using tower oneshot requests
// ABOUTME: Exercises auth, client CRUD, readiness check-ins, generation outcomes, and artifact access
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use common::{ScriptedProvider, Step, VALID_NUTRITION_JSON, VALID_PROGRAM_JSON};
use serde_json::{json, Value};
use tower::ServiceExt;
use trainwise_server::constants::generation::BUSY_MESSAGE;
use trainwise_server::constants::headers::TRAINER_ID;
use trainwise_server::llm::LlmProvider;
use trainwise_server::routes::build_router;
use uuid::Uuid;

async fn app_with(provider: Arc<dyn LlmProvider>) -> Router {
    let resources = common::create_test_resources(provider).await;
    build_router(&resources)
}

async fn app() -> Router {
    app_with(ScriptedProvider::always(VALID_PROGRAM_JSON)).await
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    trainer: Option<Uuid>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(trainer) = trainer {
        builder = builder.header(TRAINER_ID, trainer.to_string());
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_client(app: &Router, trainer: Uuid, name: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/clients",
        Some(trainer),
        Some(json!({ "name": name, "goals": "Get stronger" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn test_health_reports_provider_and_database() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "trainwise");
    assert_eq!(body["llm_provider"], "scripted");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_missing_trainer_header_is_unauthorized() {
    let app = app().await;
    let (status, body) = send(&app, Method::GET, "/api/clients", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_REQUIRED");
}

#[tokio::test]
async fn test_malformed_trainer_header_is_unauthorized() {
    let app = app().await;
    let request = Request::builder()
        .uri("/api/clients")
        .header(TRAINER_ID, "not-a-uuid")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = app().await;
    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_client_crud() {
    let app = app().await;
    let trainer = Uuid::new_v4();
    let id = create_client(&app, trainer, "Robin").await;

    let (status, body) = send(&app, Method::GET, "/api/clients", Some(trainer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["clients"][0]["name"], "Robin");

    let uri = format!("/api/clients/{id}");
    let (status, body) = send(&app, Method::GET, &uri, Some(trainer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["goals"], "Get stronger");

    let (status, _) = send(&app, Method::DELETE, &uri, Some(trainer), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &uri, Some(trainer), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_blank_client_name_is_rejected() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/clients",
        Some(Uuid::new_v4()),
        Some(json!({ "name": "   " })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_invalid_client_id_is_bad_request() {
    let app = app().await;
    let (status, _) = send(
        &app,
        Method::GET,
        "/api/clients/12345",
        Some(Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_readiness_check_in_and_history() {
    let app = app().await;
    let trainer = Uuid::new_v4();
    let id = create_client(&app, trainer, "Alex").await;
    let uri = format!("/api/clients/{id}/readiness");

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(trainer),
        Some(json!({
            "sleepHours": 8,
            "stressLevel": "low",
            "muscleSoreness": "none",
            "energyLevel": "high",
            "date": "2025-03-10T07:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["score"], 100);
    assert_eq!(body["band"], "excellent");

    let (status, body) = send(
        &app,
        Method::POST,
        &uri,
        Some(trainer),
        Some(json!({
            "sleepHours": 5,
            "stressLevel": "high",
            "muscleSoreness": "severe",
            "energyLevel": "low",
            "date": "2025-03-11T07:00:00Z"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["score"], 0);
    assert_eq!(body["band"], "low");

    let (status, body) = send(&app, Method::GET, &uri, Some(trainer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["scores"][0]["score"], 0);
    assert_eq!(body["scores"][1]["score"], 100);

    let (status, body) = send(&app, Method::GET, &format!("{uri}?limit=1"), Some(trainer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);

    let (status, body) = send(&app, Method::GET, &format!("{uri}/latest"), Some(trainer), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 0);
}

#[tokio::test]
async fn test_check_in_missing_field_returns_error_envelope() {
    let app = app().await;
    let trainer = Uuid::new_v4();
    let id = create_client(&app, trainer, "Casey").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/clients/{id}/readiness"),
        Some(trainer),
        Some(json!({ "stressLevel": "high" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert!(body["error"]["message"].as_str().unwrap().contains("sleep"));
}

#[tokio::test]
async fn test_unparseable_body_returns_error_envelope() {
    let app = app().await;
    let trainer = Uuid::new_v4();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/clients")
        .header(TRAINER_ID, trainer.to_string())
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/clients")
        .header(TRAINER_ID, trainer.to_string())
        .body(Body::from(json!({ "name": "Drew" }).to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_latest_without_check_ins_is_not_found() {
    let app = app().await;
    let trainer = Uuid::new_v4();
    let id = create_client(&app, trainer, "Blake").await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/clients/{id}/readiness/latest"),
        Some(trainer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_program_generation_stores_artifact() {
    let app = app().await;
    let trainer = Uuid::new_v4();
    let id = create_client(&app, trainer, "Charlie").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/clients/{id}/programs"),
        Some(trainer),
        Some(json!({ "goal": "strength", "experienceLevel": "intermediate", "daysPerWeek": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["kind"], "program");
    assert_eq!(body["attempts"], 1);
    assert_eq!(body["document"]["name"], "Foundations");
    assert_eq!(body["parameters"]["daysPerWeek"], 3);

    let artifact_id = body["id"].as_str().unwrap().to_owned();
    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/artifacts/{artifact_id}"),
        Some(trainer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["schema_version"], 2);
}

#[tokio::test]
async fn test_nutrition_generation_stores_artifact() {
    let app = app_with(ScriptedProvider::always(VALID_NUTRITION_JSON)).await;
    let trainer = Uuid::new_v4();
    let id = create_client(&app, trainer, "Dakota").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/clients/{id}/nutrition-plans"),
        Some(trainer),
        Some(json!({ "goal": "fat loss", "bodyWeightKg": 82.5, "activityLevel": "active" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["kind"], "nutrition_plan");
    assert_eq!(body["document"]["daily_calories"], 2300.0);
}

#[tokio::test]
async fn test_exhausted_generation_returns_busy_message() {
    let provider = ScriptedProvider::new([Step::Fail, Step::Fail, Step::Fail]);
    let app = app_with(provider.clone()).await;
    let trainer = Uuid::new_v4();
    let id = create_client(&app, trainer, "Eden").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/clients/{id}/programs"),
        Some(trainer),
        Some(json!({ "goal": "strength" })),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "EXTERNAL_SERVICE_UNAVAILABLE");
    assert_eq!(body["error"]["message"], BUSY_MESSAGE);
    assert_eq!(body["error"]["details"]["attempts"], 3);
    assert!(!body.to_string().contains("upstream exploded"));
    assert_eq!(provider.calls(), 3);

    let (_, body) = send(&app, Method::GET, "/api/artifacts", Some(trainer), None).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn test_invalid_parameters_skip_the_provider() {
    let provider = ScriptedProvider::always(VALID_PROGRAM_JSON);
    let app = app_with(provider.clone()).await;
    let trainer = Uuid::new_v4();
    let id = create_client(&app, trainer, "Finn").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/clients/{id}/programs"),
        Some(trainer),
        Some(json!({ "goal": "strength", "daysPerWeek": 9 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_generation_for_unknown_client_is_not_found() {
    let provider = ScriptedProvider::always(VALID_PROGRAM_JSON);
    let app = app_with(provider.clone()).await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/clients/{}/programs", Uuid::new_v4()),
        Some(Uuid::new_v4()),
        Some(json!({ "goal": "strength" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_artifact_listing_and_delete() {
    let app = app().await;
    let trainer = Uuid::new_v4();
    let id = create_client(&app, trainer, "Gray").await;

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            Method::POST,
            &format!("/api/clients/{id}/programs"),
            Some(trainer),
            Some(json!({ "goal": "hypertrophy" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/artifacts?client_id={id}&kind=program&limit=500"),
        Some(trainer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);
    assert_eq!(body["limit"], 100);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/artifacts?kind=meal",
        Some(trainer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");

    let (_, body) = send(&app, Method::GET, "/api/artifacts?limit=1", Some(trainer), None).await;
    let artifact_id = body["artifacts"][0]["id"].as_str().unwrap().to_owned();
    let uri = format!("/api/artifacts/{artifact_id}");

    let (status, _) = send(&app, Method::DELETE, &uri, Some(trainer), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(trainer), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_other_trainers_resources_are_invisible() {
    let app = app().await;
    let owner = Uuid::new_v4();
    let intruder = Uuid::new_v4();
    let id = create_client(&app, owner, "Hollis").await;

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/clients/{id}/programs"),
        Some(owner),
        Some(json!({ "goal": "endurance" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let artifact_id = body["id"].as_str().unwrap().to_owned();

    for (method, uri) in [
        (Method::GET, format!("/api/clients/{id}")),
        (Method::DELETE, format!("/api/clients/{id}")),
        (Method::GET, format!("/api/clients/{id}/readiness")),
        (Method::GET, format!("/api/artifacts/{artifact_id}")),
        (Method::DELETE, format!("/api/artifacts/{artifact_id}")),
    ] {
        let (status, _) = send(&app, method, &uri, Some(intruder), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
    }

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/clients/{id}/readiness"),
        Some(intruder),
        Some(json!({ "sleepHours": 8 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, Method::GET, "/api/artifacts", Some(intruder), None).await;
    assert_eq!(body["total"], 0);

    // Still intact for the owner
    let (status, _) = send(
        &app,
        Method::GET,
        &format!("/api/artifacts/{artifact_id}"),
        Some(owner),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

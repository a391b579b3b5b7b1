// ABOUTME: Request body extractor that reports malformed JSON through AppError
// ABOUTME: Keeps body rejections in the same error envelope as every other failure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use async_trait::async_trait;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::errors::AppError;

/// JSON request body whose rejections render as `INVALID_INPUT`
///
/// Drop-in for [`axum::Json`] on the request side. Missing fields, wrong
/// types, unparseable bodies and a missing `Content-Type` all become a 400
/// with the standard error body.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(rejection_to_error(&rejection)),
        }
    }
}

fn rejection_to_error(rejection: &JsonRejection) -> AppError {
    tracing::debug!(status = %rejection.status(), "Rejected request body: {}", rejection.body_text());
    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            AppError::invalid_input("Request body must be sent with Content-Type: application/json")
        }
        _ => AppError::invalid_input(format!("Invalid request body: {}", rejection.body_text())),
    }
}

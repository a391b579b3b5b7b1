// ABOUTME: Pulls the JSON document out of a model reply and checks it against the artifact schema
// ABOUTME: Tolerates markdown fences and stray prose around the object
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Trainwise Contributors

use serde_json::Value;
use trainwise_core::models::{ArtifactDocument, ArtifactKind, ArtifactSchemaError};

/// Locate the first complete JSON object in `reply`
///
/// Accepts a bare object, an object inside ```` ```json ```` fences, or an
/// object surrounded by prose. Each `{` is tried in order and the first one
/// that starts a well-formed object wins, so braces in trailing prose are
/// ignored.
#[must_use]
pub fn extract_json_object(reply: &str) -> Option<&str> {
    reply.match_indices('{').find_map(|(start, _)| {
        let candidate = &reply[start..];
        let mut stream = serde_json::Deserializer::from_str(candidate).into_iter::<Value>();
        match stream.next() {
            Some(Ok(Value::Object(_))) => Some(&candidate[..stream.byte_offset()]),
            _ => None,
        }
    })
}

/// Parse and validate a model reply as a document of `kind`
///
/// # Errors
///
/// Returns [`ArtifactSchemaError::Malformed`] when no JSON object is found or it
/// does not decode, and [`ArtifactSchemaError::Invalid`] when it breaks a
/// structural rule
pub fn parse_document(kind: ArtifactKind, reply: &str) -> Result<ArtifactDocument, ArtifactSchemaError> {
    let raw = extract_json_object(reply).ok_or_else(|| {
        ArtifactSchemaError::Malformed("reply does not contain a JSON object".to_owned())
    })?;
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ArtifactSchemaError::Malformed(e.to_string()))?;

    let document = ArtifactDocument::from_value(kind, value)?;
    document.validate()?;
    Ok(document)
}

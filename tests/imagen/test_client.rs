// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the Imagen client types and response handling

use safegen::imagen::{
    client::api_error_message, GenerationOptions, ImagenClient, ImagenError, PersonGeneration,
    PredictResponse, MAX_SAMPLE_COUNT,
};

#[test]
fn test_options_validate_rejects_zero_samples() {
    let options = GenerationOptions {
        sample_count: 0,
        ..GenerationOptions::default()
    };
    assert!(options.validate().is_err());
}

#[test]
fn test_options_validate_rejects_excess_samples() {
    let options = GenerationOptions {
        sample_count: MAX_SAMPLE_COUNT + 1,
        ..GenerationOptions::default()
    };
    assert!(options.validate().is_err());
}

#[test]
fn test_options_validate_rejects_empty_model() {
    let options = GenerationOptions {
        model: "  ".to_string(),
        ..GenerationOptions::default()
    };
    assert!(options.validate().is_err());
}

#[test]
fn test_default_options_are_valid() {
    let options = GenerationOptions::default();
    assert!(options.validate().is_ok());
    assert_eq!(options.sample_count, 1);
    assert_eq!(options.person_generation, PersonGeneration::AllowAdult);
}

#[test]
fn test_person_generation_serializes_snake_case() {
    let json = serde_json::to_string(&PersonGeneration::AllowAdult).unwrap();
    assert_eq!(json, "\"allow_adult\"");
    let json = serde_json::to_string(&PersonGeneration::DontAllow).unwrap();
    assert_eq!(json, "\"dont_allow\"");
}

#[test]
fn test_response_parses_predictions() {
    let body = r#"{
        "predictions": [
            {"bytesBase64Encoded": "aGVsbG8=", "mimeType": "image/jpeg"},
            {"bytesBase64Encoded": "d29ybGQ="}
        ]
    }"#;
    let response: PredictResponse = serde_json::from_str(body).unwrap();
    let images = response.into_images().unwrap();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0].mime_type, "image/jpeg");
    assert_eq!(images[0].bytes_base64, "aGVsbG8=");
    // Missing mime type defaults to PNG
    assert_eq!(images[1].mime_type, "image/png");
}

#[test]
fn test_zero_predictions_maps_to_blocked() {
    let response: PredictResponse = serde_json::from_str("{}").unwrap();
    let err = response.into_images().unwrap_err();
    assert!(matches!(err, ImagenError::Blocked));
    assert_eq!(
        err.to_string(),
        "No images were generated. The prompt may have been blocked."
    );
}

#[test]
fn test_predictions_without_bytes_map_to_blocked() {
    let body = r#"{"predictions": [{"mimeType": "image/png"}]}"#;
    let response: PredictResponse = serde_json::from_str(body).unwrap();
    assert!(matches!(
        response.into_images().unwrap_err(),
        ImagenError::Blocked
    ));
}

#[test]
fn test_error_envelope_message_is_surfaced_verbatim() {
    let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}"#;
    let message = api_error_message(reqwest::StatusCode::BAD_REQUEST, body);
    assert_eq!(message, "API key not valid. Please pass a valid API key.");
}

#[test]
fn test_unparseable_error_body_falls_back_to_status_and_body() {
    let message = api_error_message(
        reqwest::StatusCode::INTERNAL_SERVER_ERROR,
        "upstream exploded",
    );
    assert!(message.contains("500"));
    assert!(message.contains("upstream exploded"));
}

#[test]
fn test_client_trims_trailing_slash() {
    let client = ImagenClient::new("https://example.test/").unwrap();
    assert_eq!(client.base_url(), "https://example.test");
}

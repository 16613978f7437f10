// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Imagen REST client for image generation via the `models/{model}:predict` API

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::error::ImagenError;
use super::ImageApi;

/// Default model identifier
pub const DEFAULT_MODEL: &str = "imagen-4.0-generate-001";

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Upper bound on images per request
pub const MAX_SAMPLE_COUNT: u32 = 4;

/// Person-generation policy flag passed to the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonGeneration {
    DontAllow,
    AllowAdult,
    AllowAll,
}

impl Default for PersonGeneration {
    fn default() -> Self {
        Self::AllowAdult
    }
}

/// Options for one generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationOptions {
    pub model: String,
    pub sample_count: u32,
    pub person_generation: PersonGeneration,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            sample_count: 1,
            person_generation: PersonGeneration::default(),
        }
    }
}

impl GenerationOptions {
    /// Validate the options fields
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }
        if self.sample_count == 0 || self.sample_count > MAX_SAMPLE_COUNT {
            return Err(format!(
                "sample_count must be between 1 and {}, got {}",
                MAX_SAMPLE_COUNT, self.sample_count
            ));
        }
        Ok(())
    }
}

/// One generated image as returned by the service: an opaque base64
/// payload plus its mime type. Bytes are not validated beyond presence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub bytes_base64: String,
}

// --- Wire types ---

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    instances: Vec<Instance<'a>>,
    parameters: Parameters,
}

#[derive(Debug, Serialize)]
struct Instance<'a> {
    prompt: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Parameters {
    sample_count: u32,
    person_generation: PersonGeneration,
}

#[derive(Debug, Deserialize)]
pub struct PredictResponse {
    #[serde(default)]
    pub predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    pub bytes_base64_encoded: Option<String>,
    pub mime_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl PredictResponse {
    /// Convert the raw response into images, dropping predictions without
    /// payload bytes. Zero usable images maps to [`ImagenError::Blocked`].
    pub fn into_images(self) -> Result<Vec<GeneratedImage>, ImagenError> {
        let mut images = Vec::with_capacity(self.predictions.len());
        for prediction in self.predictions {
            match prediction.bytes_base64_encoded {
                Some(bytes_base64) => images.push(GeneratedImage {
                    mime_type: prediction
                        .mime_type
                        .unwrap_or_else(|| "image/png".to_string()),
                    bytes_base64,
                }),
                None => warn!("prediction without image bytes, skipping"),
            }
        }
        if images.is_empty() {
            return Err(ImagenError::Blocked);
        }
        Ok(images)
    }
}

/// Extract the service's error message from a non-success response body.
///
/// The standard envelope is `{"error": {"message": ...}}`; when the body
/// does not parse, the status and raw body are surfaced instead.
pub fn api_error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => envelope.error.message,
        Err(_) => format!("image API returned {}: {}", status, body),
    }
}

/// Client for the hosted Imagen REST API
pub struct ImagenClient {
    client: Client,
    base_url: String,
}

impl ImagenClient {
    /// Create a new ImagenClient against the given base URL
    pub fn new(base_url: &str) -> Result<Self, ImagenError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        let base_url = base_url.trim_end_matches('/').to_string();
        info!("Imagen client configured: base_url={}", base_url);

        Ok(Self { client, base_url })
    }

    /// Get the configured base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait::async_trait]
impl ImageApi for ImagenClient {
    async fn generate_images(
        &self,
        prompt: &str,
        api_key: &str,
        options: &GenerationOptions,
    ) -> Result<Vec<GeneratedImage>, ImagenError> {
        options.validate().map_err(ImagenError::InvalidRequest)?;
        if prompt.trim().is_empty() {
            return Err(ImagenError::InvalidRequest(
                "prompt must not be empty".to_string(),
            ));
        }

        let url = format!("{}/v1beta/models/{}:predict", self.base_url, options.model);
        debug!("Imagen generate POST {}", url);

        let body = PredictRequest {
            instances: vec![Instance { prompt }],
            parameters: Parameters {
                sample_count: options.sample_count,
                person_generation: options.person_generation,
            },
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = api_error_message(status, &text);
            warn!("Imagen request failed: {}", message);
            return Err(ImagenError::Api { message });
        }

        let predict: PredictResponse = response.json().await?;
        predict.into_images()
    }
}

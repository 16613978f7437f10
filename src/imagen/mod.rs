// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image generation via the hosted Imagen API

pub mod client;
pub mod error;

pub use client::{
    GeneratedImage, GenerationOptions, ImagenClient, PersonGeneration, Prediction,
    PredictResponse, DEFAULT_API_BASE, DEFAULT_MODEL, MAX_SAMPLE_COUNT,
};
pub use error::ImagenError;

/// External image-generation service, seen from the orchestrator.
///
/// The credential is passed per call; the orchestrator queries its
/// credential store once per generate request and hands the key through.
#[async_trait::async_trait]
pub trait ImageApi: Send + Sync {
    async fn generate_images(
        &self,
        prompt: &str,
        api_key: &str,
        options: &GenerationOptions,
    ) -> Result<Vec<GeneratedImage>, ImagenError>;
}

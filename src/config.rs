// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Application configuration from environment variables

use std::env;
use std::path::PathBuf;

use crate::imagen::{DEFAULT_API_BASE, DEFAULT_MODEL, MAX_SAMPLE_COUNT};

/// Runtime configuration with environment overrides.
///
/// The API credential itself is not held here; it is read through the
/// credential store at generate time.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub model: String,
    pub api_base: String,
    pub output_dir: PathBuf,
    pub sample_count: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            output_dir: PathBuf::from("./output"),
            sample_count: 1,
        }
    }
}

impl AppConfig {
    /// Build configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let model = env::var("SAFEGEN_MODEL").unwrap_or(defaults.model);
        let api_base = env::var("SAFEGEN_API_BASE").unwrap_or(defaults.api_base);
        let output_dir = env::var("SAFEGEN_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_dir);
        let sample_count = env::var("SAFEGEN_IMAGE_COUNT")
            .ok()
            .and_then(|v| v.parse::<u32>().ok())
            .map(clamp_sample_count)
            .unwrap_or(defaults.sample_count);

        Self {
            model,
            api_base,
            output_dir,
            sample_count,
        }
    }
}

/// Clamp a requested image count into the API's allowed range
pub fn clamp_sample_count(count: u32) -> u32 {
    count.clamp(1, MAX_SAMPLE_COUNT)
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod cli;
pub mod config;
pub mod imagen;
pub mod safety;
pub mod session;
pub mod ui;
pub mod version;

// Re-export main types
pub use imagen::{
    GeneratedImage, GenerationOptions, ImageApi, ImagenClient, ImagenError, PersonGeneration,
};
pub use safety::{classify_prompt, rewrite_prompt, safety_notice, Adjustment, RiskTag};
pub use session::{Frontend, GenerationSession};
pub use ui::{ControlGate, CredentialDialog, CredentialStore, ImageSink, StatusSink};

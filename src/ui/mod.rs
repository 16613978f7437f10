// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Collaborator seams between the generation orchestrator and a front-end

pub mod console;

use crate::imagen::GeneratedImage;
use crate::safety::Adjustment;
use anyhow::Result;

pub use console::{
    ConsoleControlGate, ConsoleStatus, EnvCredentialStore, FileImageSink, StdinKeyDialog,
};

/// Source of the API credential. Queried once per generate call.
pub trait CredentialStore: Send + Sync {
    fn api_key(&self) -> Option<String>;
}

/// Interactive credential acquisition. Best-effort: a front-end may have
/// no dialog at all, in which case the orchestrator falls back to a status
/// message.
#[async_trait::async_trait]
pub trait CredentialDialog: Send + Sync {
    async fn request_credential(&self) -> Result<()>;
}

/// Receives user-facing status updates from the orchestrator
pub trait StatusSink: Send + Sync {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
    fn success(&self, message: &str);
    fn success_with_adjustments(&self, message: &str, adjustments: &[Adjustment]);
}

/// Renders generated images. Implementations clear any previous render
/// before showing a new batch.
pub trait ImageSink: Send + Sync {
    fn render(&self, images: &[GeneratedImage]) -> Result<()>;
}

/// Enables/disables the prompt input and submit action while a request is
/// in flight
pub trait ControlGate: Send + Sync {
    fn set_disabled(&self, disabled: bool);
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Error types for the image generation client

use thiserror::Error;

/// Errors that can occur during an image generation call.
///
/// A zero-image response is a distinct variant so callers can tell a
/// blocked prompt apart from transport or credential failures. `Api`
/// carries the service's own message text verbatim; the orchestrator's
/// error heuristics match on that text.
#[derive(Error, Debug)]
pub enum ImagenError {
    /// The service accepted the request but produced no images
    #[error("No images were generated. The prompt may have been blocked.")]
    Blocked,

    /// The service rejected the request; message is what the API reported
    #[error("{message}")]
    Api { message: String },

    /// Request failed client-side validation before any network I/O
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Transport-level failure
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

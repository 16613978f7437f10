// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for Safegen

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-prompt-safety-2026-08-06";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2026-08-06";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "risk-classifier",
    "safe-rewrite",
    "imagen-client",
    "multi-image",
    "credential-dialog",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Safegen {} ({})", VERSION_NUMBER, BUILD_DATE)
}

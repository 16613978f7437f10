// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt content-risk screening: keyword classifier and safe-rewrite rules

pub mod rewrite;
pub mod risk;

pub use rewrite::{rewrite_prompt, Adjustment};
pub use risk::{classify_prompt, safety_notice, RiskTag};

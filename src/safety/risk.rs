// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Prompt risk classifier using fixed keyword tables

use serde::{Deserialize, Serialize};
use std::fmt;

/// Keywords referring to minors
const MINOR_KEYWORDS: &[&str] = &[
    "teenager",
    "child",
    "minor",
    "girl",
    "boy",
    "young boy",
    "young girl",
];

/// Keywords indicating photorealistic rendering intent
const REALISM_KEYWORDS: &[&str] = &["photorealistic", "8k", "highly detailed", "realistic texture"];

/// Keywords indicating a human subject
const PERSON_KEYWORDS: &[&str] = &["woman", "man", "person", "girl", "boy", "human"];

/// Keywords indicating emotional vulnerability
const EMOTIONAL_KEYWORDS: &[&str] = &[
    "tears",
    "crying",
    "heartbroken",
    "tragic",
    "innocence",
    "vulnerable",
];

/// Risk category assigned to a prompt by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTag {
    MinorReference,
    PhotorealisticPerson,
    EmotionalVulnerability,
    None,
}

impl fmt::Display for RiskTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RiskTag::MinorReference => "MINOR_REFERENCE",
            RiskTag::PhotorealisticPerson => "PHOTOREALISTIC_PERSON",
            RiskTag::EmotionalVulnerability => "EMOTIONAL_VULNERABILITY",
            RiskTag::None => "NONE",
        };
        write!(f, "{}", name)
    }
}

/// Classify a prompt against the keyword tables.
///
/// Matching is case-insensitive and substring-based; the three rules are
/// evaluated independently, so several tags can fire for one prompt. A
/// prompt that matches nothing yields exactly `[RiskTag::None]`; the
/// result is never empty.
pub fn classify_prompt(prompt: &str) -> Vec<RiskTag> {
    let lower = prompt.to_lowercase();
    let mut tags = Vec::new();

    if MINOR_KEYWORDS.iter().any(|word| lower.contains(word)) {
        tags.push(RiskTag::MinorReference);
    }

    // Photorealism only matters when a person is in the frame
    if REALISM_KEYWORDS.iter().any(|word| lower.contains(word))
        && PERSON_KEYWORDS.iter().any(|word| lower.contains(word))
    {
        tags.push(RiskTag::PhotorealisticPerson);
    }

    if EMOTIONAL_KEYWORDS.iter().any(|word| lower.contains(word)) {
        tags.push(RiskTag::EmotionalVulnerability);
    }

    if tags.is_empty() {
        tags.push(RiskTag::None);
    }
    tags
}

/// User-facing explanation for the highest-priority tag present.
pub fn safety_notice(tags: &[RiskTag]) -> &'static str {
    if tags.contains(&RiskTag::MinorReference) {
        return "Your prompt appears to describe a minor. Image generation is restricted to adults only. Please update the subject to be an adult.";
    }
    if tags.contains(&RiskTag::PhotorealisticPerson) {
        return "Highly realistic images of people may be restricted. Please ensure the subject is clearly an adult or reduce photorealistic detail.";
    }
    if tags.contains(&RiskTag::EmotionalVulnerability) {
        return "Prompts describing emotional vulnerability may be restricted. Consider softening emotional language.";
    }
    "Your prompt may violate image generation safety policies. Please revise and try again."
}

// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Safe-rewrite rules: ordered regex substitutions with an adjustment log

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// One substitution actually performed on a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Adjustment {
    pub original: String,
    pub replacement: String,
    pub reason: String,
}

struct RewriteRule {
    pattern: Regex,
    replacement: &'static str,
    reason: &'static str,
}

impl RewriteRule {
    fn new(pattern: &str, replacement: &'static str, reason: &'static str) -> Self {
        // Patterns are fixed table entries, known valid
        let pattern = Regex::new(pattern).expect("rewrite pattern is valid");
        Self {
            pattern,
            replacement,
            reason,
        }
    }
}

fn ruleset() -> &'static [RewriteRule; 3] {
    static RULES: OnceLock<[RewriteRule; 3]> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            RewriteRule::new(
                r"(?i)\bteenager\b|\bchild\b|\bgirl\b|\bboy\b",
                "adult woman",
                "subject changed to an adult",
            ),
            RewriteRule::new(
                r"(?i)heartbreakingly|tragic|innocence|unshed tears|crying",
                "calm and reflective",
                "emotional language softened",
            ),
            RewriteRule::new(
                r"(?i)8k|photorealistic|ultra realistic",
                "high quality",
                "realism reduced",
            ),
        ]
    })
}

/// Rewrite a prompt through the three fixed rules, in order.
///
/// Each rule records one [`Adjustment`] per match found in the current text
/// (later rules see the output of earlier ones), then substitutes every
/// match. A rule with no matches contributes nothing and leaves the text
/// untouched. Pure: the same input always yields the same output and the
/// same adjustment list.
pub fn rewrite_prompt(prompt: &str) -> (String, Vec<Adjustment>) {
    let mut text = prompt.to_string();
    let mut adjustments = Vec::new();

    for rule in ruleset() {
        for matched in rule.pattern.find_iter(&text) {
            adjustments.push(Adjustment {
                original: matched.as_str().to_string(),
                replacement: rule.replacement.to_string(),
                reason: rule.reason.to_string(),
            });
        }
        text = rule.pattern.replace_all(&text, rule.replacement).into_owned();
    }

    (text, adjustments)
}

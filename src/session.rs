// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Generation orchestrator: one guarded request from prompt to rendered images

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::imagen::{GeneratedImage, GenerationOptions, ImageApi, ImagenError};
use crate::safety::{classify_prompt, rewrite_prompt, safety_notice, Adjustment, RiskTag};
use crate::ui::{ControlGate, CredentialDialog, CredentialStore, ImageSink, StatusSink};

const MSG_NO_API_KEY: &str = "API key is not configured. Please add your API key.";
const MSG_DIALOG_UNAVAILABLE: &str =
    "API key selection is not available. Please configure the API_KEY environment variable.";
const MSG_GENERATING: &str = "Generating image...";
const MSG_ADJUSTING: &str = "Adjusting prompt and retrying...";
const MSG_SUCCESS: &str = "Image generated successfully.";
const MSG_SUCCESS_ADJUSTED: &str = "Image generated successfully (with safe adjustments).";
const MSG_MODEL_NOT_FOUND: &str = "Model not found. This can be caused by an invalid API key or permission issues. Please check your API key.";
const MSG_KEY_INVALID: &str = "Your API key is invalid. Please add a valid API key.";
const MSG_IN_FLIGHT: &str =
    "A generation request is already in progress. Please wait for it to finish.";

/// Front-end collaborators the orchestrator reports into. The dialog is
/// optional; without one, credential re-acquisition degrades to a status
/// message.
pub struct Frontend {
    pub status: Arc<dyn StatusSink>,
    pub images: Arc<dyn ImageSink>,
    pub controls: Arc<dyn ControlGate>,
    pub key_dialog: Option<Arc<dyn CredentialDialog>>,
}

/// Orchestrates one generation request: credential check, risk
/// classification, optional safe rewrite, the external API call, and the
/// mapping of results and errors to user-facing outcomes.
///
/// All request state lives here; there is no ambient module state. A
/// single request may be in flight at a time; a second `generate` call
/// while one is pending is rejected with an error status.
pub struct GenerationSession {
    api: Arc<dyn ImageApi>,
    credentials: Arc<dyn CredentialStore>,
    frontend: Frontend,
    options: GenerationOptions,
    in_flight: AtomicBool,
}

/// Clears the in-flight mark on every exit path
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl GenerationSession {
    pub fn new(
        api: Arc<dyn ImageApi>,
        credentials: Arc<dyn CredentialStore>,
        frontend: Frontend,
        options: GenerationOptions,
    ) -> Self {
        Self {
            api,
            credentials,
            frontend,
            options,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Run one generation request. Effect-only: every outcome is reported
    /// through the front-end collaborators, nothing propagates to the
    /// caller, and the session always ends idle with controls re-enabled.
    pub async fn generate(&self, prompt: &str) {
        let Some(_in_flight) = self.try_begin() else {
            warn!("generate called while a request is in flight");
            self.frontend.status.error(MSG_IN_FLIGHT);
            return;
        };

        let Some(api_key) = self.credentials.api_key() else {
            self.frontend.status.error(MSG_NO_API_KEY);
            self.open_key_dialog().await;
            return;
        };

        let risks = classify_prompt(prompt);
        debug!(?risks, "prompt classified");

        if risks.contains(&RiskTag::None) {
            self.generate_clean(prompt, &api_key).await;
        } else {
            self.generate_with_adjustments(prompt, &risks, &api_key).await;
        }
    }

    fn try_begin(&self) -> Option<InFlightGuard<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| InFlightGuard(&self.in_flight))
    }

    /// Clean path: call the API with the original prompt, mapping failures
    /// onto the error taxonomy by inspecting the message text.
    async fn generate_clean(&self, prompt: &str, api_key: &str) {
        self.frontend.status.info(MSG_GENERATING);

        match self.call_api(prompt, api_key).await {
            Ok(images) => self.report_success(&images, &[]),
            Err(e) => {
                let message = e.to_string();
                warn!("image generation failed: {}", message);
                let (user_message, reacquire_key) = map_api_failure(&message);
                self.frontend.status.error(&user_message);
                if reacquire_key {
                    self.open_key_dialog().await;
                }
            }
        }
    }

    /// Risky path: explain the flag, rewrite, retry once with the rewritten
    /// prompt. No second retry and no credential dialog on failure here.
    async fn generate_with_adjustments(&self, prompt: &str, risks: &[RiskTag], api_key: &str) {
        warn!(?risks, "prompt flagged by risk classifier");
        self.frontend.status.error(safety_notice(risks));

        let (rewritten, adjustments) = rewrite_prompt(prompt);
        self.frontend.status.info(MSG_ADJUSTING);

        match self.call_api(&rewritten, api_key).await {
            Ok(images) => self.report_success(&images, &adjustments),
            Err(e) => {
                warn!("image generation failed after safety adjustments: {}", e);
                self.frontend.status.error(&format!(
                    "Image generation failed after applying safety adjustments: {}",
                    e
                ));
            }
        }
    }

    /// Controls are disabled for exactly the duration of the external call,
    /// and re-enabled on success and failure alike.
    async fn call_api(
        &self,
        prompt: &str,
        api_key: &str,
    ) -> Result<Vec<GeneratedImage>, ImagenError> {
        self.frontend.controls.set_disabled(true);
        let result = self.api.generate_images(prompt, api_key, &self.options).await;
        self.frontend.controls.set_disabled(false);
        result
    }

    fn report_success(&self, images: &[GeneratedImage], adjustments: &[Adjustment]) {
        if let Err(e) = self.frontend.images.render(images) {
            warn!("rendering generated images failed: {}", e);
            self.frontend.status.error(&format!("Error: {}", e));
            return;
        }
        if adjustments.is_empty() {
            self.frontend.status.success(MSG_SUCCESS);
        } else {
            self.frontend
                .status
                .success_with_adjustments(MSG_SUCCESS_ADJUSTED, adjustments);
        }
    }

    async fn open_key_dialog(&self) {
        match &self.frontend.key_dialog {
            Some(dialog) => {
                if let Err(e) = dialog.request_credential().await {
                    warn!("credential dialog failed: {}", e);
                    self.frontend.status.error(MSG_DIALOG_UNAVAILABLE);
                }
            }
            None => self.frontend.status.error(MSG_DIALOG_UNAVAILABLE),
        }
    }
}

/// Map an API failure message to a user-facing message plus whether
/// credential re-acquisition should be offered. Substring heuristics on
/// the service's message text, as the service does not expose a typed
/// error taxonomy.
fn map_api_failure(message: &str) -> (String, bool) {
    if message.contains("Requested entity was not found.") {
        return (MSG_MODEL_NOT_FOUND.to_string(), true);
    }
    if message.contains("API_KEY_INVALID")
        || message.contains("API key not valid")
        || message.to_lowercase().contains("permission denied")
    {
        return (MSG_KEY_INVALID.to_string(), true);
    }
    (format!("Error: {}", message), false)
}

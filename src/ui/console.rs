// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Terminal implementations of the front-end collaborator traits

use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::{ControlGate, CredentialDialog, CredentialStore, ImageSink, StatusSink};
use crate::imagen::GeneratedImage;
use crate::safety::Adjustment;

/// Credential store backed by environment variables, with an in-memory
/// override that the key dialog can set for the current process.
#[derive(Default)]
pub struct EnvCredentialStore {
    override_key: RwLock<Option<String>>,
}

impl EnvCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the in-session key, taking precedence over the environment
    pub fn set_api_key(&self, key: &str) {
        *self.override_key.write().unwrap() = Some(key.to_string());
    }
}

impl CredentialStore for EnvCredentialStore {
    fn api_key(&self) -> Option<String> {
        if let Some(key) = self.override_key.read().unwrap().clone() {
            return Some(key);
        }
        env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .or_else(|| env::var("API_KEY").ok().filter(|key| !key.is_empty()))
    }
}

/// Credential dialog that reads a key from stdin and stores it in the
/// session's credential store
pub struct StdinKeyDialog {
    store: Arc<EnvCredentialStore>,
}

impl StdinKeyDialog {
    pub fn new(store: Arc<EnvCredentialStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl CredentialDialog for StdinKeyDialog {
    async fn request_credential(&self) -> Result<()> {
        eprintln!("Enter your API key:");
        let mut line = String::new();
        let mut reader = BufReader::new(tokio::io::stdin());
        reader.read_line(&mut line).await?;
        let key = line.trim();
        if key.is_empty() {
            bail!("no API key entered");
        }
        self.store.set_api_key(key);
        eprintln!("API key set for this session.");
        Ok(())
    }
}

/// Status sink that prints to the terminal
pub struct ConsoleStatus;

impl StatusSink for ConsoleStatus {
    fn info(&self, message: &str) {
        println!("{}", message);
    }

    fn error(&self, message: &str) {
        eprintln!("{}", message);
    }

    fn success(&self, message: &str) {
        println!("{}", message);
    }

    fn success_with_adjustments(&self, message: &str, adjustments: &[Adjustment]) {
        println!("{}", message);
        for adjustment in adjustments {
            println!(
                "  \"{}\" -> \"{}\" ({})",
                adjustment.original, adjustment.replacement, adjustment.reason
            );
        }
    }
}

/// Image sink that decodes base64 payloads and writes `image-<n>.<ext>`
/// files into an output directory. Previous renders are cleared first.
pub struct FileImageSink {
    dir: PathBuf,
}

impl FileImageSink {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn extension_for(mime_type: &str) -> &'static str {
        match mime_type {
            "image/png" => "png",
            "image/jpeg" => "jpg",
            "image/webp" => "webp",
            "image/gif" => "gif",
            _ => "bin",
        }
    }
}

impl ImageSink for FileImageSink {
    fn render(&self, images: &[GeneratedImage]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("creating output directory {}", self.dir.display()))?;

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.file_name().to_string_lossy().starts_with("image-") {
                fs::remove_file(entry.path())?;
            }
        }

        for (index, image) in images.iter().enumerate() {
            let bytes = BASE64
                .decode(image.bytes_base64.as_bytes())
                .context("image payload is not valid base64")?;
            let path = self.dir.join(format!(
                "image-{}.{}",
                index + 1,
                Self::extension_for(&image.mime_type)
            ));
            fs::write(&path, bytes)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Saved {}", path.display());
        }
        Ok(())
    }
}

/// Control gate for a terminal front-end. There are no widgets to grey
/// out; the flag is tracked so callers can observe the in-flight state.
#[derive(Default)]
pub struct ConsoleControlGate {
    disabled: AtomicBool,
}

impl ConsoleControlGate {
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }
}

impl ControlGate for ConsoleControlGate {
    fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
        debug!("controls disabled: {}", disabled);
    }
}

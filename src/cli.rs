// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Safegen CLI

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{clamp_sample_count, AppConfig};
use crate::imagen::{GenerationOptions, ImagenClient, PersonGeneration};
use crate::safety::{classify_prompt, rewrite_prompt, safety_notice, RiskTag};
use crate::session::{Frontend, GenerationSession};
use crate::ui::{
    ConsoleControlGate, ConsoleStatus, CredentialDialog, EnvCredentialStore, FileImageSink,
    StatusSink, StdinKeyDialog,
};

/// Safegen CLI
#[derive(Parser, Debug)]
#[command(name = "safegen")]
#[command(version)]
#[command(about = "Guarded image generation client", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate images from a prompt through the safety pipeline
    Generate(GenerateArgs),

    /// Classify a prompt and preview the safe rewrite without calling the API
    Check(CheckArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Prompt text describing the image
    #[arg(long)]
    pub prompt: String,

    /// Number of images to request (1-4)
    #[arg(long)]
    pub count: Option<u32>,

    /// Directory where generated images are written
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Model identifier override
    #[arg(long)]
    pub model: Option<String>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Prompt text to screen
    #[arg(long)]
    pub prompt: String,
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate(args) => run_generate(args).await,
        Commands::Check(args) => run_check(args),
    }
}

async fn run_generate(args: GenerateArgs) -> Result<()> {
    let status = Arc::new(ConsoleStatus);

    // Submit-path guard: an empty prompt never reaches the orchestrator
    if args.prompt.trim().is_empty() {
        status.error("Please enter a prompt to generate an image.");
        return Ok(());
    }

    let mut config = AppConfig::from_env();
    if let Some(count) = args.count {
        config.sample_count = clamp_sample_count(count);
    }
    if let Some(out) = args.out {
        config.output_dir = out;
    }
    if let Some(model) = args.model {
        config.model = model;
    }

    let store = Arc::new(EnvCredentialStore::new());
    let key_dialog: Arc<dyn CredentialDialog> = Arc::new(StdinKeyDialog::new(store.clone()));
    let api = Arc::new(ImagenClient::new(&config.api_base)?);

    let frontend = Frontend {
        status,
        images: Arc::new(FileImageSink::new(config.output_dir.clone())),
        controls: Arc::new(ConsoleControlGate::default()),
        key_dialog: Some(key_dialog),
    };

    let options = GenerationOptions {
        model: config.model,
        sample_count: config.sample_count,
        person_generation: PersonGeneration::AllowAdult,
    };

    let session = GenerationSession::new(api, store, frontend, options);
    session.generate(&args.prompt).await;
    Ok(())
}

fn run_check(args: CheckArgs) -> Result<()> {
    let tags = classify_prompt(&args.prompt);
    let tag_list: Vec<String> = tags.iter().map(ToString::to_string).collect();
    println!("Risk tags: {}", tag_list.join(", "));

    if tags.contains(&RiskTag::None) {
        return Ok(());
    }

    println!("{}", safety_notice(&tags));
    let (rewritten, adjustments) = rewrite_prompt(&args.prompt);
    println!("Rewritten prompt: {}", rewritten);
    if adjustments.is_empty() {
        println!("No automatic adjustments available for this prompt.");
    }
    for adjustment in &adjustments {
        println!(
            "  \"{}\" -> \"{}\" ({})",
            adjustment.original, adjustment.replacement, adjustment.reason
        );
    }
    Ok(())
}

// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with clap.
// Business logic lives in Layer 2 (application); this layer
// only routes and prints.
//
// Commands:
//   1. `prepare`   — build or reuse artifacts, print a summary
//   2. `inspect`   — show the first train/valid batches as text
//   3. `normalize` — run the text normaliser on input
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{Commands, InspectArgs, NormalizeArgs, PrepareArgs};
use std::io::{self, BufRead, Write};

#[derive(Parser, Debug)]
#[command(
    name = "char-corpus",
    version,
    about = "Normalise a text corpus, build a character vocabulary and cut training batches."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args)   => run_prepare(args),
            Commands::Inspect(args)   => run_inspect(args),
            Commands::Normalize(args) => run_normalize(args),
        }
    }
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    use crate::application::prepare_use_case::PrepareUseCase;

    let summary = PrepareUseCase::new(args.loader.into()).execute()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Data directory:     {}", summary.data_dir);
    println!(
        "Artifacts:          {}",
        if summary.preprocessed { "rebuilt from sentences.txt" } else { "reused" }
    );
    println!("Vocabulary size:    {}", summary.vocab_size);
    println!("Encoded tokens:     {}", summary.tensor_len);
    println!(
        "Training batches:   {} ({} tokens, {}x{})",
        summary.num_batches, summary.train_tokens, summary.batch_size, summary.seq_length
    );
    println!(
        "Validation batches: {} ({} tokens)",
        summary.num_valid_batches, summary.valid_tokens
    );
    println!("Most frequent:      {:?}", summary.top_tokens);
    Ok(())
}

fn run_inspect(args: InspectArgs) -> Result<()> {
    use crate::application::inspect_use_case::{InspectUseCase, Split};

    let previews = InspectUseCase::new(args.loader.into(), args.batches).execute()?;
    for p in previews {
        let split = match p.split {
            Split::Train => "train",
            Split::Valid => "valid",
        };
        println!("── {split} batch {} {:?}", p.index, p.tensor_shape);
        println!("x[0] ids:  {:?}", p.input_ids);
        println!("y[0] ids:  {:?}", p.target_ids);
        println!("x[0] text: {:?}", p.input_text);
        println!("y[0] text: {:?}", p.target_text);
    }
    Ok(())
}

fn run_normalize(args: NormalizeArgs) -> Result<()> {
    use crate::data::normalizer::normalize_unicodes;

    if let Some(text) = args.text {
        println!("{}", normalize_unicodes(&text));
        return Ok(());
    }

    let stdin  = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line.context("Cannot read stdin")?;
        writeln!(out, "{}", normalize_unicodes(&line))?;
    }
    Ok(())
}

// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the subcommands `prepare`, `inspect` and `normalize`
// and their flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → usize, f64, etc.)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::data::config::{LoaderConfig, DEFAULT_MIN_COUNT, DEFAULT_TRAIN_FRACTION};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build (or reuse) vocab.pkl and data.npy and summarise the corpus
    Prepare(PrepareArgs),

    /// Print the first training and validation batches decoded back to text
    Inspect(InspectArgs),

    /// Normalise text given on the command line or on stdin
    Normalize(NormalizeArgs),
}

/// Flags shared by every command that builds a corpus loader.
/// Each field becomes a --flag on the command line.
#[derive(Args, Debug, Clone)]
pub struct LoaderArgs {
    /// Directory holding sentences.txt and the generated artifacts
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Rows per batch
    #[arg(long, default_value_t = 30)]
    pub batch_size: usize,

    /// Columns (tokens) per batch row
    #[arg(long, default_value_t = 25)]
    pub seq_length: usize,

    /// Rebuild vocab.pkl and data.npy even if they exist
    #[arg(long)]
    pub force_reload: bool,

    /// Encoding of sentences.txt: utf-8, utf-8-sig or latin-1
    #[arg(long, default_value = "utf-8")]
    pub encoding: String,

    /// Characters seen this many times or fewer become _UNK
    #[arg(long, default_value_t = DEFAULT_MIN_COUNT)]
    pub min_count: usize,

    /// Share of the encoded corpus used for training
    #[arg(long, default_value_t = DEFAULT_TRAIN_FRACTION)]
    pub train_fraction: f64,
}

/// Convert CLI LoaderArgs into the data-layer LoaderConfig.
/// The data layer never sees clap types.
impl From<LoaderArgs> for LoaderConfig {
    fn from(a: LoaderArgs) -> Self {
        LoaderConfig::new(a.data_dir, a.batch_size, a.seq_length)
            .with_force_reload(a.force_reload)
            .with_encoding(a.encoding)
            .with_min_count(a.min_count)
            .with_train_fraction(a.train_fraction)
    }
}

#[derive(Args, Debug)]
pub struct PrepareArgs {
    #[command(flatten)]
    pub loader: LoaderArgs,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub loader: LoaderArgs,

    /// How many batches to show from each split
    #[arg(long, default_value_t = 3)]
    pub batches: usize,
}

#[derive(Args, Debug)]
pub struct NormalizeArgs {
    /// Text to normalise; reads stdin line by line when omitted
    #[arg(long)]
    pub text: Option<String>,
}

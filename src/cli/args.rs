//! Command line argument parsing for the quranalyze CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::graph::{GraphOptions, RelationKind};

/// quranalyze - structural analysis of the Quranic text
#[derive(Parser, Debug, Clone)]
#[command(name = "quranalyze")]
#[command(about = "Normalize, filter and relate the words of a chapter/verse dataset")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct QuranalyzeArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Corpus configuration file (JSON)
    #[arg(long, value_name = "CONFIG_FILE", env = "QURANALYZE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl QuranalyzeArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Show corpus statistics
    Stats(StatsArgs),

    /// Show one chapter with its words
    Chapter(ChapterArgs),

    /// Check a dataset without building a corpus
    Verify(VerifyArgs),

    /// List words matching filters
    Words(WordsArgs),

    /// Build a relation graph over filtered words
    Graph(GraphArgs),

    /// Print the canonical form of a text
    Normalize(NormalizeArgs),

    /// Transliterate a text to or from Buckwalter
    Transliterate(TransliterateArgs),

    /// Write a JSON snapshot
    Export(ExportArgs),
}

/// Dataset location shared by corpus-building commands.
#[derive(Args, Debug, Clone)]
pub struct DatasetArgs {
    /// Path to the dataset directory
    #[arg(value_name = "DATASET_DIR")]
    pub dataset: PathBuf,

    /// Morphology annotation file (JSON) populating roots and lemmas
    #[arg(long, value_name = "MORPHOLOGY_FILE")]
    pub morphology: Option<PathBuf>,
}

/// Arguments for corpus statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Include per-chapter word counts
    #[arg(long)]
    pub by_chapter: bool,
}

/// Arguments for showing a chapter
#[derive(Parser, Debug, Clone)]
pub struct ChapterArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Chapter number (1-based)
    #[arg(value_name = "CHAPTER")]
    pub chapter: u32,
}

/// Arguments for dataset verification
#[derive(Parser, Debug, Clone)]
pub struct VerifyArgs {
    /// Path to the dataset directory
    #[arg(value_name = "DATASET_DIR")]
    pub dataset: PathBuf,

    /// Require exactly this many chapters
    #[arg(long, value_name = "N")]
    pub expected_chapters: Option<u32>,
}

/// Word filters, combined with AND
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Only words of this chapter
    #[arg(long)]
    pub surah: Option<u32>,

    /// Only words of this verse (requires --surah)
    #[arg(long, requires = "surah")]
    pub ayah: Option<u32>,

    /// Only words whose text equals this
    #[arg(long)]
    pub text: Option<String>,

    /// Only words whose text contains this
    #[arg(long)]
    pub contains: Option<String>,

    /// Match --text and --contains against canonical forms (the query is normalized too)
    #[arg(long)]
    pub normalized: bool,

    /// Only words with this root
    #[arg(long)]
    pub root: Option<String>,

    /// Only words with this lemma
    #[arg(long)]
    pub lemma: Option<String>,
}

/// Arguments for listing words
#[derive(Parser, Debug, Clone)]
pub struct WordsArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Maximum number of words to print
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Arguments for building a relation graph
#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    #[command(flatten)]
    pub filter: FilterArgs,

    /// Relation kinds to derive (comma-separated)
    #[arg(long, value_delimiter = ',', default_value = "normalized,root,lemma")]
    pub kinds: Vec<GraphKind>,
}

impl GraphArgs {
    /// The graph options selected by `--kinds`.
    pub fn options(&self) -> GraphOptions {
        self.kinds
            .iter()
            .fold(GraphOptions::none(), |options, kind| {
                options.with_kind(kind.relation())
            })
    }
}

/// Relation kinds selectable on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    /// Same canonical form
    Normalized,
    /// Same root
    Root,
    /// Same lemma
    Lemma,
}

impl GraphKind {
    pub fn relation(&self) -> RelationKind {
        match self {
            GraphKind::Normalized => RelationKind::SharedCanonicalForm,
            GraphKind::Root => RelationKind::SharedRoot,
            GraphKind::Lemma => RelationKind::SharedLemma,
        }
    }
}

/// Arguments for normalizing text
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Text to normalize
    #[arg(value_name = "TEXT")]
    pub text: String,
}

/// Arguments for transliteration
#[derive(Parser, Debug, Clone)]
pub struct TransliterateArgs {
    /// Text to transliterate
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Decode Buckwalter back to Arabic script
    #[arg(short, long)]
    pub decode: bool,
}

/// Arguments for exporting a snapshot
#[derive(Parser, Debug, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub dataset: DatasetArgs,

    /// Output JSON file
    #[arg(value_name = "OUTPUT_FILE")]
    pub output: PathBuf,

    /// Export a single chapter summary instead of the corpus snapshot
    #[arg(long, value_name = "CHAPTER")]
    pub chapter: Option<u32>,

    /// Include every word in the corpus snapshot
    #[arg(long, conflicts_with = "chapter")]
    pub all_words: bool,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

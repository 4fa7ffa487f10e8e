//! # quranalyze
//!
//! Structural analysis of the Quranic text: a validated, immutable corpus of
//! chapters, verses and words built from a local JSON dataset, with
//! deterministic normalization and transliteration, composable word filters
//! and graphs relating words that share a linguistic property.
//!
//! ## Features
//!
//! - Strict dataset validation with located errors
//! - Single-pass, table-driven Arabic normalization
//! - Reversible Buckwalter transliteration
//! - Lazy filter chains over the word sequence
//! - Relation graphs by canonical form, root or lemma
//! - Versioned JSON snapshots
//!
//! ## Example
//!
//! ```no_run
//! use quranalyze::corpus::CorpusBuilder;
//! use quranalyze::graph::{GraphBuilder, GraphOptions};
//!
//! let corpus = CorpusBuilder::new("data/surah").build()?;
//! println!("{} words", corpus.total_words());
//!
//! let fatiha = corpus.filter_words().by_surah(1).get();
//! let graph = GraphBuilder::build_from_words(&fatiha, &GraphOptions::default());
//! println!("{} nodes, {} edges", graph.node_count(), graph.edge_count());
//! # Ok::<(), quranalyze::error::QuranalyzeError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod dataset;
pub mod error;
pub mod export;
pub mod filter;
pub mod graph;
pub mod transliteration;

pub mod prelude {
    pub use crate::config::CorpusConfig;
    pub use crate::corpus::{Chapter, Corpus, CorpusBuilder, Verse, Word, WordId};
    pub use crate::error::{QuranalyzeError, Result};
    pub use crate::filter::FilterChain;
    pub use crate::graph::{GraphBuilder, GraphOptions, RelationKind, WordGraph};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

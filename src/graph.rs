//! Relation graphs between words.
//!
//! Two words are related when they share a linguistic property: the same
//! canonical form, the same root or the same lemma. Construction runs in two
//! stages, which can also be used separately:
//!
//! 1. [`RelationBuilder`] groups words by each requested property and emits a
//!    [`Relation`] for every pair inside a group,
//! 2. [`WordGraph::from_relations`] stores them as nodes and edges.
//!
//! [`GraphBuilder::build_from_words`] does both. The graph only holds
//! [`WordId`](crate::corpus::WordId)s; resolve them against the corpus.
//!
//! # Examples
//!
//! ```
//! use quranalyze::corpus::{Word, WordId};
//! use quranalyze::graph::{GraphBuilder, GraphOptions};
//!
//! let words = vec![
//!     Word::new(WordId::new(1, 1, 1), "ٱللَّهِ", "الله", "{ll~ahi"),
//!     Word::new(WordId::new(1, 2, 1), "لِلَّهِ", "لله", "lil~ahi"),
//!     Word::new(WordId::new(2, 7, 0), "ٱللَّهُ", "الله", "{ll~ahu"),
//! ];
//!
//! let graph = GraphBuilder::build_from_words(&words, &GraphOptions::default());
//! assert_eq!(graph.node_count(), 3);
//! assert_eq!(graph.edge_count(), 1);
//! assert!(graph.get_neighbors(&WordId::new(1, 2, 1))?.is_empty());
//! # Ok::<(), quranalyze::error::QuranalyzeError>(())
//! ```

pub mod builder;
pub mod relation;
pub mod word_graph;

use serde::{Deserialize, Serialize};

pub use builder::GraphBuilder;
pub use relation::{Relation, RelationBuilder, RelationKind};
pub use word_graph::WordGraph;

/// Which relation kinds to derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphOptions {
    /// Relate words with the same canonical form.
    pub use_normalized: bool,
    /// Relate words with the same root.
    pub use_root: bool,
    /// Relate words with the same lemma.
    pub use_lemma: bool,
}

impl Default for GraphOptions {
    fn default() -> Self {
        GraphOptions {
            use_normalized: true,
            use_root: true,
            use_lemma: true,
        }
    }
}

impl GraphOptions {
    /// Options deriving no relation at all.
    pub fn none() -> Self {
        GraphOptions {
            use_normalized: false,
            use_root: false,
            use_lemma: false,
        }
    }

    /// Enable one more kind.
    pub fn with_kind(mut self, kind: RelationKind) -> Self {
        match kind {
            RelationKind::SharedCanonicalForm => self.use_normalized = true,
            RelationKind::SharedRoot => self.use_root = true,
            RelationKind::SharedLemma => self.use_lemma = true,
        }
        self
    }

    /// Enabled kinds, in derivation order.
    pub fn kinds(&self) -> Vec<RelationKind> {
        RelationKind::ALL
            .into_iter()
            .filter(|kind| match kind {
                RelationKind::SharedCanonicalForm => self.use_normalized,
                RelationKind::SharedRoot => self.use_root,
                RelationKind::SharedLemma => self.use_lemma,
            })
            .collect()
    }
}

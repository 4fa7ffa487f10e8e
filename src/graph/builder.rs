//! Graph construction from words or relations.

use std::borrow::Borrow;

use crate::corpus::word::Word;
use crate::graph::GraphOptions;
use crate::graph::relation::{Relation, RelationBuilder};
use crate::graph::word_graph::WordGraph;

/// Builds [`WordGraph`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphBuilder;

impl GraphBuilder {
    /// Relate `words` by the kinds enabled in `options`.
    ///
    /// Every distinct input word becomes a node, related or not. Words may be
    /// given as `Word`, `&Word` or `Arc<Word>`.
    pub fn build_from_words<W: Borrow<Word>>(words: &[W], options: &GraphOptions) -> WordGraph {
        let relations = RelationBuilder::new(*options).build(words);
        let graph = Self::build_from_relations(words, relations);

        log::debug!(
            "Built word graph: {} nodes, {} edges from {} input words",
            graph.node_count(),
            graph.edge_count(),
            words.len()
        );

        graph
    }

    /// Store precomputed relations, with `words` as the node set.
    pub fn build_from_relations<W: Borrow<Word>>(
        words: &[W],
        relations: Vec<Relation>,
    ) -> WordGraph {
        let nodes = words.iter().map(|w| <W as Borrow<Word>>::borrow(w).id);
        WordGraph::from_relations(nodes, relations)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::corpus::word::WordId;
    use crate::graph::RelationKind;

    fn word(c: u32, v: u32, p: usize, normalized: &str) -> Arc<Word> {
        Arc::new(Word::new(WordId::new(c, v, p), normalized, normalized, ""))
    }

    #[test]
    fn test_three_identical_and_one_distinct() {
        let words = vec![
            word(1, 1, 0, "الله"),
            word(1, 2, 0, "الله"),
            word(2, 1, 0, "الله"),
            word(2, 1, 1, "رب"),
        ];
        let graph = GraphBuilder::build_from_words(&words, &GraphOptions::default());

        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.get_neighbors(&WordId::new(2, 1, 1)).unwrap().is_empty());
        assert!(graph.edges().iter().all(|e| e.weight == 0.8));
    }

    #[test]
    fn test_multi_relation_pair_keeps_parallel_edges() {
        let a = Arc::new(
            Word::new(WordId::new(1, 1, 0), "a", "same", "")
                .with_root("r")
                .with_lemma("l"),
        );
        let b = Arc::new(
            Word::new(WordId::new(1, 1, 1), "b", "same", "")
                .with_root("r")
                .with_lemma("l"),
        );
        let words = [a.clone(), b.clone()];
        let graph = GraphBuilder::build_from_words(&words, &GraphOptions::default());

        assert_eq!(graph.edge_count(), 3);
        for kind in RelationKind::ALL {
            assert!(graph.has_edge(&a.id, &b.id, kind));
        }
        assert_eq!(graph.get_neighbors(&a.id).unwrap().len(), 1);
    }

    #[test]
    fn test_absent_fields_yield_no_edges() {
        let words = vec![word(1, 1, 0, "x"), word(1, 1, 1, "x")];
        let options = GraphOptions {
            use_normalized: false,
            ..Default::default()
        };
        let graph = GraphBuilder::build_from_words(&words, &options);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_duplicate_input_collapses() {
        let w = word(1, 1, 0, "x");
        let graph = GraphBuilder::build_from_words(&[w.clone(), w], &GraphOptions::default());
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_empty_input() {
        let words: Vec<Word> = Vec::new();
        let graph = GraphBuilder::build_from_words(&words, &GraphOptions::default());
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_borrowed_words() {
        let owned = vec![
            Word::new(WordId::new(1, 1, 0), "a", "x", ""),
            Word::new(WordId::new(1, 1, 1), "b", "x", ""),
        ];
        let borrowed: Vec<&Word> = owned.iter().collect();
        let graph = GraphBuilder::build_from_words(&borrowed, &GraphOptions::default());
        assert_eq!(graph.edge_count(), 1);
    }
}

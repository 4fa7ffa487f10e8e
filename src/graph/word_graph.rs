//! Node and edge storage for word relations.

use std::collections::BTreeSet;

use ahash::{AHashMap, AHashSet};

use crate::corpus::word::WordId;
use crate::error::{QuranalyzeError, Result};
use crate::graph::relation::{Relation, RelationKind};

/// An undirected multigraph over word identities.
///
/// Each distinct [`WordId`] is one node. Two nodes carry at most one edge per
/// [`RelationKind`], so a pair related in several ways has parallel edges of
/// different kinds. Self loops are never stored.
#[derive(Debug, Clone, Default)]
pub struct WordGraph {
    nodes: Vec<WordId>,
    index: AHashMap<WordId, usize>,
    /// Edge indices incident to each node, by node slot.
    incident: Vec<Vec<usize>>,
    edges: Vec<Relation>,
    edge_keys: AHashSet<(WordId, WordId, RelationKind)>,
    kind_counts: AHashMap<RelationKind, usize>,
}

impl WordGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from explicit nodes and relations.
    ///
    /// Every relation endpoint becomes a node even when absent from `nodes`.
    /// Endpoints are reordered so `source < target`. Repeated nodes, repeated
    /// (unordered pair, kind) relations and self loops are dropped.
    pub fn from_relations<N, R>(nodes: N, relations: R) -> Self
    where
        N: IntoIterator<Item = WordId>,
        R: IntoIterator<Item = Relation>,
    {
        let mut graph = WordGraph::new();
        for id in nodes {
            graph.add_node(id);
        }
        for relation in relations {
            graph.add_relation(relation);
        }
        graph
    }

    fn add_node(&mut self, id: WordId) -> usize {
        if let Some(&slot) = self.index.get(&id) {
            return slot;
        }
        let slot = self.nodes.len();
        self.nodes.push(id);
        self.index.insert(id, slot);
        self.incident.push(Vec::new());
        slot
    }

    fn add_relation(&mut self, mut relation: Relation) -> bool {
        if relation.source > relation.target {
            std::mem::swap(&mut relation.source, &mut relation.target);
        }
        if relation.is_self_loop()
            || !self
                .edge_keys
                .insert((relation.source, relation.target, relation.kind))
        {
            return false;
        }

        let source = self.add_node(relation.source);
        let target = self.add_node(relation.target);
        let edge = self.edges.len();
        self.incident[source].push(edge);
        self.incident[target].push(edge);
        *self.kind_counts.entry(relation.kind).or_insert(0) += 1;
        self.edges.push(relation);
        true
    }

    fn slot(&self, id: &WordId) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| QuranalyzeError::not_found(format!("graph node {id}")))
    }

    pub fn contains(&self, id: &WordId) -> bool {
        self.index.contains_key(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> &[WordId] {
        &self.nodes
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> &[Relation] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Distinct nodes adjacent to `id` through any kind of edge.
    pub fn get_neighbors(&self, id: &WordId) -> Result<BTreeSet<WordId>> {
        let slot = self.slot(id)?;
        Ok(self.incident[slot]
            .iter()
            .filter_map(|&edge| self.edges[edge].other(id))
            .collect())
    }

    /// Edges incident to `id`.
    pub fn edges_for(&self, id: &WordId) -> Result<Vec<&Relation>> {
        let slot = self.slot(id)?;
        Ok(self.incident[slot]
            .iter()
            .map(|&edge| &self.edges[edge])
            .collect())
    }

    /// Number of edges incident to `id`. Parallel edges count separately.
    pub fn degree(&self, id: &WordId) -> Result<usize> {
        Ok(self.incident[self.slot(id)?].len())
    }

    pub fn has_edge(&self, a: &WordId, b: &WordId, kind: RelationKind) -> bool {
        let key = if a <= b { (*a, *b, kind) } else { (*b, *a, kind) };
        self.edge_keys.contains(&key)
    }

    pub fn edge_count_by_kind(&self, kind: RelationKind) -> usize {
        self.kind_counts.get(&kind).copied().unwrap_or(0)
    }

    /// The graph induced by `ids`: those of them that are nodes, and every
    /// edge between two of them. Unknown ids are ignored.
    pub fn subgraph<'a, I>(&self, ids: I) -> WordGraph
    where
        I: IntoIterator<Item = &'a WordId>,
    {
        let keep: Vec<WordId> = ids
            .into_iter()
            .filter(|id| self.contains(id))
            .copied()
            .collect();
        let members: AHashSet<WordId> = keep.iter().copied().collect();

        let edges = self
            .edges
            .iter()
            .filter(|e| members.contains(&e.source) && members.contains(&e.target))
            .cloned();

        WordGraph::from_relations(keep, edges)
    }

    /// Nodes with no incident edge.
    pub fn isolated(&self) -> impl Iterator<Item = &WordId> {
        self.nodes
            .iter()
            .zip(&self.incident)
            .filter(|(_, edges)| edges.is_empty())
            .map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(c: u32, v: u32, p: usize) -> WordId {
        WordId::new(c, v, p)
    }

    fn triangle() -> WordGraph {
        let (a, b, c, d) = (id(1, 1, 0), id(1, 2, 0), id(2, 1, 0), id(3, 1, 0));
        WordGraph::from_relations(
            [a, b, c, d],
            [
                Relation::new(a, b, RelationKind::SharedCanonicalForm, "x"),
                Relation::new(a, c, RelationKind::SharedCanonicalForm, "x"),
                Relation::new(b, c, RelationKind::SharedCanonicalForm, "x"),
            ],
        )
    }

    #[test]
    fn test_counts_and_isolated_node() {
        let graph = triangle();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 3);
        assert!(graph.get_neighbors(&id(3, 1, 0)).unwrap().is_empty());
        assert_eq!(graph.isolated().collect::<Vec<_>>(), vec![&id(3, 1, 0)]);
        assert_eq!(
            graph.get_neighbors(&id(1, 1, 0)).unwrap(),
            BTreeSet::from([id(1, 2, 0), id(2, 1, 0)])
        );
    }

    #[test]
    fn test_unknown_node() {
        let graph = triangle();
        let missing = id(9, 9, 9);
        assert!(!graph.contains(&missing));
        assert!(graph.get_neighbors(&missing).unwrap_err().is_not_found());
        assert!(graph.degree(&missing).is_err());
        assert!(graph.edges_for(&missing).is_err());
    }

    #[test]
    fn test_parallel_edges_and_duplicates() {
        let (a, b) = (id(1, 1, 0), id(1, 1, 1));
        let graph = WordGraph::from_relations(
            [a, b, a],
            [
                Relation::new(a, b, RelationKind::SharedCanonicalForm, "x"),
                Relation::new(b, a, RelationKind::SharedCanonicalForm, "x"),
                Relation::new(a, b, RelationKind::SharedRoot, "r"),
                Relation::new(a, a, RelationKind::SharedLemma, "l"),
            ],
        );

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.degree(&a).unwrap(), 2);
        assert_eq!(graph.get_neighbors(&a).unwrap().len(), 1);
        assert!(graph.has_edge(&b, &a, RelationKind::SharedRoot));
        assert!(!graph.has_edge(&a, &b, RelationKind::SharedLemma));
        assert_eq!(graph.edge_count_by_kind(RelationKind::SharedRoot), 1);
    }

    #[test]
    fn test_reversed_endpoints_are_one_edge() {
        let (a, b) = (id(1, 1, 0), id(2, 1, 0));
        let reversed = Relation {
            source: b,
            target: a,
            kind: RelationKind::SharedRoot,
            key: "r".to_string(),
            weight: 1.0,
        };
        let graph = WordGraph::from_relations(
            [a, b],
            [Relation::new(a, b, RelationKind::SharedRoot, "r"), reversed.clone()],
        );

        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.degree(&a).unwrap(), 1);
        assert_eq!(graph.edge_count_by_kind(RelationKind::SharedRoot), 1);

        let alone = WordGraph::from_relations([], [reversed]);
        assert_eq!(alone.edges()[0].source, a);
        assert_eq!(alone.edges()[0].target, b);
        assert!(alone.has_edge(&a, &b, RelationKind::SharedRoot));
    }

    #[test]
    fn test_edge_count_by_kind() {
        let graph = triangle();
        assert_eq!(graph.edge_count_by_kind(RelationKind::SharedCanonicalForm), 3);
        assert_eq!(graph.edge_count_by_kind(RelationKind::SharedLemma), 0);
        assert_eq!(WordGraph::new().edge_count_by_kind(RelationKind::SharedRoot), 0);
    }

    #[test]
    fn test_relation_endpoints_become_nodes() {
        let (a, b) = (id(1, 1, 0), id(1, 1, 1));
        let graph = WordGraph::from_relations(
            [],
            [Relation::new(a, b, RelationKind::SharedLemma, "l")],
        );
        assert_eq!(graph.nodes(), &[a, b]);
    }

    #[test]
    fn test_subgraph() {
        let graph = triangle();
        let sub = graph.subgraph(&[id(1, 1, 0), id(2, 1, 0), id(3, 1, 0), id(7, 7, 7)]);

        assert_eq!(sub.node_count(), 3);
        assert_eq!(sub.edge_count(), 1);
        assert_eq!(sub.edges_for(&id(2, 1, 0)).unwrap()[0].source, id(1, 1, 0));
    }
}

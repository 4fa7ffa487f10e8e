//! Pairwise word relations.

use std::borrow::Borrow;
use std::collections::hash_map::Entry;
use std::fmt;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::corpus::word::{Word, WordId};
use crate::graph::GraphOptions;

/// The property two related words share.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum RelationKind {
    SharedCanonicalForm,
    SharedRoot,
    SharedLemma,
}

impl RelationKind {
    pub const ALL: [RelationKind; 3] = [
        RelationKind::SharedCanonicalForm,
        RelationKind::SharedRoot,
        RelationKind::SharedLemma,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationKind::SharedCanonicalForm => "shared-canonical-form",
            RelationKind::SharedRoot => "shared-root",
            RelationKind::SharedLemma => "shared-lemma",
        }
    }

    /// Edge weight used for this kind.
    pub fn default_weight(&self) -> f32 {
        match self {
            RelationKind::SharedRoot => 1.0,
            RelationKind::SharedCanonicalForm => 0.8,
            RelationKind::SharedLemma => 0.5,
        }
    }

    /// The grouping key of `word` for this kind.
    ///
    /// `None` excludes the word from grouping: absent root or lemma, or an
    /// empty canonical form.
    pub fn key<'w>(&self, word: &'w Word) -> Option<&'w str> {
        match self {
            RelationKind::SharedCanonicalForm => {
                Some(word.normalized.as_str()).filter(|form| !form.is_empty())
            }
            RelationKind::SharedRoot => word.root.as_deref(),
            RelationKind::SharedLemma => word.lemma.as_deref(),
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An undirected relation between two distinct words.
///
/// [`Relation::new`] stores the endpoints in ascending order, and a
/// [`WordGraph`](crate::graph::WordGraph) reorders any relation it stores, so
/// graph edges always have `source < target`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    pub source: WordId,
    pub target: WordId,
    pub kind: RelationKind,
    /// The shared value (canonical form, root or lemma).
    pub key: String,
    pub weight: f32,
}

impl Relation {
    /// Relation of `kind` between `a` and `b`, weighted with the kind's default.
    pub fn new<S: Into<String>>(a: WordId, b: WordId, kind: RelationKind, key: S) -> Self {
        let (source, target) = if a <= b { (a, b) } else { (b, a) };
        Relation {
            source,
            target,
            kind,
            key: key.into(),
            weight: kind.default_weight(),
        }
    }

    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    pub fn involves(&self, id: &WordId) -> bool {
        self.source == *id || self.target == *id
    }

    /// The endpoint opposite `id`, if `id` is an endpoint.
    pub fn other(&self, id: &WordId) -> Option<WordId> {
        if self.source == *id {
            Some(self.target)
        } else if self.target == *id {
            Some(self.source)
        } else {
            None
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// Derives relations from a word collection.
#[derive(Debug, Clone, Default)]
pub struct RelationBuilder {
    options: GraphOptions,
}

impl RelationBuilder {
    pub fn new(options: GraphOptions) -> Self {
        RelationBuilder { options }
    }

    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// All relations among `words` for the enabled kinds.
    ///
    /// A word listed more than once takes part only once. Within each kind,
    /// groups appear in order of first member and pairs in input order.
    /// Quadratic in the size of the largest group.
    pub fn build<W: Borrow<Word>>(&self, words: &[W]) -> Vec<Relation> {
        let unique = dedup(words);

        let mut relations = Vec::new();
        for kind in self.options.kinds() {
            let before = relations.len();
            relations_of_kind(kind, &unique, &mut relations);

            log::debug!(
                "{} relations of kind {kind} among {} words",
                relations.len() - before,
                unique.len()
            );
        }
        relations
    }
}

/// Input words with repeated identities dropped, first occurrence kept.
fn dedup<W: Borrow<Word>>(words: &[W]) -> Vec<&Word> {
    let mut seen = AHashSet::with_capacity(words.len());
    words
        .iter()
        .map(|w| <W as Borrow<Word>>::borrow(w))
        .filter(|word| seen.insert(word.id))
        .collect()
}

fn relations_of_kind(kind: RelationKind, words: &[&Word], out: &mut Vec<Relation>) {
    let mut slots: AHashMap<&str, usize> = AHashMap::new();
    let mut groups: Vec<(&str, Vec<WordId>)> = Vec::new();

    for &word in words {
        let Some(key) = kind.key(word) else {
            continue;
        };
        match slots.entry(key) {
            Entry::Occupied(slot) => groups[*slot.get()].1.push(word.id),
            Entry::Vacant(slot) => {
                slot.insert(groups.len());
                groups.push((key, vec![word.id]));
            }
        }
    }

    if groups.is_empty() && !words.is_empty() && kind != RelationKind::SharedCanonicalForm {
        log::warn!("No word carries the field needed for {kind} relations; none derived");
        return;
    }

    for (key, members) in groups.iter().filter(|(_, members)| members.len() > 1) {
        for (i, a) in members.iter().enumerate() {
            for b in &members[i + 1..] {
                out.push(Relation::new(*a, *b, kind, *key));
            }
        }
    }
}

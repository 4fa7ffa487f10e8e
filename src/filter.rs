//! Composable, lazy word filters.
//!
//! A [`FilterChain`] borrows a word collection and accumulates predicates.
//! Every chaining call returns a new chain and leaves the receiver untouched,
//! so a partial chain can be reused as the base of several queries. Nothing
//! is evaluated until a terminal call ([`get`](FilterChain::get),
//! [`count`](FilterChain::count), [`first`](FilterChain::first),
//! [`last`](FilterChain::last)), which applies all predicates as a logical
//! AND, in accumulation order, preserving the order of the seed collection.
//!
//! Evaluation is a linear scan per terminal call, `O(n × k)` for `n` words
//! and `k` predicates. No index is built.
//!
//! Text predicates compare the query verbatim. To match canonical forms,
//! normalize the query first with the corpus normalizer.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use quranalyze::corpus::{Word, WordId};
//! use quranalyze::filter::FilterChain;
//!
//! let words: Vec<Arc<Word>> = vec![
//!     Arc::new(Word::new(WordId::new(1, 1, 0), "بِسْمِ", "بسم", "bisomi")),
//!     Arc::new(Word::new(WordId::new(2, 1, 0), "الٓمٓ", "الم", "Al^m^")),
//! ];
//!
//! let chain = FilterChain::new(&words);
//! assert_eq!(chain.by_surah(1).count(), 1);
//! assert_eq!(chain.by_surah(1).by_surah(2).count(), 0);
//! assert_eq!(chain.by_text("الم", true).first().unwrap().id.chapter, 2);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::corpus::word::Word;
use crate::dataset::CHAPTER_COUNT;

type CustomPredicate<'a> = Arc<dyn Fn(&Word) -> bool + Send + Sync + 'a>;

/// A single accumulated condition.
#[derive(Clone)]
enum Predicate<'a> {
    Surah(u32),
    Ayah { surah: u32, ayah: u32 },
    Text { query: String, normalized: bool },
    TextContains { query: String, normalized: bool },
    Root(String),
    Lemma(String),
    Custom(CustomPredicate<'a>),
}

impl Predicate<'_> {
    fn matches(&self, word: &Word) -> bool {
        match self {
            Predicate::Surah(surah) => word.id.chapter == *surah,
            Predicate::Ayah { surah, ayah } => {
                word.id.chapter == *surah && word.id.verse == *ayah
            }
            Predicate::Text { query, normalized } => text_of(word, *normalized) == query.as_str(),
            Predicate::TextContains { query, normalized } => {
                text_of(word, *normalized).contains(query.as_str())
            }
            Predicate::Root(root) => word.root.as_deref() == Some(root.as_str()),
            Predicate::Lemma(lemma) => word.lemma.as_deref() == Some(lemma.as_str()),
            Predicate::Custom(predicate) => predicate(word),
        }
    }
}

impl fmt::Display for Predicate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let form = |normalized: bool| if normalized { "normalized" } else { "text" };
        match self {
            Predicate::Surah(surah) => write!(f, "surah = {surah}"),
            Predicate::Ayah { surah, ayah } => write!(f, "ayah = {surah}:{ayah}"),
            Predicate::Text { query, normalized } => {
                write!(f, "{} = {query:?}", form(*normalized))
            }
            Predicate::TextContains { query, normalized } => {
                write!(f, "{} contains {query:?}", form(*normalized))
            }
            Predicate::Root(root) => write!(f, "root = {root:?}"),
            Predicate::Lemma(lemma) => write!(f, "lemma = {lemma:?}"),
            Predicate::Custom(_) => write!(f, "custom"),
        }
    }
}

fn log_out_of_range(surah: u32) {
    if !(1..=CHAPTER_COUNT).contains(&surah) {
        log::debug!("Chapter {surah} is outside 1..={CHAPTER_COUNT}; the filter matches no word");
    }
}

fn text_of(word: &Word, normalized: bool) -> &str {
    if normalized {
        &word.normalized
    } else {
        &word.text
    }
}

/// Lazy predicate pipeline over a borrowed word collection.
#[derive(Clone)]
pub struct FilterChain<'a> {
    words: &'a [Arc<Word>],
    predicates: Vec<Predicate<'a>>,
}

impl<'a> FilterChain<'a> {
    /// Start an empty chain over `words`. With no predicates every word matches.
    pub fn new(words: &'a [Arc<Word>]) -> Self {
        FilterChain {
            words,
            predicates: Vec::new(),
        }
    }

    fn with(&self, predicate: Predicate<'a>) -> Self {
        let mut predicates = Vec::with_capacity(self.predicates.len() + 1);
        predicates.extend(self.predicates.iter().cloned());
        predicates.push(predicate);
        FilterChain {
            words: self.words,
            predicates,
        }
    }

    /// Words of chapter `surah`.
    ///
    /// A chapter number outside `1..=114` is not an error; it matches no word.
    pub fn by_surah(&self, surah: u32) -> Self {
        log_out_of_range(surah);
        self.with(Predicate::Surah(surah))
    }

    /// Words of verse `ayah` of chapter `surah`. Out-of-range numbers match
    /// no word.
    pub fn by_ayah(&self, surah: u32, ayah: u32) -> Self {
        log_out_of_range(surah);
        if ayah == 0 {
            log::debug!("Verse numbers start at 1; ayah 0 matches no word");
        }
        self.with(Predicate::Ayah { surah, ayah })
    }

    /// Words whose raw (or, with `normalized`, canonical) text equals `text`.
    pub fn by_text<S: Into<String>>(&self, text: S, normalized: bool) -> Self {
        self.with(Predicate::Text {
            query: text.into(),
            normalized,
        })
    }

    /// Words whose raw (or canonical) text contains `substring`.
    ///
    /// An empty substring matches every word.
    pub fn by_text_contains<S: Into<String>>(&self, substring: S, normalized: bool) -> Self {
        self.with(Predicate::TextContains {
            query: substring.into(),
            normalized,
        })
    }

    /// Words annotated with `root`. Words without a root never match.
    pub fn by_root<S: Into<String>>(&self, root: S) -> Self {
        self.with(Predicate::Root(root.into()))
    }

    /// Words annotated with `lemma`. Words without a lemma never match.
    pub fn by_lemma<S: Into<String>>(&self, lemma: S) -> Self {
        self.with(Predicate::Lemma(lemma.into()))
    }

    /// Words accepted by an arbitrary predicate.
    pub fn by_custom<F>(&self, predicate: F) -> Self
    where
        F: Fn(&Word) -> bool + Send + Sync + 'a,
    {
        self.with(Predicate::Custom(Arc::new(predicate)))
    }

    /// Number of accumulated predicates.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    fn accepts(&self, word: &Word) -> bool {
        self.predicates.iter().all(|p| p.matches(word))
    }

    /// Iterate over matching words without collecting them.
    pub fn iter(&self) -> impl Iterator<Item = &'a Arc<Word>> + '_ {
        self.words.iter().filter(move |w| self.accepts(w))
    }

    /// Materialize the matching words in seed order.
    pub fn get(&self) -> Vec<Arc<Word>> {
        self.iter().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn first(&self) -> Option<Arc<Word>> {
        self.iter().next().cloned()
    }

    pub fn last(&self) -> Option<Arc<Word>> {
        self.words
            .iter()
            .rev()
            .find(|w| self.accepts(w))
            .cloned()
    }

    /// Human readable summary of the accumulated predicates.
    pub fn describe(&self) -> String {
        if self.predicates.is_empty() {
            return "all words".to_string();
        }
        self.predicates
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" AND ")
    }
}

impl fmt::Debug for FilterChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("words", &self.words.len())
            .field("predicates", &self.describe())
            .finish()
    }
}

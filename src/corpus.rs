//! The immutable in-memory corpus.
//!
//! A [`Corpus`] owns every chapter, verse and word of a dataset. It is built
//! once by [`CorpusBuilder`], caches its statistics at build time and only
//! exposes read-only queries afterwards. It is `Send + Sync` and can be
//! shared across threads behind an `Arc`.
//!
//! # Examples
//!
//! ```no_run
//! use quranalyze::corpus::CorpusBuilder;
//!
//! let corpus = CorpusBuilder::new("data/surah").build()?;
//!
//! let opening = corpus.get_chapter(1)?;
//! println!("{} has {} verses", opening.name(), opening.verse_count());
//!
//! let words = corpus.filter_words().by_surah(1).get();
//! let first = corpus.word(&words[0].id)?;
//! assert_eq!(first.position(), 0);
//! # Ok::<(), quranalyze::error::QuranalyzeError>(())
//! ```

pub mod builder;
pub mod chapter;
pub mod morphology;
pub mod stats;
pub mod word;

use std::collections::BTreeMap;
use std::sync::Arc;

use ahash::AHashMap;

use crate::analysis::normalizer::Normalizer;
use crate::error::{QuranalyzeError, Result};
use crate::filter::FilterChain;
use crate::transliteration::Transliterator;

pub use builder::CorpusBuilder;
pub use chapter::{Chapter, Verse};
pub use morphology::{LookupAnalyzer, Morphology, MorphologyAnalyzer};
pub use stats::CorpusStats;
pub use word::{Word, WordId};

/// All chapters of a dataset with their words, built once.
#[derive(Debug)]
pub struct Corpus {
    chapters: Vec<Chapter>,
    /// Every word in chapter, verse, position order.
    words: Vec<Arc<Word>>,
    word_index: AHashMap<WordId, usize>,
    stats: CorpusStats,
    normalizer: Normalizer,
    transliterator: Transliterator,
}

impl Corpus {
    pub(crate) fn new(
        chapters: Vec<Chapter>,
        normalizer: Normalizer,
        transliterator: Transliterator,
    ) -> Self {
        let words: Vec<Arc<Word>> = chapters
            .iter()
            .flat_map(|c| c.words())
            .cloned()
            .collect();
        let word_index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.id, i))
            .collect();
        let stats = CorpusStats::compute(&chapters);

        Corpus {
            chapters,
            words,
            word_index,
            stats,
            normalizer,
            transliterator,
        }
    }

    pub fn total_words(&self) -> usize {
        self.stats.total_words
    }

    pub fn total_verses(&self) -> usize {
        self.stats.total_verses
    }

    pub fn total_chapters(&self) -> usize {
        self.stats.total_chapters
    }

    /// Word count of every chapter, including chapters with no words.
    pub fn word_count_by_chapter(&self) -> &BTreeMap<u32, usize> {
        &self.stats.word_count_by_chapter
    }

    /// Statistics cached at build time.
    pub fn stats(&self) -> &CorpusStats {
        &self.stats
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    /// Every word in reading order.
    pub fn words(&self) -> &[Arc<Word>] {
        &self.words
    }

    /// Chapter by 1-based index.
    pub fn get_chapter(&self, index: u32) -> Result<&Chapter> {
        (index as usize)
            .checked_sub(1)
            .and_then(|slot| self.chapters.get(slot))
            .ok_or_else(|| {
                QuranalyzeError::not_found(format!(
                    "chapter {index} (corpus has {} chapters)",
                    self.chapters.len()
                ))
            })
    }

    /// Verse by chapter and 1-based verse index.
    pub fn get_verse(&self, chapter: u32, verse: u32) -> Result<&Verse> {
        let owner = self.get_chapter(chapter)?;
        owner.verse(verse).ok_or_else(|| {
            QuranalyzeError::not_found(format!(
                "verse {chapter}:{verse} (chapter has {} verses)",
                owner.verse_count()
            ))
        })
    }

    /// Resolve a word coordinate.
    pub fn word(&self, id: &WordId) -> Result<&Arc<Word>> {
        self.word_index
            .get(id)
            .map(|&i| &self.words[i])
            .ok_or_else(|| QuranalyzeError::not_found(format!("word {id}")))
    }

    /// Resolve many word coordinates, failing on the first unknown one.
    pub fn resolve<'a, I>(&self, ids: I) -> Result<Vec<Arc<Word>>>
    where
        I: IntoIterator<Item = &'a WordId>,
    {
        ids.into_iter()
            .map(|id| self.word(id).cloned())
            .collect()
    }

    /// The verse a word belongs to.
    pub fn verse_of(&self, id: &WordId) -> Result<&Verse> {
        self.word(id)?;
        self.get_verse(id.chapter, id.verse)
    }

    /// Start a filter chain over every word of the corpus.
    pub fn filter_words(&self) -> FilterChain<'_> {
        FilterChain::new(&self.words)
    }

    /// The normalizer words were built with, for normalizing queries.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// The transliterator words were built with.
    pub fn transliterator(&self) -> &Transliterator {
        &self.transliterator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::NormalizationTable;
    use crate::transliteration::TransliterationTable;

    fn corpus() -> Corpus {
        let word = |c, v, p, t: &str| Arc::new(Word::new(WordId::new(c, v, p), t, t, t));
        let chapters = vec![
            Chapter::new(
                1,
                "one".into(),
                None,
                None,
                vec![
                    Verse::new(1, 1, "a b".into(), vec![word(1, 1, 0, "a"), word(1, 1, 1, "b")]),
                    Verse::new(1, 2, "c".into(), vec![word(1, 2, 0, "c")]),
                ],
            ),
            Chapter::new(
                2,
                "two".into(),
                None,
                None,
                vec![Verse::new(2, 1, "".into(), Vec::new())],
            ),
        ];
        Corpus::new(
            chapters,
            Normalizer::new(NormalizationTable::default()).unwrap(),
            Transliterator::new(TransliterationTable::default()).unwrap(),
        )
    }

    #[test]
    fn test_corpus_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Corpus>();
        assert_send_sync::<Word>();
    }

    #[test]
    fn test_totals() {
        let corpus = corpus();
        assert_eq!(corpus.total_chapters(), 2);
        assert_eq!(corpus.total_verses(), 3);
        assert_eq!(corpus.total_words(), 3);
        assert_eq!(
            corpus.word_count_by_chapter().iter().collect::<Vec<_>>(),
            vec![(&1, &3), (&2, &0)]
        );
    }

    #[test]
    fn test_lookups() {
        let corpus = corpus();
        assert_eq!(corpus.get_chapter(2).unwrap().name(), "two");
        assert!(corpus.get_chapter(0).unwrap_err().is_not_found());
        assert!(corpus.get_chapter(3).unwrap_err().is_not_found());

        assert_eq!(corpus.get_verse(1, 2).unwrap().text(), "c");
        assert!(corpus.get_verse(1, 3).unwrap_err().is_not_found());

        let id = WordId::new(1, 1, 1);
        assert_eq!(corpus.word(&id).unwrap().text, "b");
        assert_eq!(corpus.verse_of(&id).unwrap().index(), 1);
        assert!(corpus.word(&WordId::new(2, 1, 0)).is_err());
    }

    #[test]
    fn test_resolve() {
        let corpus = corpus();
        let ids = [WordId::new(1, 2, 0), WordId::new(1, 1, 0)];
        let words = corpus.resolve(&ids).unwrap();
        assert_eq!(
            words.iter().map(|w| w.text.as_str()).collect::<Vec<_>>(),
            vec!["c", "a"]
        );
        assert!(corpus.resolve(&[WordId::new(9, 9, 9)]).is_err());
    }

    #[test]
    fn test_words_in_reading_order() {
        let corpus = corpus();
        let ids: Vec<WordId> = corpus.words().iter().map(|w| w.id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }
}

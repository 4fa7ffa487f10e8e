//! Corpus-wide statistics computed once at build time.

use std::collections::BTreeMap;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::corpus::chapter::Chapter;

/// Counts over the whole corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total_chapters: usize,
    pub total_verses: usize,
    pub total_words: usize,
    /// Distinct non-empty canonical forms.
    pub distinct_normalized: usize,
    /// Word count of every chapter, zero counts included.
    pub word_count_by_chapter: BTreeMap<u32, usize>,
}

impl CorpusStats {
    pub fn compute(chapters: &[Chapter]) -> Self {
        let mut forms = AHashSet::new();
        let mut stats = CorpusStats {
            total_chapters: chapters.len(),
            ..Default::default()
        };

        for chapter in chapters {
            let words = chapter.word_count();
            stats.total_verses += chapter.verse_count();
            stats.total_words += words;
            stats.word_count_by_chapter.insert(chapter.index(), words);
            forms.extend(
                chapter
                    .words()
                    .map(|w| w.normalized.as_str())
                    .filter(|form| !form.is_empty()),
            );
        }
        stats.distinct_normalized = forms.len();

        stats
    }

    /// Mean words per verse, 0 for an empty corpus.
    pub fn words_per_verse(&self) -> f64 {
        if self.total_verses == 0 {
            0.0
        } else {
            self.total_words as f64 / self.total_verses as f64
        }
    }
}

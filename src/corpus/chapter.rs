//! Chapters and verses of a built corpus.

use std::sync::Arc;

use serde::Serialize;

use crate::corpus::word::Word;

/// A verse and the words cut from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verse {
    chapter: u32,
    index: u32,
    text: String,
    words: Vec<Arc<Word>>,
}

impl Verse {
    pub(crate) fn new(chapter: u32, index: u32, text: String, words: Vec<Arc<Word>>) -> Self {
        Verse {
            chapter,
            index,
            text,
            words,
        }
    }

    /// Index of the owning chapter.
    pub fn chapter(&self) -> u32 {
        self.chapter
    }

    /// 1-based index within the chapter.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Raw verse text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Words in position order.
    pub fn words(&self) -> &[Arc<Word>] {
        &self.words
    }

    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// A chapter and its verses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Chapter {
    index: u32,
    name: String,
    english_name: Option<String>,
    revelation_type: Option<String>,
    verses: Vec<Verse>,
}

impl Chapter {
    pub(crate) fn new(
        index: u32,
        name: String,
        english_name: Option<String>,
        revelation_type: Option<String>,
        verses: Vec<Verse>,
    ) -> Self {
        Chapter {
            index,
            name,
            english_name,
            revelation_type,
            verses,
        }
    }

    /// 1-based chapter index.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Canonical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn english_name(&self) -> Option<&str> {
        self.english_name.as_deref()
    }

    /// Place of revelation, as recorded in the dataset.
    pub fn revelation_type(&self) -> Option<&str> {
        self.revelation_type.as_deref()
    }

    pub fn verses(&self) -> &[Verse] {
        &self.verses
    }

    /// Verse by its 1-based index.
    pub fn verse(&self, index: u32) -> Option<&Verse> {
        let slot = (index as usize).checked_sub(1)?;
        self.verses.get(slot)
    }

    /// Number of verses. Equal to the declared count of the record.
    pub fn verse_count(&self) -> usize {
        self.verses.len()
    }

    pub fn word_count(&self) -> usize {
        self.verses.iter().map(Verse::word_count).sum()
    }

    /// All words of the chapter in reading order.
    pub fn words(&self) -> impl Iterator<Item = &Arc<Word>> {
        self.verses.iter().flat_map(|v| v.words.iter())
    }
}

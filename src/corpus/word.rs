//! Word identity and word records.
//!
//! A [`Word`] never points back at its verse or chapter. Its [`WordId`]
//! (chapter, verse, position) is the coordinate every other structure uses,
//! and [`Corpus::word`](crate::corpus::Corpus::word) resolves it.
//!
//! # Examples
//!
//! ```
//! use quranalyze::corpus::word::{Word, WordId};
//!
//! let id = WordId::new(1, 1, 0);
//! let word = Word::new(id, "بِسْمِ", "بسم", "bisomi").with_root("smw");
//!
//! assert_eq!(id.to_string(), "1:1:0");
//! assert_eq!(word.root.as_deref(), Some("smw"));
//! assert_eq!(word.lemma, None);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuranalyzeError;

/// Globally unique word coordinate: 1-based chapter and verse, 0-based position.
///
/// Orders by chapter, then verse, then position, which is reading order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct WordId {
    pub chapter: u32,
    pub verse: u32,
    pub position: usize,
}

impl WordId {
    pub fn new(chapter: u32, verse: u32, position: usize) -> Self {
        WordId {
            chapter,
            verse,
            position,
        }
    }
}

impl fmt::Display for WordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.chapter, self.verse, self.position)
    }
}

impl FromStr for WordId {
    type Err = QuranalyzeError;

    /// Parse the `chapter:verse:position` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || QuranalyzeError::invalid_config(format!("invalid word id {s:?}"));

        let mut parts = s.split(':');
        let (Some(chapter), Some(verse), Some(position), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        Ok(WordId {
            chapter: chapter.parse().map_err(|_| invalid())?,
            verse: verse.parse().map_err(|_| invalid())?,
            position: position.parse().map_err(|_| invalid())?,
        })
    }
}

/// A word token of the corpus with its derived forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    pub id: WordId,

    /// Text as it appears in the verse.
    pub text: String,

    /// Canonical comparable form.
    pub normalized: String,

    /// ASCII transliteration of `text`.
    pub transliteration: String,

    /// Morphological root, when an analyzer supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,

    /// Lemma, when an analyzer supplied one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
}

impl Word {
    pub fn new<T, N, R>(id: WordId, text: T, normalized: N, transliteration: R) -> Self
    where
        T: Into<String>,
        N: Into<String>,
        R: Into<String>,
    {
        Word {
            id,
            text: text.into(),
            normalized: normalized.into(),
            transliteration: transliteration.into(),
            root: None,
            lemma: None,
        }
    }

    pub fn with_root<S: Into<String>>(mut self, root: S) -> Self {
        self.root = Some(root.into());
        self
    }

    pub fn with_lemma<S: Into<String>>(mut self, lemma: S) -> Self {
        self.lemma = Some(lemma.into());
        self
    }

    pub fn chapter(&self) -> u32 {
        self.id.chapter
    }

    pub fn verse(&self) -> u32 {
        self.id.verse
    }

    pub fn position(&self) -> usize {
        self.id.position
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.id, self.text)
    }
}

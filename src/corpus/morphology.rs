//! Pass-through of externally computed morphology.
//!
//! The corpus never infers roots or lemmas itself. A [`MorphologyAnalyzer`]
//! plugged into the [`CorpusBuilder`](crate::corpus::CorpusBuilder) is asked
//! once per word while the corpus is built, and whatever it returns is stored
//! verbatim on the [`Word`].
//!
//! [`LookupAnalyzer`] serves annotations prepared elsewhere, keyed by word
//! coordinate or by canonical form, and can be loaded from a JSON file:
//!
//! ```json
//! [
//!   { "chapter": 1, "verse": 1, "position": 0, "root": "smw", "lemma": "ism" },
//!   { "form": "الله", "root": "Alh", "lemma": "Allah" }
//! ]
//! ```

use std::fs;
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::corpus::word::{Word, WordId};
use crate::error::{QuranalyzeError, Result};

/// Root and lemma of one word. Either may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Morphology {
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub lemma: Option<String>,
}

impl Morphology {
    pub fn new(root: Option<String>, lemma: Option<String>) -> Self {
        Morphology { root, lemma }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none() && self.lemma.is_none()
    }
}

/// Source of root and lemma annotations.
pub trait MorphologyAnalyzer: Send + Sync {
    /// Annotate a word. `word` already carries its normalized and
    /// transliterated forms.
    fn analyze(&self, word: &Word) -> Morphology;

    /// Get the name of this analyzer.
    fn name(&self) -> &'static str;
}

/// One line of an annotation file.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct AnnotationEntry {
    chapter: Option<u32>,
    verse: Option<u32>,
    position: Option<usize>,
    form: Option<String>,
    root: Option<String>,
    lemma: Option<String>,
}

/// Analyzer answering from prepared annotations.
///
/// Annotations for a specific coordinate win over annotations for the
/// word's canonical form.
#[derive(Debug, Clone, Default)]
pub struct LookupAnalyzer {
    by_id: AHashMap<WordId, Morphology>,
    by_form: AHashMap<String, Morphology>,
}

impl LookupAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotate the word at `id`.
    pub fn with_word(mut self, id: WordId, morphology: Morphology) -> Self {
        self.by_id.insert(id, morphology);
        self
    }

    /// Annotate every word whose canonical form is `form`.
    pub fn with_form<S: Into<String>>(mut self, form: S, morphology: Morphology) -> Self {
        self.by_form.insert(form.into(), morphology);
        self
    }

    /// Load annotations from a JSON array.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let entries: Vec<AnnotationEntry> = serde_json::from_str(&content)?;

        let mut analyzer = LookupAnalyzer::new();
        for (i, entry) in entries.into_iter().enumerate() {
            let morphology = Morphology::new(entry.root, entry.lemma);
            match (entry.chapter, entry.verse, entry.position, entry.form) {
                (Some(chapter), Some(verse), Some(position), None) => {
                    analyzer
                        .by_id
                        .insert(WordId::new(chapter, verse, position), morphology);
                }
                (None, None, None, Some(form)) => {
                    analyzer.by_form.insert(form, morphology);
                }
                _ => {
                    return Err(QuranalyzeError::invalid_config(format!(
                        "annotation {i} in {} needs either chapter, verse and position or a form",
                        path.as_ref().display()
                    )));
                }
            }
        }

        log::debug!(
            "Loaded {} coordinate and {} form annotations from {}",
            analyzer.by_id.len(),
            analyzer.by_form.len(),
            path.as_ref().display()
        );

        Ok(analyzer)
    }

    pub fn len(&self) -> usize {
        self.by_id.len() + self.by_form.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MorphologyAnalyzer for LookupAnalyzer {
    fn analyze(&self, word: &Word) -> Morphology {
        self.by_id
            .get(&word.id)
            .or_else(|| self.by_form.get(&word.normalized))
            .cloned()
            .unwrap_or_default()
    }

    fn name(&self) -> &'static str {
        "lookup"
    }
}

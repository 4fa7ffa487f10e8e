//! JSON snapshots of corpus state and analysis results.
//!
//! Every snapshot carries the schema version [`FORMAT_VERSION`] and the UTC
//! time it was generated. Snapshots are plain serde values; use
//! [`write_json`] to store one.
//!
//! # Examples
//!
//! ```no_run
//! use quranalyze::corpus::CorpusBuilder;
//! use quranalyze::export::{SnapshotExporter, write_json};
//!
//! let corpus = CorpusBuilder::new("data/surah").build()?;
//! let exporter = SnapshotExporter::new(&corpus);
//!
//! write_json("out/snapshot.json", &exporter.corpus_snapshot(false))?;
//! write_json("out/surah_1.json", &exporter.chapter_summary(1)?)?;
//! # Ok::<(), quranalyze::error::QuranalyzeError>(())
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::corpus::{Corpus, Word, WordId};
use crate::error::Result;
use crate::filter::FilterChain;
use crate::graph::{Relation, WordGraph};

/// Schema version written into every snapshot.
pub const FORMAT_VERSION: &str = "1.0.0";

/// Version and timestamp shared by all snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotHeader {
    pub format_version: String,
    pub generated_at: DateTime<Utc>,
}

impl SnapshotHeader {
    pub fn now() -> Self {
        SnapshotHeader {
            format_version: FORMAT_VERSION.to_string(),
            generated_at: Utc::now(),
        }
    }
}

/// Flat word representation used in exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub chapter: u32,
    pub verse: u32,
    pub position: usize,
    pub text: String,
    pub normalized: String,
    pub transliteration: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lemma: Option<String>,
}

impl From<&Word> for WordRecord {
    fn from(word: &Word) -> Self {
        WordRecord {
            chapter: word.id.chapter,
            verse: word.id.verse,
            position: word.id.position,
            text: word.text.clone(),
            normalized: word.normalized.clone(),
            transliteration: word.transliteration.clone(),
            root: word.root.clone(),
            lemma: word.lemma.clone(),
        }
    }
}

fn records<'a, I>(words: I) -> Vec<WordRecord>
where
    I: IntoIterator<Item = &'a Arc<Word>>,
{
    words.into_iter().map(|w| WordRecord::from(w.as_ref())).collect()
}

/// Corpus totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusMetadata {
    #[serde(flatten)]
    pub header: SnapshotHeader,
    pub total_chapters: usize,
    pub total_verses: usize,
    pub total_words: usize,
}

/// Whole-corpus snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusSnapshot {
    pub metadata: CorpusMetadata,
    pub word_count_by_chapter: BTreeMap<u32, usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<WordRecord>>,
}

/// One chapter with its words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterSummary {
    #[serde(flatten)]
    pub header: SnapshotHeader,
    pub chapter: u32,
    pub name: String,
    pub english_name: Option<String>,
    pub revelation_type: Option<String>,
    pub verse_count: usize,
    pub word_count: usize,
    pub words: Vec<WordRecord>,
}

/// The result of a filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilteredWords {
    #[serde(flatten)]
    pub header: SnapshotHeader,
    pub description: Option<String>,
    pub word_count: usize,
    pub words: Vec<WordRecord>,
}

/// A relation graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphSnapshot {
    #[serde(flatten)]
    pub header: SnapshotHeader,
    pub node_count: usize,
    pub edge_count: usize,
    pub nodes: Vec<WordId>,
    pub edges: Vec<Relation>,
}

impl GraphSnapshot {
    pub fn new(graph: &WordGraph) -> Self {
        GraphSnapshot {
            header: SnapshotHeader::now(),
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            nodes: graph.nodes().to_vec(),
            edges: graph.edges().to_vec(),
        }
    }
}

/// Builds snapshots from a corpus.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotExporter<'a> {
    corpus: &'a Corpus,
}

impl<'a> SnapshotExporter<'a> {
    pub fn new(corpus: &'a Corpus) -> Self {
        SnapshotExporter { corpus }
    }

    pub fn metadata(&self) -> CorpusMetadata {
        CorpusMetadata {
            header: SnapshotHeader::now(),
            total_chapters: self.corpus.total_chapters(),
            total_verses: self.corpus.total_verses(),
            total_words: self.corpus.total_words(),
        }
    }

    /// Totals and per-chapter word counts, optionally with every word.
    pub fn corpus_snapshot(&self, include_all_words: bool) -> CorpusSnapshot {
        CorpusSnapshot {
            metadata: self.metadata(),
            word_count_by_chapter: self.corpus.word_count_by_chapter().clone(),
            words: include_all_words.then(|| records(self.corpus.words())),
        }
    }

    /// Summary of chapter `index`. Fails with `NotFound` for unknown chapters.
    pub fn chapter_summary(&self, index: u32) -> Result<ChapterSummary> {
        let chapter = self.corpus.get_chapter(index)?;
        Ok(ChapterSummary {
            header: SnapshotHeader::now(),
            chapter: chapter.index(),
            name: chapter.name().to_string(),
            english_name: chapter.english_name().map(str::to_string),
            revelation_type: chapter.revelation_type().map(str::to_string),
            verse_count: chapter.verse_count(),
            word_count: chapter.word_count(),
            words: records(chapter.words()),
        })
    }

    /// Export an arbitrary word list.
    pub fn filtered_words(&self, words: &[Arc<Word>], description: Option<&str>) -> FilteredWords {
        FilteredWords {
            header: SnapshotHeader::now(),
            description: description.map(str::to_string),
            word_count: words.len(),
            words: records(words),
        }
    }

    /// Evaluate `chain` and export its result, described by its predicates.
    pub fn filter_chain(&self, chain: &FilterChain<'_>) -> FilteredWords {
        let words = chain.get();
        self.filtered_words(&words, Some(&chain.describe()))
    }

    pub fn graph(&self, graph: &WordGraph) -> GraphSnapshot {
        GraphSnapshot::new(graph)
    }
}

/// Write `value` as pretty JSON to `path`, creating parent directories.
pub fn write_json<P, T>(path: P, value: &T) -> Result<()>
where
    P: AsRef<Path>,
    T: Serialize + ?Sized,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json)?;
    log::debug!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::RelationKind;
    use tempfile::TempDir;

    #[test]
    fn test_word_record_from_word() {
        let word = Word::new(WordId::new(1, 2, 3), "بِسْمِ", "بسم", "bisomi").with_lemma("ism");
        let record = WordRecord::from(&word);
        assert_eq!((record.chapter, record.verse, record.position), (1, 2, 3));
        assert_eq!(record.lemma.as_deref(), Some("ism"));

        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("root").is_none());
    }

    #[test]
    fn test_graph_snapshot_and_write() {
        let (a, b) = (WordId::new(1, 1, 0), WordId::new(1, 1, 1));
        let graph = WordGraph::from_relations(
            [a, b],
            [Relation::new(a, b, RelationKind::SharedRoot, "ktb")],
        );
        let snapshot = GraphSnapshot::new(&graph);
        assert_eq!(snapshot.header.format_version, FORMAT_VERSION);

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/graph.json");
        write_json(&path, &snapshot).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["format_version"], "1.0.0");
        assert!(value["generated_at"].is_string());
        assert_eq!(value["edges"][0]["kind"], "shared-root");

        let back: GraphSnapshot = serde_json::from_str(&content).unwrap();
        assert_eq!(back, snapshot);
    }
}

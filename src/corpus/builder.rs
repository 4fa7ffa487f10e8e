//! One-shot corpus construction.
//!
//! [`CorpusBuilder::build`] consumes the builder, so a second build from the
//! same instance does not compile. Building again means creating a new
//! builder and getting a new, independent [`Corpus`].
//!
//! ```no_run
//! use quranalyze::corpus::CorpusBuilder;
//!
//! let corpus = CorpusBuilder::new("data/surah").build()?;
//! println!("{} words", corpus.total_words());
//! # Ok::<(), quranalyze::error::QuranalyzeError>(())
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::analysis::analyzer::PipelineAnalyzer;
use crate::analysis::normalizer::Normalizer;
use crate::config::CorpusConfig;
use crate::corpus::Corpus;
use crate::corpus::chapter::{Chapter, Verse};
use crate::corpus::morphology::MorphologyAnalyzer;
use crate::corpus::word::{Word, WordId};
use crate::dataset::{ChapterRecord, DatasetLoader, VerseRecord};
use crate::error::Result;
use crate::transliteration::Transliterator;

/// Builder for [`Corpus`].
pub struct CorpusBuilder {
    root: PathBuf,
    config: CorpusConfig,
    morphology: Option<Arc<dyn MorphologyAnalyzer>>,
}

impl CorpusBuilder {
    /// Start a builder for the dataset directory `root` with the default
    /// configuration.
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        CorpusBuilder {
            root: root.as_ref().to_path_buf(),
            config: CorpusConfig::default(),
            morphology: None,
        }
    }

    pub fn with_config(mut self, config: CorpusConfig) -> Self {
        self.config = config;
        self
    }

    /// Populate root and lemma from an external analyzer.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn MorphologyAnalyzer>) -> Self {
        self.morphology = Some(analyzer);
        self
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// Load, validate and process the whole dataset.
    ///
    /// Any dataset problem aborts the build; no partial corpus is returned.
    pub fn build(self) -> Result<Corpus> {
        let factory = WordFactory::new(&self.config, self.morphology.clone())?;
        let loader = DatasetLoader::new(&self.root, self.config.dataset.clone())?;

        let chapters: Vec<Chapter> = loader
            .load_all()?
            .into_iter()
            .map(|record| factory.chapter(record))
            .collect();

        let corpus = Corpus::new(chapters, factory.normalizer, factory.transliterator);
        log::info!(
            "Built corpus: {} chapters, {} verses, {} words",
            corpus.total_chapters(),
            corpus.total_verses(),
            corpus.total_words()
        );

        Ok(corpus)
    }

    /// Load and process a single chapter without building a corpus.
    pub fn load_chapter(&self, index: u32) -> Result<Chapter> {
        let factory = WordFactory::new(&self.config, self.morphology.clone())?;
        let loader = DatasetLoader::new(&self.root, self.config.dataset.clone())?;

        Ok(factory.chapter(loader.load_chapter(index)?))
    }
}

impl fmt::Debug for CorpusBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CorpusBuilder")
            .field("root", &self.root)
            .field("config", &self.config)
            .field("morphology", &self.morphology.as_ref().map(|m| m.name()))
            .finish()
    }
}

/// Turns validated records into chapters, verses and words.
struct WordFactory {
    analyzer: PipelineAnalyzer,
    normalizer: Normalizer,
    transliterator: Transliterator,
    morphology: Option<Arc<dyn MorphologyAnalyzer>>,
}

impl WordFactory {
    fn new(
        config: &CorpusConfig,
        morphology: Option<Arc<dyn MorphologyAnalyzer>>,
    ) -> Result<Self> {
        Ok(WordFactory {
            analyzer: PipelineAnalyzer::from_config(&config.tokenizer),
            normalizer: Normalizer::new(config.normalization.clone())?,
            transliterator: Transliterator::new(config.transliteration.clone())?,
            morphology,
        })
    }

    fn chapter(&self, record: ChapterRecord) -> Chapter {
        let index = record.index;
        let verses = record
            .verses
            .into_iter()
            .map(|verse| self.verse(index, verse))
            .collect();

        Chapter::new(
            index,
            record.name,
            record.english_name,
            record.revelation_type,
            verses,
        )
    }

    fn verse(&self, chapter: u32, record: VerseRecord) -> Verse {
        let words = self
            .analyzer
            .analyze(&record.text)
            .map(|token| {
                let id = WordId::new(chapter, record.index, token.position);
                Arc::new(self.word(id, token.text))
            })
            .collect();

        Verse::new(chapter, record.index, record.text, words)
    }

    fn word(&self, id: WordId, text: String) -> Word {
        let normalized = self.normalizer.normalize(&text);
        let transliteration = self.transliterator.encode(&text);
        let mut word = Word::new(id, text, normalized, transliteration);

        if let Some(analyzer) = &self.morphology {
            let morphology = analyzer.analyze(&word);
            word.root = morphology.root;
            word.lemma = morphology.lemma;
        }

        word
    }
}

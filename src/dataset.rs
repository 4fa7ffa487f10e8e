//! Loading and validation of the on-disk chapter dataset.
//!
//! A dataset is a local directory holding one JSON file per chapter, named
//! `{file_prefix}{index}.json` (`surah_1.json`, `surah_2.json`, ...). Each
//! file holds a single chapter record:
//!
//! ```json
//! {
//!   "index": 1,
//!   "name": "الفاتحة",
//!   "count": 7,
//!   "english_name": "The Opening",
//!   "revelation_type": "Meccan",
//!   "verses": [ { "index": 1, "text": "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ" } ]
//! }
//! ```
//!
//! Validation is strict and fail-fast. Any deviation from the schema is a
//! [`MalformedDataset`](crate::error::QuranalyzeError::MalformedDataset) error
//! naming where it happened; no partial result is ever returned.

pub mod loader;
pub mod record;

use serde::{Deserialize, Serialize};

pub use loader::{DatasetLoader, DatasetReport, InvalidChapter};
pub use record::{ChapterRecord, VerseRecord};

/// File name prefix of the canonical dataset.
pub const DEFAULT_FILE_PREFIX: &str = "surah_";

/// Number of chapters in the complete text.
pub const CHAPTER_COUNT: u32 = 114;

/// Dataset layout settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// File name prefix before the chapter index.
    pub file_prefix: String,

    /// Exact number of chapters the dataset must contain, if known.
    pub expected_chapters: Option<u32>,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        DatasetConfig {
            file_prefix: DEFAULT_FILE_PREFIX.to_string(),
            expected_chapters: None,
        }
    }
}

impl DatasetConfig {
    /// Configuration for the complete text, requiring all chapters.
    pub fn complete() -> Self {
        DatasetConfig {
            expected_chapters: Some(CHAPTER_COUNT),
            ..Default::default()
        }
    }

    /// File name of chapter `index`.
    pub fn file_name(&self, index: u32) -> String {
        format!("{}{index}.json", self.file_prefix)
    }
}

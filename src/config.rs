//! Configuration for building a corpus.
//!
//! Every table that shapes word construction is an explicit value here, so
//! tests and callers can substitute their own. All sections default, and a
//! configuration file only needs the sections it changes:
//!
//! ```json
//! {
//!   "dataset": { "expected_chapters": 114 },
//!   "tokenizer": { "strip_boundary": true }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::normalizer::NormalizationTable;
use crate::analysis::tokenizer::TokenizerConfig;
use crate::dataset::DatasetConfig;
use crate::error::{QuranalyzeError, Result};
use crate::transliteration::TransliterationTable;

/// Configuration for [`CorpusBuilder`](crate::corpus::CorpusBuilder).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorpusConfig {
    pub dataset: DatasetConfig,
    pub normalization: NormalizationTable,
    pub transliteration: TransliterationTable,
    pub tokenizer: TokenizerConfig,
}

impl CorpusConfig {
    /// Load a configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            QuranalyzeError::invalid_config(format!("{}: {e}", path.display()))
        })
    }

    /// Write this configuration as pretty JSON.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

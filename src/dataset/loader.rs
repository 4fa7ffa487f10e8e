//! Dataset directory discovery and chapter loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::dataset::DatasetConfig;
use crate::dataset::record::ChapterRecord;
use crate::error::{Location, QuranalyzeError, Result};

/// A chapter file that exists but failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidChapter {
    pub chapter: u32,
    pub error: String,
}

/// Outcome of [`DatasetLoader::verify`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DatasetReport {
    /// Chapters that loaded and validated.
    pub chapters_found: usize,
    /// Chapter indices with no file.
    pub missing: Vec<u32>,
    /// Chapters whose file failed validation.
    pub invalid: Vec<InvalidChapter>,
    /// Verses across all valid chapters.
    pub total_verses: usize,
}

impl DatasetReport {
    /// Whether a full load of the dataset would succeed.
    pub fn is_valid(&self) -> bool {
        self.chapters_found > 0 && self.missing.is_empty() && self.invalid.is_empty()
    }
}

/// Reads chapter records from a dataset directory.
#[derive(Debug, Clone)]
pub struct DatasetLoader {
    root: PathBuf,
    config: DatasetConfig,
    file_pattern: Regex,
}

impl DatasetLoader {
    /// Create a loader for the dataset at `root`.
    ///
    /// The directory is not touched until a load or verify call.
    pub fn new<P: AsRef<Path>>(root: P, config: DatasetConfig) -> Result<Self> {
        let pattern = format!(r"^{}([1-9][0-9]{{0,8}})\.json$", regex::escape(&config.file_prefix));
        let file_pattern = Regex::new(&pattern).map_err(|e| {
            QuranalyzeError::invalid_config(format!(
                "file prefix {:?}: {e}",
                config.file_prefix
            ))
        })?;

        Ok(DatasetLoader {
            root: root.as_ref().to_path_buf(),
            config,
            file_pattern,
        })
    }

    /// Dataset directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &DatasetConfig {
        &self.config
    }

    /// Load and validate every chapter, in index order.
    pub fn load_all(&self) -> Result<Vec<ChapterRecord>> {
        let files = self.discover()?;
        self.check_layout(&files)?;

        let records = files
            .iter()
            .map(|(&index, path)| self.read_record(index, path))
            .collect::<Result<Vec<_>>>()?;

        log::info!(
            "Loaded {} chapters ({} verses) from {}",
            records.len(),
            records.iter().map(|r| r.verses.len()).sum::<usize>(),
            self.root.display()
        );

        Ok(records)
    }

    /// Load and validate one chapter.
    ///
    /// Fails with `NotFound` when the dataset has no file for `index`.
    pub fn load_chapter(&self, index: u32) -> Result<ChapterRecord> {
        self.check_root()?;

        if let Some(expected) = self.config.expected_chapters
            && (index == 0 || index > expected)
        {
            return Err(QuranalyzeError::not_found(format!(
                "chapter {index} (dataset has {expected} chapters)"
            )));
        }

        let path = self.root.join(self.config.file_name(index));
        if index == 0 || !path.is_file() {
            return Err(QuranalyzeError::not_found(format!("chapter {index}")));
        }

        self.read_record(index, &path)
    }

    /// Check every chapter without stopping at the first failure.
    ///
    /// Only an unreadable dataset directory is an error; problems with
    /// individual chapters are collected in the report.
    pub fn verify(&self) -> Result<DatasetReport> {
        let files = self.discover()?;
        let last = self
            .config
            .expected_chapters
            .or_else(|| files.keys().next_back().copied())
            .unwrap_or(0);

        let mut report = DatasetReport::default();
        for index in 1..=last {
            let Some(path) = files.get(&index) else {
                report.missing.push(index);
                continue;
            };
            match self.read_record(index, path) {
                Ok(record) => {
                    report.chapters_found += 1;
                    report.total_verses += record.verses.len();
                }
                Err(e) => report.invalid.push(InvalidChapter {
                    chapter: index,
                    error: e.to_string(),
                }),
            }
        }

        for (&index, _) in files.range(last.saturating_add(1)..) {
            report.invalid.push(InvalidChapter {
                chapter: index,
                error: format!("chapter {index} is beyond the expected {last} chapters"),
            });
        }

        log::debug!(
            "Verified {}: {} valid, {} missing, {} invalid",
            self.root.display(),
            report.chapters_found,
            report.missing.len(),
            report.invalid.len()
        );

        Ok(report)
    }

    fn check_root(&self) -> Result<()> {
        if !self.root.is_dir() {
            let constraint = if self.root.exists() {
                "dataset path is not a directory"
            } else {
                "dataset directory does not exist"
            };
            return Err(QuranalyzeError::malformed(
                Location::Dataset(self.root.clone()),
                constraint,
            ));
        }
        Ok(())
    }

    /// Map chapter index to file for every chapter file in the directory.
    fn discover(&self) -> Result<BTreeMap<u32, PathBuf>> {
        self.check_root()?;

        let entries =
            fs::read_dir(&self.root).map_err(|e| QuranalyzeError::dataset_io(&self.root, e))?;

        let mut files = BTreeMap::new();
        for entry in entries {
            let entry = entry.map_err(|e| QuranalyzeError::dataset_io(&self.root, e))?;
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            let Some(index) = self
                .file_pattern
                .captures(name)
                .and_then(|caps| caps[1].parse::<u32>().ok())
            else {
                continue;
            };
            files.insert(index, entry.path());
        }

        Ok(files)
    }

    fn check_layout(&self, files: &BTreeMap<u32, PathBuf>) -> Result<()> {
        let dataset = || Location::Dataset(self.root.clone());

        if files.is_empty() {
            return Err(QuranalyzeError::malformed(
                dataset(),
                format!("no chapter files named {}N.json", self.config.file_prefix),
            ));
        }

        if let Some(missing) = (1u32..).zip(files.keys()).find(|(want, got)| want != *got) {
            return Err(QuranalyzeError::malformed(
                dataset(),
                format!(
                    "chapter indices are not contiguous: {} is missing",
                    self.config.file_name(missing.0)
                ),
            ));
        }

        if let Some(expected) = self.config.expected_chapters
            && files.len() != expected as usize
        {
            return Err(QuranalyzeError::malformed(
                dataset(),
                format!("expected {expected} chapters, found {}", files.len()),
            ));
        }

        Ok(())
    }

    fn read_record(&self, index: u32, path: &Path) -> Result<ChapterRecord> {
        log::debug!("Loading chapter {index} from {}", path.display());

        let content =
            fs::read_to_string(path).map_err(|e| QuranalyzeError::dataset_io(path, e))?;
        let value: Value = serde_json::from_str(&content).map_err(|e| {
            QuranalyzeError::malformed(
                Location::File(path.to_path_buf()),
                format!("invalid JSON: {e}"),
            )
        })?;

        ChapterRecord::from_value(&value, index, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_chapter(dir: &Path, index: u32, verses: &[&str]) {
        let verses: Vec<Value> = verses
            .iter()
            .enumerate()
            .map(|(i, text)| serde_json::json!({"index": i + 1, "text": text}))
            .collect();
        let record = serde_json::json!({
            "index": index,
            "name": format!("chapter {index}"),
            "count": verses.len(),
            "verses": verses,
        });
        fs::write(
            dir.join(format!("surah_{index}.json")),
            serde_json::to_string(&record).unwrap(),
        )
        .unwrap();
    }

    fn loader(dir: &TempDir) -> DatasetLoader {
        DatasetLoader::new(dir.path(), DatasetConfig::default()).unwrap()
    }

    #[test]
    fn test_load_all_in_order() {
        let dir = TempDir::new().unwrap();
        write_chapter(dir.path(), 2, &["c d"]);
        write_chapter(dir.path(), 1, &["a", "b"]);
        fs::write(dir.path().join("README.md"), "not a chapter").unwrap();

        let records = loader(&dir).load_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].index, 1);
        assert_eq!(records[1].verses[0].text, "c d");
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let loader =
            DatasetLoader::new(dir.path().join("absent"), DatasetConfig::default()).unwrap();
        let err = loader.load_all().unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(loader(&dir).load_all().unwrap_err().is_malformed());
    }

    #[test]
    fn test_gap_in_chapters() {
        let dir = TempDir::new().unwrap();
        write_chapter(dir.path(), 1, &["a"]);
        write_chapter(dir.path(), 3, &["b"]);

        let err = loader(&dir).load_all().unwrap_err();
        assert!(err.to_string().contains("surah_2.json is missing"));
    }

    #[test]
    fn test_expected_chapter_count() {
        let dir = TempDir::new().unwrap();
        write_chapter(dir.path(), 1, &["a"]);

        let config = DatasetConfig {
            expected_chapters: Some(2),
            ..Default::default()
        };
        let loader = DatasetLoader::new(dir.path(), config).unwrap();
        let err = loader.load_all().unwrap_err();
        assert!(err.to_string().contains("expected 2 chapters, found 1"));
    }

    #[test]
    fn test_invalid_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("surah_1.json"), "{ not json").unwrap();

        let err = loader(&dir).load_all().unwrap_err();
        assert!(err.to_string().contains("invalid JSON"));
    }

    #[test]
    fn test_load_chapter() {
        let dir = TempDir::new().unwrap();
        write_chapter(dir.path(), 1, &["a"]);

        let loader = loader(&dir);
        assert_eq!(loader.load_chapter(1).unwrap().verses.len(), 1);
        assert!(loader.load_chapter(2).unwrap_err().is_not_found());
        assert!(loader.load_chapter(0).unwrap_err().is_not_found());
    }

    #[test]
    fn test_custom_prefix() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("ch.1.json"),
            r#"{"index": 1, "name": "x", "verses": [{"index": 1, "text": "a"}]}"#,
        )
        .unwrap();

        let config = DatasetConfig {
            file_prefix: "ch.".to_string(),
            ..Default::default()
        };
        let records = DatasetLoader::new(dir.path(), config)
            .unwrap()
            .load_all()
            .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_verify_collects_problems() {
        let dir = TempDir::new().unwrap();
        write_chapter(dir.path(), 1, &["a", "b"]);
        fs::write(dir.path().join("surah_2.json"), "[]").unwrap();
        write_chapter(dir.path(), 4, &["c"]);

        let report = loader(&dir).verify().unwrap();
        assert_eq!(report.chapters_found, 2);
        assert_eq!(report.total_verses, 3);
        assert_eq!(report.missing, vec![3]);
        assert_eq!(report.invalid.len(), 1);
        assert_eq!(report.invalid[0].chapter, 2);
        assert!(!report.is_valid());
    }

    #[test]
    fn test_verify_beyond_expected() {
        let dir = TempDir::new().unwrap();
        write_chapter(dir.path(), 1, &["a"]);
        write_chapter(dir.path(), 2, &["b"]);

        let config = DatasetConfig {
            expected_chapters: Some(1),
            ..Default::default()
        };
        let report = DatasetLoader::new(dir.path(), config)
            .unwrap()
            .verify()
            .unwrap();
        assert_eq!(report.chapters_found, 1);
        assert_eq!(report.invalid[0].chapter, 2);
    }
}

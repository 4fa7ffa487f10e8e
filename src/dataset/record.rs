//! Chapter and verse records and their schema validation.

use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{Location, QuranalyzeError, Result};

/// Keys a chapter record may carry. The camelCase spellings are accepted as
/// aliases of the snake_case ones.
const CHAPTER_KEYS: [&str; 8] = [
    "index",
    "name",
    "count",
    "english_name",
    "englishName",
    "revelation_type",
    "revelationType",
    "verses",
];

const VERSE_KEYS: [&str; 2] = ["index", "text"];

/// A validated verse record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerseRecord {
    pub index: u32,
    pub text: String,
}

/// A validated chapter record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterRecord {
    pub index: u32,
    pub name: String,
    /// Declared verse count; always equal to `verses.len()` once validated.
    pub count: usize,
    pub english_name: Option<String>,
    pub revelation_type: Option<String>,
    pub verses: Vec<VerseRecord>,
}

impl ChapterRecord {
    /// Validate a parsed chapter file and extract its record.
    ///
    /// `file_index` is the chapter index taken from the file name and `path`
    /// is only used for error locations.
    pub fn from_value(value: &Value, file_index: u32, path: &Path) -> Result<Self> {
        let file = || Location::File(path.to_path_buf());

        let Value::Object(map) = value else {
            return Err(QuranalyzeError::malformed(
                file(),
                format!("top level must be an object, found {}", kind(value)),
            ));
        };

        check_keys(map, &CHAPTER_KEYS, file)?;

        let index = positive_index(required(map, "index", file)?, "index", file)?;
        let name = match required(map, "name", file)? {
            Value::String(s) if !s.trim().is_empty() => s.clone(),
            other => {
                return Err(QuranalyzeError::malformed(
                    file(),
                    format!("`name` must be a non-empty string, found {}", kind(other)),
                ));
            }
        };
        let declared = match map.get("count") {
            None | Some(Value::Null) => None,
            Some(v) => Some(
                v.as_u64()
                    .and_then(|n| usize::try_from(n).ok())
                    .ok_or_else(|| {
                        QuranalyzeError::malformed(
                            file(),
                            format!("`count` must be a non-negative integer, found {v}"),
                        )
                    })?,
            ),
        };
        let english_name = optional_string(map, "english_name", "englishName", file)?;
        let revelation_type = optional_string(map, "revelation_type", "revelationType", file)?;
        let entries = match required(map, "verses", file)? {
            Value::Array(entries) if !entries.is_empty() => entries,
            Value::Array(_) => {
                return Err(QuranalyzeError::malformed(
                    file(),
                    "`verses` must contain at least one verse",
                ));
            }
            other => {
                return Err(QuranalyzeError::malformed(
                    file(),
                    format!("`verses` must be an array, found {}", kind(other)),
                ));
            }
        };

        if index != file_index {
            return Err(QuranalyzeError::malformed(
                file(),
                format!("record index {index} does not match file index {file_index}"),
            ));
        }

        let verses = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| VerseRecord::from_value(entry, index, i + 1))
            .collect::<Result<Vec<_>>>()?;

        let count = declared.unwrap_or(verses.len());
        if count != verses.len() {
            return Err(QuranalyzeError::malformed(
                Location::Chapter { chapter: index },
                format!(
                    "declared verse count {count} does not match actual count {}",
                    verses.len()
                ),
            ));
        }

        Ok(ChapterRecord {
            index,
            name,
            count,
            english_name,
            revelation_type,
            verses,
        })
    }

    /// Total number of characters of verse text.
    pub fn text_len(&self) -> usize {
        self.verses.iter().map(|v| v.text.chars().count()).sum()
    }
}

impl VerseRecord {
    /// Validate the `entry`-th (1-based) verse of chapter `chapter`.
    fn from_value(value: &Value, chapter: u32, entry: usize) -> Result<Self> {
        let here = || Location::Verse { chapter, entry };

        let Value::Object(map) = value else {
            return Err(QuranalyzeError::malformed(
                here(),
                format!("verse must be an object, found {}", kind(value)),
            ));
        };

        check_keys(map, &VERSE_KEYS, here)?;

        let index = positive_index(required(map, "index", here)?, "index", here)?;
        let text = match required(map, "text", here)? {
            Value::String(s) => s.clone(),
            other => {
                return Err(QuranalyzeError::malformed(
                    here(),
                    format!("`text` must be a string, found {}", kind(other)),
                ));
            }
        };

        if index as usize != entry {
            return Err(QuranalyzeError::malformed(
                here(),
                format!("verse index {index} is not contiguous (expected {entry})"),
            ));
        }

        Ok(VerseRecord { index, text })
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn check_keys<F>(map: &Map<String, Value>, allowed: &[&str], location: F) -> Result<()>
where
    F: Fn() -> Location,
{
    match map.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(key) => Err(QuranalyzeError::malformed(
            location(),
            format!("unexpected key `{key}`"),
        )),
        None => Ok(()),
    }
}

fn required<'a, F>(map: &'a Map<String, Value>, key: &str, location: F) -> Result<&'a Value>
where
    F: Fn() -> Location,
{
    map.get(key).ok_or_else(|| {
        QuranalyzeError::malformed(location(), format!("missing required key `{key}`"))
    })
}

fn positive_index<F>(value: &Value, key: &str, location: F) -> Result<u32>
where
    F: Fn() -> Location,
{
    value
        .as_u64()
        .filter(|&n| n > 0)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            QuranalyzeError::malformed(
                location(),
                format!("`{key}` must be a positive integer, found {value}"),
            )
        })
}

fn optional_string<F>(
    map: &Map<String, Value>,
    key: &str,
    alias: &str,
    location: F,
) -> Result<Option<String>>
where
    F: Fn() -> Location,
{
    if map.contains_key(key) && map.contains_key(alias) {
        return Err(QuranalyzeError::malformed(
            location(),
            format!("both `{key}` and `{alias}` are present"),
        ));
    }
    match map.get(key).or_else(|| map.get(alias)) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(QuranalyzeError::malformed(
            location(),
            format!("`{key}` must be a string, found {}", kind(other)),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: Value) -> Result<ChapterRecord> {
        ChapterRecord::from_value(&value, 1, Path::new("surah_1.json"))
    }

    fn constraint(err: QuranalyzeError) -> (Location, String) {
        match err {
            QuranalyzeError::MalformedDataset {
                location,
                constraint,
            } => (location, constraint),
            other => panic!("expected MalformedDataset, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_record() {
        let record = parse(json!({
            "index": 1,
            "name": "الفاتحة",
            "count": 2,
            "englishName": "The Opening",
            "verses": [
                {"index": 1, "text": "بِسْمِ ٱللَّهِ"},
                {"index": 2, "text": ""}
            ]
        }))
        .unwrap();

        assert_eq!(record.index, 1);
        assert_eq!(record.count, 2);
        assert_eq!(record.english_name.as_deref(), Some("The Opening"));
        assert_eq!(record.revelation_type, None);
        assert_eq!(record.verses[1].text, "");
    }

    #[test]
    fn test_count_defaults_to_actual() {
        let record = parse(json!({
            "index": 1, "name": "x", "verses": [{"index": 1, "text": "a"}]
        }))
        .unwrap();
        assert_eq!(record.count, 1);
    }

    #[test]
    fn test_count_mismatch() {
        let err = parse(json!({
            "index": 1, "name": "x", "count": 3,
            "verses": [{"index": 1, "text": "a"}, {"index": 2, "text": "b"}]
        }))
        .unwrap_err();
        let (location, message) = constraint(err);
        assert_eq!(location, Location::Chapter { chapter: 1 });
        assert!(message.contains("declared verse count 3"));
    }

    #[test]
    fn test_non_contiguous_verses() {
        let err = parse(json!({
            "index": 1, "name": "x",
            "verses": [{"index": 1, "text": "a"}, {"index": 3, "text": "b"}]
        }))
        .unwrap_err();
        let (location, message) = constraint(err);
        assert_eq!(
            location,
            Location::Verse {
                chapter: 1,
                entry: 2
            }
        );
        assert!(message.contains("not contiguous"));
    }

    #[test]
    fn test_schema_violations() {
        let cases = vec![
            json!([1, 2, 3]),
            json!({"name": "x", "verses": [{"index": 1, "text": "a"}]}),
            json!({"index": 0, "name": "x", "verses": [{"index": 1, "text": "a"}]}),
            json!({"index": "1", "name": "x", "verses": [{"index": 1, "text": "a"}]}),
            json!({"index": 1, "name": "", "verses": [{"index": 1, "text": "a"}]}),
            json!({"index": 1, "name": "x", "verses": []}),
            json!({"index": 1, "name": "x", "verses": {}}),
            json!({"index": 1, "name": "x", "verses": [{"index": 1}]}),
            json!({"index": 1, "name": "x", "verses": [{"index": 1, "text": 7}]}),
            json!({"index": 1, "name": "x", "verses": ["a"]}),
            json!({"index": 1, "name": "x", "extra": true, "verses": [{"index": 1, "text": "a"}]}),
            json!({"index": 1, "name": "x", "verses": [{"index": 1, "text": "a", "id": 9}]}),
            json!({"index": 1, "name": "x", "count": -1, "verses": [{"index": 1, "text": "a"}]}),
            json!({"index": 1, "name": "x", "english_name": 5, "verses": [{"index": 1, "text": "a"}]}),
            json!({
                "index": 1, "name": "x", "english_name": "a", "englishName": "b",
                "verses": [{"index": 1, "text": "a"}]
            }),
        ];

        for case in cases {
            let err = parse(case.clone()).unwrap_err();
            assert!(err.is_malformed(), "accepted {case}");
        }
    }

    #[test]
    fn test_index_mismatch_with_file() {
        let value = json!({"index": 2, "name": "x", "verses": [{"index": 1, "text": "a"}]});
        let err = ChapterRecord::from_value(&value, 1, Path::new("surah_1.json")).unwrap_err();
        let (location, message) = constraint(err);
        assert_eq!(location, Location::File("surah_1.json".into()));
        assert!(message.contains("does not match file index 1"));
    }
}

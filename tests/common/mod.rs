#![allow(dead_code)]

use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use tempfile::TempDir;

/// Verses of the sample dataset, by chapter.
pub const CHAPTERS: [(&str, &str, &str, &[&str]); 3] = [
    (
        "الفاتحة",
        "Al-Faatiha",
        "Meccan",
        &[
            "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ",
            "ٱلْحَمْدُ لِلَّهِ رَبِّ ٱلْعَٰلَمِينَ",
        ],
    ),
    (
        "البقرة",
        "Al-Baqara",
        "Medinan",
        &["الٓمٓ", "ذَٰلِكَ ٱلْكِتَٰبُ لَا رَيْبَ فِيهِ"],
    ),
    (
        "آل عمران",
        "Aal-i-Imraan",
        "Medinan",
        &["ٱللَّهُ لَآ إِلَٰهَ إِلَّا هُوَ"],
    ),
];

/// A chapter record with contiguous verse indices and a matching count.
pub fn chapter_json(index: u32, name: &str, verses: &[&str]) -> Value {
    let verses: Vec<Value> = verses
        .iter()
        .enumerate()
        .map(|(i, text)| json!({ "index": i + 1, "text": text }))
        .collect();

    json!({
        "index": index,
        "name": name,
        "count": verses.len(),
        "verses": verses,
    })
}

pub fn write_chapter(dir: &Path, file_name: &str, record: &Value) {
    fs::write(dir.join(file_name), serde_json::to_string_pretty(record).unwrap()).unwrap();
}

/// Write the three sample chapters into `dir`.
pub fn write_sample(dir: &Path) {
    for (i, (name, english, revelation, verses)) in CHAPTERS.iter().enumerate() {
        let index = i as u32 + 1;
        let mut record = chapter_json(index, name, verses);
        record["english_name"] = json!(english);
        record["revelation_type"] = json!(revelation);
        write_chapter(dir, &format!("surah_{index}.json"), &record);
    }
}

/// A temporary directory holding the sample dataset.
pub fn sample_dataset() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_sample(dir.path());
    dir
}

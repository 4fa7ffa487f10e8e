//! Bidirectional transliteration between Arabic script and ASCII.
//!
//! A [`TransliterationTable`] is an explicit finite bijection from single
//! Arabic code points to non-empty ASCII symbols. The default table is the
//! [Buckwalter](buckwalter) scheme extended with alef wasla.
//!
//! Encoding is total and passes graphemes outside the table through
//! unchanged; [`Transliterator::encode_with_report`] lists them so callers
//! can tell. Decoding is strict: it scans for the longest table symbol at
//! each position and fails with
//! [`UnmappableToken`](crate::error::QuranalyzeError::UnmappableToken) on
//! anything else. Characters listed as `preserved` (ASCII space by default)
//! are copied unchanged in both directions, so whole verses round-trip.
//!
//! # Examples
//!
//! ```
//! use quranalyze::transliteration::{TransliterationTable, Transliterator};
//!
//! let transliterator = Transliterator::new(TransliterationTable::default()).unwrap();
//! let encoded = transliterator.encode("بِسْمِ ٱللَّهِ");
//! assert_eq!(encoded, "bisomi {ll~ahi");
//! assert_eq!(transliterator.decode(&encoded).unwrap(), "بِسْمِ ٱللَّهِ");
//! ```

pub mod buckwalter;

use aho_corasick::{AhoCorasick, MatchKind};
use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::error::{QuranalyzeError, Result};

/// Mapping between graphemes and ASCII symbols.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransliterationTable {
    /// Grapheme to symbol pairs.
    pub mappings: Vec<(char, String)>,

    /// Characters copied unchanged by both encode and decode.
    pub preserved: Vec<char>,
}

impl Default for TransliterationTable {
    fn default() -> Self {
        Self::buckwalter()
    }
}

impl TransliterationTable {
    /// Buckwalter plus alef wasla, preserving ASCII space.
    pub fn buckwalter() -> Self {
        let mappings = buckwalter::BUCKWALTER
            .iter()
            .chain(std::iter::once(&buckwalter::ALEF_WASLA))
            .map(|&(grapheme, symbol)| (grapheme, symbol.to_string()))
            .collect();

        TransliterationTable {
            mappings,
            preserved: vec![' '],
        }
    }

    fn validate(&self) -> Result<()> {
        let mut graphemes = AHashSet::with_capacity(self.mappings.len());
        let mut symbols: AHashSet<&str> = AHashSet::with_capacity(self.mappings.len());

        for (grapheme, symbol) in &self.mappings {
            if symbol.is_empty() {
                return Err(QuranalyzeError::invalid_config(format!(
                    "transliteration symbol for U+{:04X} is empty",
                    *grapheme as u32
                )));
            }
            if !symbol.bytes().all(|b| b.is_ascii_graphic()) {
                return Err(QuranalyzeError::invalid_config(format!(
                    "transliteration symbol {symbol:?} is not printable ASCII"
                )));
            }
            if !graphemes.insert(*grapheme) {
                return Err(QuranalyzeError::invalid_config(format!(
                    "grapheme U+{:04X} is mapped more than once",
                    *grapheme as u32
                )));
            }
            if !symbols.insert(symbol.as_str()) {
                return Err(QuranalyzeError::invalid_config(format!(
                    "transliteration symbol {symbol:?} is used more than once"
                )));
            }
        }

        // Distinct symbols are not enough once they get longer than one
        // character: the set must also be a prefix code.
        for a in &symbols {
            if let Some(b) = symbols.iter().find(|b| *b != a && b.starts_with(a)) {
                return Err(QuranalyzeError::invalid_config(format!(
                    "transliteration symbol {a:?} is a prefix of {b:?}"
                )));
            }
        }

        for &c in &self.preserved {
            if graphemes.contains(&c) {
                return Err(QuranalyzeError::invalid_config(format!(
                    "preserved character {c:?} is also a mapped grapheme"
                )));
            }
            if symbols.iter().any(|s| s.contains(c)) {
                return Err(QuranalyzeError::invalid_config(format!(
                    "preserved character {c:?} appears in a transliteration symbol"
                )));
            }
        }

        Ok(())
    }
}

/// A grapheme that encoding copied through because the table has no symbol for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Unmapped {
    pub grapheme: char,
    /// Byte offset in the encoded input.
    pub offset: usize,
}

/// Result of [`Transliterator::encode_with_report`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodeReport {
    pub text: String,
    pub unmapped: Vec<Unmapped>,
}

impl EncodeReport {
    /// Whether every grapheme of the input was in the table.
    pub fn is_complete(&self) -> bool {
        self.unmapped.is_empty()
    }
}

/// Encoder and decoder compiled from a [`TransliterationTable`].
#[derive(Debug, Clone)]
pub struct Transliterator {
    table: TransliterationTable,
    encode_map: AHashMap<char, Box<str>>,
    decoder: AhoCorasick,
    /// Grapheme for each decoder pattern, indexed by pattern id.
    decode_targets: Vec<char>,
    preserved: AHashSet<char>,
}

impl Transliterator {
    /// Validate `table` and compile it.
    pub fn new(table: TransliterationTable) -> Result<Self> {
        table.validate()?;

        let encode_map = table
            .mappings
            .iter()
            .map(|(grapheme, symbol)| (*grapheme, symbol.clone().into_boxed_str()))
            .collect();
        let patterns: Vec<&str> = table.mappings.iter().map(|(_, s)| s.as_str()).collect();
        let decode_targets = table.mappings.iter().map(|(g, _)| *g).collect();

        let decoder = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(&patterns)
            .map_err(|e| {
                QuranalyzeError::invalid_config(format!("transliteration decoder: {e}"))
            })?;

        log::debug!(
            "Compiled transliteration table: {} mappings, {} preserved characters",
            table.mappings.len(),
            table.preserved.len()
        );

        Ok(Transliterator {
            preserved: table.preserved.iter().copied().collect(),
            table,
            encode_map,
            decoder,
            decode_targets,
        })
    }

    /// The table this transliterator was built from.
    pub fn table(&self) -> &TransliterationTable {
        &self.table
    }

    /// Transliterate script text to ASCII.
    ///
    /// Graphemes without a symbol are copied through unchanged.
    pub fn encode(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        for c in raw.chars() {
            match self.encode_map.get(&c) {
                Some(symbol) => out.push_str(symbol),
                None => out.push(c),
            }
        }
        out
    }

    /// Transliterate script text and list every grapheme that was copied
    /// through for lack of a symbol. Preserved characters are not listed.
    pub fn encode_with_report(&self, raw: &str) -> EncodeReport {
        let mut text = String::with_capacity(raw.len());
        let mut unmapped = Vec::new();

        for (offset, c) in raw.char_indices() {
            match self.encode_map.get(&c) {
                Some(symbol) => text.push_str(symbol),
                None => {
                    if !self.preserved.contains(&c) {
                        unmapped.push(Unmapped {
                            grapheme: c,
                            offset,
                        });
                    }
                    text.push(c);
                }
            }
        }

        EncodeReport { text, unmapped }
    }

    /// Turn a transliteration back into script text.
    ///
    /// Fails with `UnmappableToken` at the first run of characters that is
    /// neither a table symbol nor a preserved character.
    pub fn decode(&self, translit: &str) -> Result<String> {
        let mut out = String::with_capacity(translit.len() * 2);
        let mut cursor = 0;

        for mat in self.decoder.find_iter(translit) {
            self.copy_preserved(translit, cursor, mat.start(), &mut out)?;
            out.push(self.decode_targets[mat.pattern().as_usize()]);
            cursor = mat.end();
        }
        self.copy_preserved(translit, cursor, translit.len(), &mut out)?;

        Ok(out)
    }

    /// Copy the gap `text[start..end]` between two matches, which may only
    /// hold preserved characters.
    fn copy_preserved(&self, text: &str, start: usize, end: usize, out: &mut String) -> Result<()> {
        let gap = &text[start..end];
        for (i, c) in gap.char_indices() {
            if !self.preserved.contains(&c) {
                let rest = &gap[i..];
                let run = rest
                    .char_indices()
                    .find(|(_, c)| self.preserved.contains(c))
                    .map_or(rest, |(j, _)| &rest[..j]);
                return Err(QuranalyzeError::unmappable(run, start + i));
            }
            out.push(c);
        }
        Ok(())
    }

    /// Whether `c` is a grapheme of the table.
    pub fn is_source_char(&self, c: char) -> bool {
        self.encode_map.contains_key(&c)
    }

    /// Whether `symbol` is exactly one symbol of the table.
    pub fn is_target_symbol(&self, symbol: &str) -> bool {
        self.table.mappings.iter().any(|(_, s)| s == symbol)
    }
}

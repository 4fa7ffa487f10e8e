//! Canonical text normalization for Arabic script.
//!
//! The [`Normalizer`] maps raw verse text to the form used for comparison and
//! grouping. Its behaviour is fully described by a [`NormalizationTable`],
//! applied in this order:
//!
//! 1. strip: marks removed outright (harakat, tanween, shadda, sukun,
//!    superscript alef and the other combining marks of U+064B..U+0658),
//! 2. variants: glyph variants collapsed onto one representative letter
//!    (hamza-bearing alef, waw and yeh, alef wasla),
//! 3. final forms: script-final letterforms mapped to their standalone
//!    equivalents (taa marbuta to heh).
//!
//! The three steps are composed into one lookup table at construction, so
//! normalization is a single left-to-right scan over code points. When
//! `fold_presentation_forms` is set, every character of the Arabic
//! Presentation Forms blocks is added to the same table with its
//! compatibility decomposition, already passed through steps 1-3.
//!
//! Construction rejects any table where a replacement contains a character
//! that is itself a key. That property is what makes `normalize` idempotent.
//!
//! # Examples
//!
//! ```
//! use quranalyze::analysis::normalizer::{NormalizationTable, Normalizer};
//!
//! let normalizer = Normalizer::new(NormalizationTable::default()).unwrap();
//! assert_eq!(normalizer.normalize("بِسْمِ ٱللَّهِ"), "بسم الله");
//! ```

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use unicode_normalization::char::decompose_compatible;

use crate::analysis::char_filter::{CharFilter, Transformation};
use crate::error::{QuranalyzeError, Result};

/// Arabic Presentation Forms-A and Presentation Forms-B.
const PRESENTATION_FORMS: [RangeInclusive<u32>; 2] = [0xFB50..=0xFDFF, 0xFE70..=0xFEFF];

/// Configuration of the normalization steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizationTable {
    /// Characters removed from the text.
    pub strip: Vec<char>,

    /// Glyph variants and the representative they collapse onto.
    pub variants: Vec<(char, char)>,

    /// Final letterforms and their standalone equivalents.
    pub final_forms: Vec<(char, char)>,

    /// Fold contextual glyphs and ligatures from the presentation form blocks.
    pub fold_presentation_forms: bool,
}

impl Default for NormalizationTable {
    fn default() -> Self {
        Self::arabic()
    }
}

impl NormalizationTable {
    /// The default table for Quranic Arabic.
    pub fn arabic() -> Self {
        let strip = (0x064B..=0x0658)
            .chain(std::iter::once(0x0670))
            .filter_map(char::from_u32)
            .collect();

        NormalizationTable {
            strip,
            variants: vec![
                ('\u{0622}', '\u{0627}'), // alef with madda
                ('\u{0623}', '\u{0627}'), // alef with hamza above
                ('\u{0625}', '\u{0627}'), // alef with hamza below
                ('\u{0671}', '\u{0627}'), // alef wasla
                ('\u{0624}', '\u{0648}'), // waw with hamza above
                ('\u{0626}', '\u{064A}'), // yeh with hamza above
            ],
            final_forms: vec![('\u{0629}', '\u{0647}')],
            fold_presentation_forms: true,
        }
    }

    /// A table that changes nothing.
    pub fn identity() -> Self {
        NormalizationTable {
            strip: Vec::new(),
            variants: Vec::new(),
            final_forms: Vec::new(),
            fold_presentation_forms: false,
        }
    }

    /// Compose the table into a single character lookup.
    fn compile(&self) -> Result<BTreeMap<char, String>> {
        let variants = unique_pairs("variants", &self.variants)?;
        let final_forms = unique_pairs("final_forms", &self.final_forms)?;

        let mut entries: BTreeMap<char, String> = BTreeMap::new();
        for &c in &self.strip {
            entries.insert(c, String::new());
        }
        for (&from, &to) in &variants {
            if entries.contains_key(&from) {
                continue;
            }
            let to = final_forms.get(&to).copied().unwrap_or(to);
            entries.insert(from, to.to_string());
        }
        for (&from, &to) in &final_forms {
            entries.entry(from).or_insert_with(|| to.to_string());
        }

        if self.fold_presentation_forms {
            let folded = fold_presentation_forms(&entries);
            entries.extend(folded);
        }

        validate(&entries)?;
        Ok(entries)
    }
}

fn unique_pairs(field: &str, pairs: &[(char, char)]) -> Result<BTreeMap<char, char>> {
    let mut map = BTreeMap::new();
    for &(from, to) in pairs {
        if let Some(previous) = map.insert(from, to)
            && previous != to
        {
            return Err(QuranalyzeError::invalid_config(format!(
                "normalization {field} maps U+{:04X} to both U+{:04X} and U+{:04X}",
                from as u32, previous as u32, to as u32
            )));
        }
    }
    Ok(map)
}

fn fold_presentation_forms(entries: &BTreeMap<char, String>) -> Vec<(char, String)> {
    let mut folded = Vec::new();
    for code in PRESENTATION_FORMS.iter().cloned().flatten() {
        let Some(c) = char::from_u32(code) else {
            continue;
        };
        if entries.contains_key(&c) {
            continue;
        }

        let mut decomposed = String::new();
        decompose_compatible(c, |d| decomposed.push(d));
        if decomposed.chars().eq(std::iter::once(c)) {
            continue;
        }

        let replacement = decomposed
            .chars()
            .fold(String::with_capacity(decomposed.len()), |mut out, d| {
                match entries.get(&d) {
                    Some(rep) => out.push_str(rep),
                    None => out.push(d),
                }
                out
            });
        folded.push((c, replacement));
    }
    folded
}

fn validate(entries: &BTreeMap<char, String>) -> Result<()> {
    for (key, replacement) in entries {
        if let Some(inner) = replacement.chars().find(|c| entries.contains_key(c)) {
            return Err(QuranalyzeError::invalid_config(format!(
                "normalization replacement for U+{:04X} contains U+{:04X}, which is itself rewritten",
                *key as u32, inner as u32
            )));
        }
    }
    Ok(())
}

/// Deterministic text normalizer driven by a [`NormalizationTable`].
#[derive(Debug, Clone)]
pub struct Normalizer {
    table: NormalizationTable,
    replacements: AHashMap<char, Box<str>>,
}

impl Normalizer {
    /// Compile a normalizer from a table.
    ///
    /// Fails with [`QuranalyzeError::InvalidConfig`] when the table is
    /// ambiguous or a replacement would need a second pass.
    pub fn new(table: NormalizationTable) -> Result<Self> {
        let replacements: AHashMap<char, Box<str>> = table
            .compile()?
            .into_iter()
            .map(|(c, rep)| (c, rep.into_boxed_str()))
            .collect();

        log::debug!(
            "Compiled normalization table: {} entries (presentation folding: {})",
            replacements.len(),
            table.fold_presentation_forms
        );

        Ok(Normalizer {
            table,
            replacements,
        })
    }

    /// The table this normalizer was built from.
    pub fn table(&self) -> &NormalizationTable {
        &self.table
    }

    /// Number of characters the normalizer rewrites.
    pub fn len(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacements.is_empty()
    }

    /// Normalize `raw` into its canonical comparable form.
    pub fn normalize(&self, raw: &str) -> String {
        let mut out = String::with_capacity(raw.len());
        for c in raw.chars() {
            match self.replacements.get(&c) {
                Some(rep) => out.push_str(rep),
                None => out.push(c),
            }
        }
        out
    }

    /// Whether `text` is already in canonical form.
    pub fn is_normalized(&self, text: &str) -> bool {
        !text.chars().any(|c| self.replacements.contains_key(&c))
    }
}

impl CharFilter for Normalizer {
    fn filter(&self, input: &str) -> (String, Vec<Transformation>) {
        let mut out = String::with_capacity(input.len());
        let mut transformations = Vec::new();

        for (offset, c) in input.char_indices() {
            match self.replacements.get(&c) {
                Some(rep) => {
                    let new_start = out.len();
                    out.push_str(rep);
                    transformations.push(Transformation::new(
                        offset,
                        offset + c.len_utf8(),
                        new_start,
                        out.len(),
                    ));
                }
                None => out.push(c),
            }
        }

        (out, transformations)
    }

    fn name(&self) -> &'static str {
        "normalizer"
    }
}

//! Output formatting for CLI commands.

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::analysis::token::Token;
use crate::cli::args::{OutputFormat, QuranalyzeArgs};
use crate::dataset::DatasetReport;
use crate::error::Result;
use crate::export::{ChapterSummary, FilteredWords, GraphSnapshot, WordRecord};
use crate::graph::RelationKind;
use crate::transliteration::Unmapped;

/// Result structure for corpus statistics.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResult {
    pub dataset: String,
    pub total_chapters: usize,
    pub total_verses: usize,
    pub total_words: usize,
    pub distinct_normalized: usize,
    pub words_per_verse: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub word_count_by_chapter: Option<BTreeMap<u32, usize>>,
}

/// Result structure for normalization.
#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizeResult {
    pub input: String,
    pub normalized: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tokens: Vec<NormalizedToken>,
}

/// One canonical token and the raw input span it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedToken {
    pub position: usize,
    pub text: String,
    pub raw: String,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl NormalizedToken {
    /// Pair a canonical token with its span in `input`.
    pub fn new(token: Token, input: &str) -> Self {
        NormalizedToken {
            position: token.position,
            raw: input
                .get(token.start_offset..token.end_offset)
                .unwrap_or_default()
                .to_string(),
            text: token.text,
            start_offset: token.start_offset,
            end_offset: token.end_offset,
        }
    }
}

/// Result structure for transliteration.
#[derive(Debug, Serialize)]
pub struct TransliterateResult {
    pub input: String,
    pub output: String,
    pub direction: &'static str,
    /// Graphemes copied through unchanged by encoding.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmapped: Vec<Unmapped>,
}

/// Result structure for exports.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportResult {
    pub path: String,
    pub snapshot: String,
    pub word_count: usize,
}

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

/// Output a result to stdout in the selected format.
pub fn output_result<T>(message: &str, result: &T, args: &QuranalyzeArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, message, result, args)
}

/// Write a result to `out` in the selected format.
pub fn write_result<T>(
    out: &mut dyn Write,
    message: &str,
    result: &T,
    args: &QuranalyzeArgs,
) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 0 {
                writeln!(out, "{message}")?;
                writeln!(out)?;
            }
            result.write_human(out)?;
        }
        OutputFormat::Json => {
            let json = if args.pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}

fn heading(out: &mut dyn Write, title: &str, rule: char) -> io::Result<()> {
    writeln!(out, "{title}")?;
    writeln!(out, "{}", rule.to_string().repeat(title.chars().count()))
}

fn write_word(out: &mut dyn Write, word: &WordRecord) -> io::Result<()> {
    write!(
        out,
        "{}:{}:{}\t{}\t{}\t{}",
        word.chapter, word.verse, word.position, word.text, word.normalized, word.transliteration
    )?;
    if let Some(root) = &word.root {
        write!(out, "\troot={root}")?;
    }
    if let Some(lemma) = &word.lemma {
        write!(out, "\tlemma={lemma}")?;
    }
    writeln!(out)
}

impl HumanOutput for StatsResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        heading(out, "Corpus Statistics:", '═')?;
        writeln!(out, "Dataset: {}", self.dataset)?;
        writeln!(out, "Chapters: {}", self.total_chapters)?;
        writeln!(out, "Verses: {}", self.total_verses)?;
        writeln!(out, "Words: {}", self.total_words)?;
        writeln!(out, "Distinct canonical forms: {}", self.distinct_normalized)?;
        writeln!(out, "Words per verse: {:.2}", self.words_per_verse)?;

        if let Some(counts) = &self.word_count_by_chapter {
            writeln!(out)?;
            heading(out, "Words by chapter:", '─')?;
            for (chapter, count) in counts {
                writeln!(out, "{chapter:>4}  {count}")?;
            }
        }
        Ok(())
    }
}

impl HumanOutput for ChapterSummary {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        heading(out, &format!("Chapter {}: {}", self.chapter, self.name), '═')?;
        if let Some(english) = &self.english_name {
            writeln!(out, "English name: {english}")?;
        }
        if let Some(revelation) = &self.revelation_type {
            writeln!(out, "Revelation: {revelation}")?;
        }
        writeln!(out, "Verses: {}", self.verse_count)?;
        writeln!(out, "Words: {}", self.word_count)?;
        writeln!(out)?;
        for word in &self.words {
            write_word(out, word)?;
        }
        Ok(())
    }
}

impl HumanOutput for DatasetReport {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        heading(out, "Dataset Verification:", '═')?;
        writeln!(out, "Chapters found: {}", self.chapters_found)?;
        writeln!(out, "Total verses: {}", self.total_verses)?;

        if !self.missing.is_empty() {
            let missing: Vec<String> = self.missing.iter().map(u32::to_string).collect();
            writeln!(out, "Missing chapters: {}", missing.join(", "))?;
        }
        if !self.invalid.is_empty() {
            writeln!(out)?;
            heading(out, "Invalid chapters:", '─')?;
            for invalid in &self.invalid {
                writeln!(out, "{:>4}  {}", invalid.chapter, invalid.error)?;
            }
        }

        writeln!(out)?;
        let status = if self.is_valid() { "valid" } else { "INVALID" };
        writeln!(out, "Status: {status}")
    }
}

impl HumanOutput for FilteredWords {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        if let Some(description) = &self.description {
            writeln!(out, "Filter: {description}")?;
        }
        for word in &self.words {
            write_word(out, word)?;
        }
        writeln!(out)?;
        writeln!(out, "Total words: {}", self.word_count)
    }
}

impl HumanOutput for GraphSnapshot {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        heading(out, "Word Graph:", '═')?;
        writeln!(out, "Nodes: {}", self.node_count)?;
        writeln!(out, "Edges: {}", self.edge_count)?;
        for kind in RelationKind::ALL {
            let count = self.edges.iter().filter(|e| e.kind == kind).count();
            if count > 0 {
                writeln!(out, "  {kind}: {count}")?;
            }
        }

        if !self.edges.is_empty() {
            writeln!(out)?;
            heading(out, "Edges:", '─')?;
            for edge in &self.edges {
                writeln!(
                    out,
                    "{} -- {}  [{} {}]",
                    edge.source, edge.target, edge.kind, edge.key
                )?;
            }
        }
        Ok(())
    }
}

impl HumanOutput for NormalizeResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.normalized)
    }
}

impl HumanOutput for TransliterateResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "{}", self.output)?;
        for unmapped in &self.unmapped {
            writeln!(
                out,
                "unmapped {:?} (U+{:04X}) at byte {}",
                unmapped.grapheme, unmapped.grapheme as u32, unmapped.offset
            )?;
        }
        Ok(())
    }
}

impl HumanOutput for ExportResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(
            out,
            "Wrote {} ({} words) to {}",
            self.snapshot, self.word_count, self.path
        )
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn args(extra: &[&str]) -> QuranalyzeArgs {
        let mut argv = vec!["quranalyze"];
        argv.extend_from_slice(extra);
        argv.extend_from_slice(&["normalize", "x"]);
        QuranalyzeArgs::try_parse_from(argv).unwrap()
    }

    fn render<T: Serialize + HumanOutput>(result: &T, args: &QuranalyzeArgs) -> String {
        let mut buf = Vec::new();
        write_result(&mut buf, "Done", result, args).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_human_output_with_message() {
        let result = NormalizeResult {
            input: "أَحْمَد".to_string(),
            normalized: "احمد".to_string(),
            tokens: Vec::new(),
        };
        assert_eq!(render(&result, &args(&[])), "Done\n\nاحمد\n");
        assert_eq!(render(&result, &args(&["-q"])), "احمد\n");
    }

    #[test]
    fn test_normalized_tokens_point_at_raw_text() {
        use std::sync::Arc;

        use crate::analysis::analyzer::PipelineAnalyzer;
        use crate::analysis::normalizer::{NormalizationTable, Normalizer};

        let input = "ٱلْحَمْدُ لِلَّهِ";
        let normalizer = Normalizer::new(NormalizationTable::arabic()).unwrap();
        let analyzer = PipelineAnalyzer::default().add_char_filter(Arc::new(normalizer));
        let tokens: Vec<NormalizedToken> = analyzer
            .analyze(input)
            .map(|token| NormalizedToken::new(token, input))
            .collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!((tokens[0].text.as_str(), tokens[0].raw.as_str()), ("الحمد", "ٱلْحَمْدُ"));
        assert_eq!((tokens[1].text.as_str(), tokens[1].raw.as_str()), ("لله", "لِلَّهِ"));
        assert_eq!(tokens[1].end_offset, input.len());

        let result = NormalizeResult {
            input: input.to_string(),
            normalized: "الحمد لله".to_string(),
            tokens,
        };
        let text = render(&result, &args(&["-f", "json"]));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["tokens"][1]["raw"], "لِلَّهِ");
    }

    #[test]
    fn test_json_output() {
        let result = ExportResult {
            path: "out.json".to_string(),
            snapshot: "corpus".to_string(),
            word_count: 3,
        };
        let text = render(&result, &args(&["-f", "json"]));
        assert_eq!(text.lines().count(), 1);

        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["word_count"], 3);

        let pretty = render(&result, &args(&["-f", "json", "--pretty"]));
        assert!(pretty.lines().count() > 1);
    }

    #[test]
    fn test_dataset_report_human() {
        let report = DatasetReport {
            chapters_found: 1,
            missing: vec![2],
            invalid: Vec::new(),
            total_verses: 7,
        };
        let text = render(&report, &args(&["-q"]));
        assert!(text.contains("Missing chapters: 2"));
        assert!(text.ends_with("Status: INVALID\n"));
    }

    #[test]
    fn test_transliterate_unmapped_listed() {
        let result = TransliterateResult {
            input: "بx".to_string(),
            output: "bx".to_string(),
            direction: "encode",
            unmapped: vec![Unmapped {
                grapheme: 'x',
                offset: 2,
            }],
        };
        let text = render(&result, &args(&["-q"]));
        assert!(text.contains("U+0078"));

        let json = render(&result, &args(&["-f", "json"]));
        assert!(json.contains("\"unmapped\""));
    }
}

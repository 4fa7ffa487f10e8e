//! Command implementations for the quranalyze CLI.

use std::sync::Arc;

use crate::analysis::analyzer::PipelineAnalyzer;
use crate::analysis::normalizer::Normalizer;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::CorpusConfig;
use crate::corpus::{Corpus, CorpusBuilder, LookupAnalyzer};
use crate::dataset::DatasetLoader;
use crate::error::{Location, QuranalyzeError, Result};
use crate::export::{SnapshotExporter, write_json};
use crate::filter::FilterChain;
use crate::graph::GraphBuilder;
use crate::transliteration::Transliterator;

/// Execute a CLI command.
pub fn execute_command(args: QuranalyzeArgs) -> Result<()> {
    match &args.command {
        Command::Stats(stats_args) => show_stats(stats_args, &args),
        Command::Chapter(chapter_args) => show_chapter(chapter_args, &args),
        Command::Verify(verify_args) => verify_dataset(verify_args, &args),
        Command::Words(words_args) => list_words(words_args, &args),
        Command::Graph(graph_args) => build_graph(graph_args, &args),
        Command::Normalize(normalize_args) => normalize_text(normalize_args, &args),
        Command::Transliterate(translit_args) => transliterate_text(translit_args, &args),
        Command::Export(export_args) => export_snapshot(export_args, &args),
    }
}

/// Configuration from `--config`, or the defaults.
fn load_config(cli_args: &QuranalyzeArgs) -> Result<CorpusConfig> {
    match &cli_args.config {
        Some(path) => {
            log::info!("Loading configuration from {}", path.display());
            CorpusConfig::from_file(path)
        }
        None => Ok(CorpusConfig::default()),
    }
}

fn build_corpus(dataset: &DatasetArgs, cli_args: &QuranalyzeArgs) -> Result<Corpus> {
    let mut builder = CorpusBuilder::new(&dataset.dataset).with_config(load_config(cli_args)?);

    if let Some(path) = &dataset.morphology {
        let analyzer = LookupAnalyzer::from_file(path)?;
        log::info!(
            "Loaded {} morphology annotations from {}",
            analyzer.len(),
            path.display()
        );
        builder = builder.with_analyzer(Arc::new(analyzer));
    }

    builder.build()
}

/// Apply `--surah`, `--ayah`, `--text`, `--contains`, `--root` and `--lemma`.
///
/// With `--normalized`, text queries are normalized before being compared
/// with canonical forms.
fn apply_filters<'a>(
    chain: FilterChain<'a>,
    filter: &FilterArgs,
    normalizer: &Normalizer,
) -> FilterChain<'a> {
    let query = |text: &str| {
        if filter.normalized {
            normalizer.normalize(text)
        } else {
            text.to_string()
        }
    };

    let mut chain = chain;
    match (filter.surah, filter.ayah) {
        (Some(surah), Some(ayah)) => chain = chain.by_ayah(surah, ayah),
        (Some(surah), None) => chain = chain.by_surah(surah),
        _ => {}
    }
    if let Some(text) = &filter.text {
        chain = chain.by_text(query(text), filter.normalized);
    }
    if let Some(substring) = &filter.contains {
        chain = chain.by_text_contains(query(substring), filter.normalized);
    }
    if let Some(root) = &filter.root {
        chain = chain.by_root(root.as_str());
    }
    if let Some(lemma) = &filter.lemma {
        chain = chain.by_lemma(lemma.as_str());
    }
    chain
}

/// Show corpus statistics.
fn show_stats(args: &StatsArgs, cli_args: &QuranalyzeArgs) -> Result<()> {
    let corpus = build_corpus(&args.dataset, cli_args)?;
    let stats = corpus.stats();

    output_result(
        "Corpus built successfully",
        &StatsResult {
            dataset: args.dataset.dataset.to_string_lossy().to_string(),
            total_chapters: stats.total_chapters,
            total_verses: stats.total_verses,
            total_words: stats.total_words,
            distinct_normalized: stats.distinct_normalized,
            words_per_verse: stats.words_per_verse(),
            word_count_by_chapter: args
                .by_chapter
                .then(|| stats.word_count_by_chapter.clone()),
        },
        cli_args,
    )
}

/// Show one chapter.
fn show_chapter(args: &ChapterArgs, cli_args: &QuranalyzeArgs) -> Result<()> {
    let corpus = build_corpus(&args.dataset, cli_args)?;
    let summary = SnapshotExporter::new(&corpus).chapter_summary(args.chapter)?;

    output_result(&format!("Chapter {}", args.chapter), &summary, cli_args)
}

/// Verify a dataset, reporting every invalid chapter.
fn verify_dataset(args: &VerifyArgs, cli_args: &QuranalyzeArgs) -> Result<()> {
    let mut config = load_config(cli_args)?.dataset;
    if args.expected_chapters.is_some() {
        config.expected_chapters = args.expected_chapters;
    }

    let loader = DatasetLoader::new(&args.dataset, config)?;
    let report = loader.verify()?;

    output_result(
        &format!("Verified {}", args.dataset.display()),
        &report,
        cli_args,
    )?;

    if report.is_valid() {
        Ok(())
    } else {
        Err(QuranalyzeError::malformed(
            Location::Dataset(args.dataset.clone()),
            "dataset failed verification",
        ))
    }
}

/// List words matching the filters.
fn list_words(args: &WordsArgs, cli_args: &QuranalyzeArgs) -> Result<()> {
    let corpus = build_corpus(&args.dataset, cli_args)?;
    let exporter = SnapshotExporter::new(&corpus);

    let chain = apply_filters(corpus.filter_words(), &args.filter, corpus.normalizer());
    let mut result = exporter.filter_chain(&chain);
    if let Some(limit) = args.limit {
        result.words.truncate(limit);
    }

    output_result(
        &format!("{} matching words", result.word_count),
        &result,
        cli_args,
    )
}

/// Build a relation graph over the filtered words.
fn build_graph(args: &GraphArgs, cli_args: &QuranalyzeArgs) -> Result<()> {
    let corpus = build_corpus(&args.dataset, cli_args)?;

    let words = apply_filters(corpus.filter_words(), &args.filter, corpus.normalizer()).get();
    let graph = GraphBuilder::build_from_words(&words, &args.options());
    let snapshot = SnapshotExporter::new(&corpus).graph(&graph);

    output_result(
        &format!("Graph over {} words", words.len()),
        &snapshot,
        cli_args,
    )
}

/// Normalize a text with the configured table.
fn normalize_text(args: &NormalizeArgs, cli_args: &QuranalyzeArgs) -> Result<()> {
    let config = load_config(cli_args)?;
    let normalizer = Arc::new(Normalizer::new(config.normalization)?);
    let analyzer =
        PipelineAnalyzer::from_config(&config.tokenizer).add_char_filter(normalizer.clone());

    let tokens = analyzer
        .analyze(&args.text)
        .map(|token| NormalizedToken::new(token, &args.text))
        .collect();

    output_result(
        "Normalized",
        &NormalizeResult {
            input: args.text.clone(),
            normalized: normalizer.normalize(&args.text),
            tokens,
        },
        cli_args,
    )
}

/// Encode or decode a text with the configured table.
fn transliterate_text(args: &TransliterateArgs, cli_args: &QuranalyzeArgs) -> Result<()> {
    let transliterator = Transliterator::new(load_config(cli_args)?.transliteration)?;

    let result = if args.decode {
        TransliterateResult {
            input: args.text.clone(),
            output: transliterator.decode(&args.text)?,
            direction: "decode",
            unmapped: Vec::new(),
        }
    } else {
        let report = transliterator.encode_with_report(&args.text);
        if !report.is_complete() {
            log::warn!(
                "{} graphemes have no transliteration and were copied unchanged",
                report.unmapped.len()
            );
        }
        TransliterateResult {
            input: args.text.clone(),
            output: report.text,
            direction: "encode",
            unmapped: report.unmapped,
        }
    };

    output_result("Transliterated", &result, cli_args)
}

/// Write a corpus snapshot or chapter summary to a file.
fn export_snapshot(args: &ExportArgs, cli_args: &QuranalyzeArgs) -> Result<()> {
    let corpus = build_corpus(&args.dataset, cli_args)?;
    let exporter = SnapshotExporter::new(&corpus);

    let (snapshot, word_count) = match args.chapter {
        Some(chapter) => {
            let summary = exporter.chapter_summary(chapter)?;
            write_json(&args.output, &summary)?;
            (format!("chapter {chapter} summary"), summary.word_count)
        }
        None => {
            let snapshot = exporter.corpus_snapshot(args.all_words);
            write_json(&args.output, &snapshot)?;
            let words = snapshot.words.as_ref().map_or(0, Vec::len);
            ("corpus snapshot".to_string(), words)
        }
    };

    output_result(
        "Export complete",
        &ExportResult {
            path: args.output.to_string_lossy().to_string(),
            snapshot,
            word_count,
        },
        cli_args,
    )
}

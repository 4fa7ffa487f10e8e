//! Criterion benchmarks for quranalyze.
//!
//! Covers the per-word hot paths and the corpus-level operations:
//! - Normalization and transliteration
//! - Tokenization
//! - Filter chains over a synthetic corpus
//! - Relation graph construction

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use quranalyze::analysis::analyzer::PipelineAnalyzer;
use quranalyze::analysis::normalizer::{NormalizationTable, Normalizer};
use quranalyze::corpus::{Word, WordId};
use quranalyze::filter::FilterChain;
use quranalyze::graph::{GraphBuilder, GraphOptions};
use quranalyze::transliteration::{TransliterationTable, Transliterator};

const VERSES: [&str; 4] = [
    "بِسْمِ ٱللَّهِ ٱلرَّحْمَٰنِ ٱلرَّحِيمِ",
    "ٱلْحَمْدُ لِلَّهِ رَبِّ ٱلْعَٰلَمِينَ",
    "ذَٰلِكَ ٱلْكِتَٰبُ لَا رَيْبَ فِيهِ هُدًى لِّلْمُتَّقِينَ",
    "ٱللَّهُ لَآ إِلَٰهَ إِلَّا هُوَ ٱلْحَىُّ ٱلْقَيُّومُ",
];

/// Generate verse texts cycling through the sample verses.
fn generate_verses(count: usize) -> Vec<&'static str> {
    (0..count).map(|i| VERSES[i % VERSES.len()]).collect()
}

/// Generate `count` words spread over chapters of 10 verses of 10 words.
fn generate_words(count: usize) -> Vec<Arc<Word>> {
    let normalizer = Normalizer::new(NormalizationTable::default()).unwrap();
    let analyzer = PipelineAnalyzer::default();

    let mut words = Vec::with_capacity(count);
    let mut verse = 0u32;
    while words.len() < count {
        let text = VERSES[verse as usize % VERSES.len()];
        for token in analyzer.analyze(text) {
            if words.len() == count {
                break;
            }
            let id = WordId::new(verse / 10 + 1, verse % 10 + 1, token.position);
            let normalized = normalizer.normalize(&token.text);
            words.push(Arc::new(Word::new(id, token.text, normalized, "")));
        }
        verse += 1;
    }
    words
}

/// Benchmark normalization and transliteration.
fn bench_text_forms(c: &mut Criterion) {
    let mut group = c.benchmark_group("text_forms");

    let normalizer = Normalizer::new(NormalizationTable::default()).unwrap();
    let transliterator = Transliterator::new(TransliterationTable::default()).unwrap();
    let verses = generate_verses(100);

    group.throughput(Throughput::Elements(verses.len() as u64));
    group.bench_function("normalize_verses", |b| {
        b.iter(|| {
            for verse in &verses {
                black_box(normalizer.normalize(black_box(verse)));
            }
        })
    });

    group.bench_function("encode_verses", |b| {
        b.iter(|| {
            for verse in &verses {
                black_box(transliterator.encode(black_box(verse)));
            }
        })
    });

    let encoded: Vec<String> = verses.iter().map(|v| transliterator.encode(v)).collect();
    group.bench_function("decode_verses", |b| {
        b.iter(|| {
            for text in &encoded {
                let _ = black_box(transliterator.decode(black_box(text)));
            }
        })
    });

    group.finish();
}

/// Benchmark verse tokenization.
fn bench_tokenization(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenization");

    let analyzer = PipelineAnalyzer::default();
    let verses = generate_verses(100);

    group.throughput(Throughput::Elements(verses.len() as u64));
    group.bench_function("tokenize_verses", |b| {
        b.iter(|| {
            for verse in &verses {
                black_box(analyzer.analyze(black_box(verse)).count());
            }
        })
    });

    group.finish();
}

/// Benchmark filter chains.
fn bench_filtering(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtering");

    let words = generate_words(80_000);
    let chain = FilterChain::new(&words);

    group.throughput(Throughput::Elements(words.len() as u64));
    group.bench_function("by_surah", |b| {
        b.iter(|| black_box(chain.by_surah(black_box(42)).count()))
    });

    group.bench_function("by_surah_and_text", |b| {
        b.iter(|| {
            black_box(
                chain
                    .by_surah(black_box(42))
                    .by_text_contains("الله", true)
                    .get(),
            )
        })
    });

    group.finish();
}

/// Benchmark graph construction; quadratic in the largest group.
fn bench_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("graph");
    group.sample_size(20);

    for size in [100, 1_000, 5_000] {
        let words = generate_words(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("build_from_words", size), &words, |b, words| {
            b.iter(|| {
                let graph = GraphBuilder::build_from_words(black_box(words), &GraphOptions::default());
                black_box(graph.edge_count())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_text_forms,
    bench_tokenization,
    bench_filtering,
    bench_graph
);

criterion_main!(benches);

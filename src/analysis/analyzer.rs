//! Pipeline analyzer that combines char filters, a tokenizer and token filters.
//!
//! 1. Char Filters: rewrite the whole text before tokenization
//! 2. Tokenizer: splits the filtered text into tokens
//! 3. Token Filters: applied sequentially in the order they were added
//!
//! Token offsets are mapped back through the char filters, so they always
//! refer to the text passed to [`PipelineAnalyzer::analyze`].
//!
//! The corpus runs every verse through a pipeline without char filters and
//! normalizes each word afterwards. The `normalize` command adds the
//! [`Normalizer`](crate::analysis::normalizer::Normalizer) as a char filter
//! to report canonical tokens with their raw offsets.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use quranalyze::analysis::analyzer::PipelineAnalyzer;
//! use quranalyze::analysis::token_filter::{BoundaryStripFilter, RemoveEmptyFilter};
//! use quranalyze::analysis::tokenizer::WhitespaceTokenizer;
//!
//! let analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
//!     .add_filter(Arc::new(BoundaryStripFilter::default()))
//!     .add_filter(Arc::new(RemoveEmptyFilter::new()));
//!
//! let tokens: Vec<_> = analyzer.analyze("(hello) , world").collect();
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[1].text, "world");
//! assert_eq!(tokens[1].position, 1);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::analysis::char_filter::{CharFilter, correct_offset};
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::{BoundaryStripFilter, Filter, RemoveEmptyFilter};
use crate::analysis::tokenizer::{Tokenizer, TokenizerConfig, WhitespaceTokenizer};

/// Char filters, a tokenizer and a chain of token filters.
#[derive(Clone)]
pub struct PipelineAnalyzer {
    char_filters: Vec<Arc<dyn CharFilter>>,
    tokenizer: Arc<dyn Tokenizer>,
    filters: Vec<Arc<dyn Filter>>,
}

impl PipelineAnalyzer {
    /// Create a new pipeline analyzer with the given tokenizer.
    pub fn new(tokenizer: Arc<dyn Tokenizer>) -> Self {
        PipelineAnalyzer {
            char_filters: Vec::new(),
            tokenizer,
            filters: Vec::new(),
        }
    }

    /// Build the analyzer described by a tokenizer configuration.
    pub fn from_config(config: &TokenizerConfig) -> Self {
        let tokenizer = WhitespaceTokenizer::with_delimiters(config.delimiters.iter().copied());
        let analyzer = PipelineAnalyzer::new(Arc::new(tokenizer));

        if config.strip_boundary {
            analyzer
                .add_filter(Arc::new(BoundaryStripFilter::new(&config.boundary_chars)))
                .add_filter(Arc::new(RemoveEmptyFilter::new()))
        } else {
            analyzer
        }
    }

    /// Add a char filter, applied after those already added.
    pub fn add_char_filter(mut self, char_filter: Arc<dyn CharFilter>) -> Self {
        self.char_filters.push(char_filter);
        self
    }

    /// Add a filter to the pipeline.
    pub fn add_filter(mut self, filter: Arc<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Get the tokenizer used by this analyzer.
    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    /// Get the char filters used by this analyzer.
    pub fn char_filters(&self) -> &[Arc<dyn CharFilter>] {
        &self.char_filters
    }

    /// Get the filters used by this analyzer.
    pub fn filters(&self) -> &[Arc<dyn Filter>] {
        &self.filters
    }

    /// Run the pipeline over `text`.
    pub fn analyze(&self, text: &str) -> TokenStream {
        if self.char_filters.is_empty() {
            return self.run_token_stages(text);
        }

        let mut filtered = text.to_string();
        let mut passes = Vec::with_capacity(self.char_filters.len());
        for char_filter in &self.char_filters {
            let (next, transformations) = char_filter.filter(&filtered);
            filtered = next;
            passes.push(transformations);
        }

        // Map offsets from the last filter's output back to the input.
        let tokens: Vec<_> = self
            .run_token_stages(&filtered)
            .map(|mut token| {
                for transformations in passes.iter().rev() {
                    token.start_offset = correct_offset(token.start_offset, transformations);
                    token.end_offset = correct_offset(token.end_offset, transformations);
                }
                token
            })
            .collect();
        Box::new(tokens.into_iter())
    }

    fn run_token_stages(&self, text: &str) -> TokenStream {
        let mut tokens = self.tokenizer.tokenize(text);
        for filter in &self.filters {
            tokens = filter.filter(tokens);
        }
        tokens
    }
}

impl Default for PipelineAnalyzer {
    fn default() -> Self {
        Self::from_config(&TokenizerConfig::default())
    }
}

impl fmt::Debug for PipelineAnalyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PipelineAnalyzer")
            .field(
                "char_filters",
                &self.char_filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .field("tokenizer", &self.tokenizer.name())
            .field(
                "filters",
                &self.filters.iter().map(|f| f.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::normalizer::{NormalizationTable, Normalizer};
    use crate::analysis::token::Token;

    #[test]
    fn test_default_has_no_filters() {
        let analyzer = PipelineAnalyzer::default();
        assert!(analyzer.filters().is_empty());
        assert_eq!(analyzer.tokenizer().name(), "whitespace");

        let tokens: Vec<Token> = analyzer.analyze("قُلْ، هُوَ").collect();
        assert_eq!(tokens[0].text, "قُلْ،");
    }

    #[test]
    fn test_boundary_stripping_from_config() {
        let config = TokenizerConfig {
            strip_boundary: true,
            ..TokenizerConfig::default()
        };
        let analyzer = PipelineAnalyzer::from_config(&config);
        assert_eq!(analyzer.filters().len(), 2);

        let tokens: Vec<Token> = analyzer.analyze("قُلْ، ؟ هُوَ").collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "قُلْ");
        assert_eq!(tokens[1].text, "هُوَ");
        assert_eq!(tokens[1].position, 1);
    }

    #[test]
    fn test_normalizer_char_filter_keeps_raw_offsets() {
        let normalizer = Normalizer::new(NormalizationTable::arabic()).unwrap();
        let analyzer = PipelineAnalyzer::default().add_char_filter(Arc::new(normalizer));
        assert_eq!(analyzer.char_filters().len(), 1);

        let text = "بِسْمِ ٱللَّهِ";
        let tokens: Vec<Token> = analyzer.analyze(text).collect();

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "بسم");
        assert_eq!(tokens[1].text, "الله");
        assert_eq!(&text[tokens[0].start_offset..tokens[0].end_offset], "بِسْمِ");
        assert_eq!(&text[tokens[1].start_offset..tokens[1].end_offset], "ٱللَّهِ");
        assert_eq!(tokens[1].position, 1);
    }

    #[test]
    fn test_offsets_without_char_filters() {
        let tokens: Vec<Token> = PipelineAnalyzer::default().analyze("ab  cd").collect();
        assert_eq!((tokens[1].start_offset, tokens[1].end_offset), (4, 6));
    }

    #[test]
    fn test_debug_lists_stage_names() {
        let config = TokenizerConfig {
            strip_boundary: true,
            ..TokenizerConfig::default()
        };
        let normalizer = Normalizer::new(NormalizationTable::arabic()).unwrap();
        let analyzer =
            PipelineAnalyzer::from_config(&config).add_char_filter(Arc::new(normalizer));
        let debug = format!("{analyzer:?}");
        assert!(debug.contains("normalizer"));
        assert!(debug.contains("boundary_strip"));
        assert!(debug.contains("remove_empty"));
    }
}

//! Tokenizer implementations for verse text.
//!
//! Tokenizers are the first step of word extraction: they split a verse's raw
//! text into positioned [`Token`](crate::analysis::token::Token)s. Tokenizing
//! is total; empty text produces an empty stream.
//!
//! # Available Tokenizers
//!
//! - [`whitespace::WhitespaceTokenizer`] - Splits on a configured delimiter set
//!
//! # Examples
//!
//! ```
//! use quranalyze::analysis::tokenizer::Tokenizer;
//! use quranalyze::analysis::tokenizer::whitespace::WhitespaceTokenizer;
//!
//! let tokenizer = WhitespaceTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("a b").collect();
//! assert_eq!(tokens.len(), 2);
//! assert_eq!(tokens[1].position, 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::token::TokenStream;

/// Trait for tokenizers that convert verse text into tokens.
///
/// The trait requires `Send + Sync` so a tokenizer can be shared by an
/// immutable corpus configuration.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> TokenStream;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

/// Delimiters used when no explicit set is configured.
///
/// Space, tab, line feed, carriage return, no-break space and ideographic
/// space. Arabic text in the dataset only uses U+0020, the rest guard against
/// stray editor artifacts.
pub const DEFAULT_DELIMITERS: [char; 6] = [
    '\u{0020}', '\u{0009}', '\u{000A}', '\u{000D}', '\u{00A0}', '\u{3000}',
];

/// Characters trimmed from token boundaries when boundary stripping is on.
pub const DEFAULT_BOUNDARY_CHARS: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~\u{061F}\u{060C}";

/// Tokenizer configuration carried by the corpus configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Characters that separate words.
    pub delimiters: Vec<char>,
    /// Whether to trim boundary punctuation and drop tokens left empty.
    pub strip_boundary: bool,
    /// Characters trimmed from both ends of each token when `strip_boundary` is set.
    pub boundary_chars: String,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            delimiters: DEFAULT_DELIMITERS.to_vec(),
            strip_boundary: false,
            boundary_chars: DEFAULT_BOUNDARY_CHARS.to_string(),
        }
    }
}

// Individual tokenizer modules
pub mod whitespace;

pub use whitespace::WhitespaceTokenizer;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TokenizerConfig::default();
        assert!(config.delimiters.contains(&' '));
        assert!(!config.strip_boundary);
        assert!(config.boundary_chars.contains('\u{060C}'));
    }

    #[test]
    fn test_config_partial_json() {
        let config: TokenizerConfig =
            serde_json::from_str(r#"{"strip_boundary": true}"#).unwrap();
        assert!(config.strip_boundary);
        assert_eq!(config.delimiters, DEFAULT_DELIMITERS.to_vec());
    }
}

//! Whitespace tokenizer implementation.

use ahash::AHashSet;

use super::{DEFAULT_DELIMITERS, Tokenizer};

use crate::analysis::token::{Token, TokenStream};

/// A tokenizer that splits text on a fixed set of delimiter characters.
///
/// Runs of delimiters never produce empty tokens, and every non-delimiter
/// character ends up in exactly one token. Offsets are byte offsets into the
/// input.
#[derive(Clone, Debug)]
pub struct WhitespaceTokenizer {
    delimiters: AHashSet<char>,
}

impl Default for WhitespaceTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl WhitespaceTokenizer {
    /// Create a new tokenizer splitting on [`DEFAULT_DELIMITERS`].
    pub fn new() -> Self {
        Self::with_delimiters(DEFAULT_DELIMITERS)
    }

    /// Create a tokenizer splitting on the given delimiters.
    pub fn with_delimiters<I: IntoIterator<Item = char>>(delimiters: I) -> Self {
        WhitespaceTokenizer {
            delimiters: delimiters.into_iter().collect(),
        }
    }

    /// Check whether `c` separates words.
    pub fn is_delimiter(&self, c: char) -> bool {
        self.delimiters.contains(&c)
    }

    fn split(&self, text: &str) -> Vec<Token> {
        let mut tokens = Vec::new();
        let mut start: Option<usize> = None;

        for (offset, c) in text.char_indices() {
            match (self.is_delimiter(c), start) {
                (true, Some(begin)) => {
                    tokens.push(Token::with_offsets(
                        &text[begin..offset],
                        tokens.len(),
                        begin,
                        offset,
                    ));
                    start = None;
                }
                (false, None) => start = Some(offset),
                _ => {}
            }
        }

        if let Some(begin) = start {
            tokens.push(Token::with_offsets(
                &text[begin..],
                tokens.len(),
                begin,
                text.len(),
            ));
        }

        tokens
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> TokenStream {
        Box::new(self.split(text).into_iter())
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

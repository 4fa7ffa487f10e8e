//! Boundary strip filter implementation.

use ahash::AHashSet;

use super::Filter;
use crate::analysis::token::TokenStream;
use crate::analysis::tokenizer::DEFAULT_BOUNDARY_CHARS;

/// A filter that trims boundary punctuation from both ends of each token.
///
/// Only leading and trailing characters are removed; punctuation inside a
/// token is kept. Tokens made entirely of boundary characters become empty
/// and are left for [`RemoveEmptyFilter`](super::RemoveEmptyFilter).
#[derive(Clone, Debug)]
pub struct BoundaryStripFilter {
    chars: AHashSet<char>,
}

impl Default for BoundaryStripFilter {
    fn default() -> Self {
        Self::new(DEFAULT_BOUNDARY_CHARS)
    }
}

impl BoundaryStripFilter {
    /// Create a new strip filter trimming the characters of `chars`.
    pub fn new(chars: &str) -> Self {
        BoundaryStripFilter {
            chars: chars.chars().collect(),
        }
    }
}

impl Filter for BoundaryStripFilter {
    fn filter(&self, tokens: TokenStream) -> TokenStream {
        let chars = self.chars.clone();
        Box::new(tokens.map(move |token| {
            let trimmed = token.text.trim_matches(|c: char| chars.contains(&c));
            if trimmed.len() == token.text.len() {
                token
            } else {
                token.with_text(trimmed)
            }
        }))
    }

    fn name(&self) -> &'static str {
        "boundary_strip"
    }
}

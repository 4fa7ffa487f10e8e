//! Token filter implementations for token transformation.
//!
//! Filters run between the tokenizer and word construction. The corpus only
//! installs them when boundary stripping is enabled in
//! [`TokenizerConfig`](crate::analysis::tokenizer::TokenizerConfig):
//!
//! ```text
//! Tokenizer → BoundaryStrip → RemoveEmpty → Words
//! ```
//!
//! # Available Filters
//!
//! - [`strip::BoundaryStripFilter`] - Trims punctuation from token boundaries
//! - [`remove_empty::RemoveEmptyFilter`] - Drops empty tokens and renumbers positions

use crate::analysis::token::TokenStream;

/// Trait for filters that transform token streams.
///
/// Filters receive a stream of tokens and produce a new stream. They are
/// total: a filter may rewrite or drop tokens but never fails.
pub trait Filter: Send + Sync {
    /// Apply this filter to a token stream.
    fn filter(&self, tokens: TokenStream) -> TokenStream;

    /// Get the name of this filter (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod remove_empty;
pub mod strip;

pub use remove_empty::RemoveEmptyFilter;
pub use strip::BoundaryStripFilter;

//! Remove empty filter implementation.
//!
//! # Examples
//!
//! ```
//! use quranalyze::analysis::token_filter::Filter;
//! use quranalyze::analysis::token_filter::remove_empty::RemoveEmptyFilter;
//! use quranalyze::analysis::token::Token;
//!
//! let filter = RemoveEmptyFilter::new();
//! let tokens = vec![
//!     Token::new("hello", 0),
//!     Token::new("", 1),         // Will be removed
//!     Token::new("world", 2)
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter())).collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[1].text, "world");
//! assert_eq!(result[1].position, 1);
//! ```

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;

/// A filter that removes empty tokens from the stream.
///
/// Surviving tokens are renumbered so positions stay contiguous from 0.
/// Byte offsets are left untouched.
#[derive(Clone, Debug, Default)]
pub struct RemoveEmptyFilter;

impl RemoveEmptyFilter {
    /// Create a new remove empty filter.
    pub fn new() -> Self {
        RemoveEmptyFilter
    }
}

impl Filter for RemoveEmptyFilter {
    fn filter(&self, tokens: TokenStream) -> TokenStream {
        Box::new(
            tokens
                .filter(|token| !token.is_empty())
                .enumerate()
                .map(|(position, token)| {
                    if token.position == position {
                        token
                    } else {
                        token.with_position(position)
                    }
                }),
        )
    }

    fn name(&self) -> &'static str {
        "remove_empty"
    }
}

//! Text analysis for verse text.
//!
//! This module holds the pieces that turn raw verse text into comparable
//! word tokens:
//!
//! - [`analyzer`]: the tokenizer plus token filter pipeline run per verse
//! - [`char_filter`]: the char filter abstraction and offset bookkeeping
//! - [`normalizer`]: table-driven canonicalization of Arabic script
//! - [`tokenizer`]: splitting verse text into positioned tokens
//! - [`token_filter`]: optional post-processing of the token stream

pub mod analyzer;
pub mod char_filter;
pub mod normalizer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

//! Char filter abstraction for text normalization.
//!
//! A char filter rewrites raw text before it is compared or tokenized and
//! reports which byte ranges it changed, so callers can map positions in the
//! filtered text back to the original.
//!
//! The only filter shipped with the crate is the
//! [`Normalizer`](crate::analysis::normalizer::Normalizer).

/// Represents a change in the text, mapping a range in the original text
/// to a range in the new text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transformation {
    pub original_start: usize,
    pub original_end: usize,
    pub new_start: usize,
    pub new_end: usize,
}

impl Transformation {
    pub fn new(
        original_start: usize,
        original_end: usize,
        new_start: usize,
        new_end: usize,
    ) -> Self {
        Self {
            original_start,
            original_end,
            new_start,
            new_end,
        }
    }

    /// Whether the change removed text without replacing it.
    pub fn is_deletion(&self) -> bool {
        self.new_start == self.new_end
    }
}

/// Trait for character filters that transform text.
///
/// Implementations return the filtered text along with the list of
/// transformations, in input order, that produced it.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text.
    fn filter(&self, input: &str) -> (String, Vec<Transformation>);

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

/// Map a byte offset in filtered text back to the original text.
///
/// Offsets inside a replaced range snap to the start of the original range.
pub fn correct_offset(offset: usize, transformations: &[Transformation]) -> usize {
    let mut delta: isize = 0;
    for t in transformations {
        if offset < t.new_start {
            break;
        }
        if offset < t.new_end {
            return t.original_start;
        }
        delta = t.original_end as isize - t.new_end as isize;
    }
    (offset as isize + delta) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_offset() {
        // "aXb" -> "ab": X (bytes 1..2) deleted
        let transformations = vec![Transformation::new(1, 2, 1, 1)];
        assert_eq!(correct_offset(0, &transformations), 0);
        assert_eq!(correct_offset(1, &transformations), 2);
        assert_eq!(correct_offset(2, &transformations), 3);
        assert!(transformations[0].is_deletion());
    }

    #[test]
    fn test_correct_offset_expansion() {
        // "bab" -> "baaab": a (1..2) -> aaa (1..4)
        let transformations = vec![Transformation::new(1, 2, 1, 4)];
        assert_eq!(correct_offset(2, &transformations), 1);
        assert_eq!(correct_offset(4, &transformations), 2);
    }
}

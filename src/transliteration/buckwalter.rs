//! The Buckwalter transliteration scheme.
//!
//! A one-to-one mapping between Arabic letters and marks and printable ASCII.
//! Every symbol is a single character, so the scheme is trivially a prefix
//! code and decodes unambiguously.

/// Arabic grapheme and its Buckwalter symbol.
pub const BUCKWALTER: [(char, &str); 48] = [
    // letters
    ('\u{0621}', "'"),
    ('\u{0622}', "|"),
    ('\u{0623}', ">"),
    ('\u{0624}', "&"),
    ('\u{0625}', "<"),
    ('\u{0626}', "}"),
    ('\u{0627}', "A"),
    ('\u{0628}', "b"),
    ('\u{0629}', "p"),
    ('\u{062A}', "t"),
    ('\u{062B}', "v"),
    ('\u{062C}', "j"),
    ('\u{062D}', "H"),
    ('\u{062E}', "x"),
    ('\u{062F}', "d"),
    ('\u{0630}', "*"),
    ('\u{0631}', "r"),
    ('\u{0632}', "z"),
    ('\u{0633}', "s"),
    ('\u{0634}', "$"),
    ('\u{0635}', "S"),
    ('\u{0636}', "D"),
    ('\u{0637}', "T"),
    ('\u{0638}', "Z"),
    ('\u{0639}', "E"),
    ('\u{063A}', "g"),
    ('\u{0640}', "_"),
    ('\u{0641}', "f"),
    ('\u{0642}', "q"),
    ('\u{0643}', "k"),
    ('\u{0644}', "l"),
    ('\u{0645}', "m"),
    ('\u{0646}', "n"),
    ('\u{0647}', "h"),
    ('\u{0648}', "w"),
    ('\u{0649}', "Y"),
    ('\u{064A}', "y"),
    // marks
    ('\u{064B}', "F"),
    ('\u{064C}', "N"),
    ('\u{064D}', "K"),
    ('\u{064E}', "a"),
    ('\u{064F}', "u"),
    ('\u{0650}', "i"),
    ('\u{0651}', "~"),
    ('\u{0652}', "o"),
    ('\u{0653}', "^"),
    ('\u{0654}', "#"),
    ('\u{0670}', "`"),
];

/// Alef wasla, which the Quranic text uses for elided hamzat al-wasl.
pub const ALEF_WASLA: (char, &str) = ('\u{0671}', "{");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_are_single_printable_ascii() {
        for (_, symbol) in BUCKWALTER.iter().chain(std::iter::once(&ALEF_WASLA)) {
            assert_eq!(symbol.len(), 1);
            assert!(symbol.bytes().all(|b| b.is_ascii_graphic()));
        }
    }
}

//! Accent- and case-insensitive text folding for search.

use unicode_normalization::char::canonical_combining_class;
use unicode_normalization::UnicodeNormalization;

/// Spacing accent characters that fold away like their combining forms.
const SPACING_DIACRITICS: &[char] = &[
    '^', '`', '\u{a8}', '\u{af}', '\u{b4}', '\u{b7}', '\u{b8}',
];

/// Accent marks: combining marks that attach to a base letter (non-zero
/// combining class), plus spacing accents and modifier letters. Vowel signs
/// of Indic scripts have class 0 and are kept.
fn is_diacritic(c: char) -> bool {
    canonical_combining_class(c) != 0
        || SPACING_DIACRITICS.contains(&c)
        || ('\u{2b0}'..='\u{2ff}').contains(&c)
}

/// Decomposes `text` (NFD), drops accent marks and lowercases the rest.
///
/// `"Café"` and `"cafe"` both fold to `"cafe"`.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_diacritic(*c))
        .collect::<String>()
        .to_lowercase()
}

/// [`normalize`] for optional text; `None` folds to `""`.
pub fn normalize_opt(text: Option<&str>) -> String {
    text.map(normalize).unwrap_or_default()
}

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize a lookup key or a learner's answer for comparison.
///
/// Trims, lowercases and recomposes (NFC) so that `"Tú"`, `" tú "` and a
/// decomposed `"tu\u{301}"` all compare equal.
pub fn normalize(text: &str) -> String {
    text.trim().nfc().collect::<String>().to_lowercase()
}

/// Strip diacritics after normalizing, so `"Tu"` and `"tú"` fold to the same key.
pub fn fold_accents(text: &str) -> String {
    normalize(text)
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect()
}

/// Remove the last `count` characters of `text` (not bytes).
pub fn drop_chars(text: &str, count: usize) -> &str {
    if count == 0 {
        return text;
    }
    match text.char_indices().rev().nth(count - 1) {
        Some((idx, _)) => &text[..idx],
        None => "",
    }
}

/// The last `count` characters of `text`, or `None` if it is shorter.
pub fn last_chars(text: &str, count: usize) -> Option<&str> {
    if count == 0 {
        return Some("");
    }
    text.char_indices()
        .rev()
        .nth(count - 1)
        .map(|(idx, _)| &text[idx..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_case_whitespace_and_composition() {
        assert_eq!(normalize("  Tú "), "tú");
        assert_eq!(normalize("tu\u{301}"), "tú");
        assert_eq!(normalize("HABLÉ"), "hablé");
    }

    #[test]
    fn accent_folding() {
        assert_eq!(fold_accents(" Tú "), "tu");
        assert_eq!(fold_accents("PRETÉRITO"), "preterito");
        assert_eq!(fold_accents("pretérito"), fold_accents("preterito"));
        assert_eq!(fold_accents("pingüino"), "pinguino");
    }

    #[test]
    fn char_slicing_respects_multibyte_letters() {
        assert_eq!(drop_chars("reír", 2), "re");
        assert_eq!(drop_chars("ab", 5), "");
        assert_eq!(drop_chars("hablar", 0), "hablar");
        assert_eq!(last_chars("reír", 2), Some("ír"));
        assert_eq!(last_chars("a", 2), None);
    }
}

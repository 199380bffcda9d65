//! Text normalization for case- and accent-insensitive matching

use unicode_normalization::UnicodeNormalization;

/// Combining Diacritical Marks block
fn is_diacritic(ch: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&ch)
}

/// Lowercase, decompose (NFD) and drop diacritical marks.
///
/// `"Ñandú"` becomes `"nandu"`, so a query typed without accents still finds
/// accented names and vice versa.
pub fn normalize(text: &str) -> String {
    text.to_lowercase().nfd().filter(|ch| !is_diacritic(*ch)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_accents_and_case() {
        assert_eq!(normalize("ÁÉÍÓÚñÑ"), "aeiounn");
        assert_eq!(normalize("Pingüino"), "pinguino");
    }

    #[test]
    fn test_plain_ascii_is_lowercased_only() {
        assert_eq!(normalize("Ardo 42!"), "ardo 42!");
    }

    #[test]
    fn test_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_idempotent() {
        for text in ["Árbol", "ÑANDÚ", "çedilla", "Ǆ", "İstanbul"] {
            let once = normalize(text);
            assert_eq!(normalize(&once), once, "not idempotent for {text}");
        }
    }
}

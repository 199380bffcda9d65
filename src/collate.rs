//! Spanish collation for card names.
//!
//! Names are compared on three levels, the way a Spanish dictionary does:
//!
//! 1. base letters, with `ñ` a letter of its own between `n` and `o`;
//! 2. accents (`a` < `á`), only consulted when the base letters tie;
//! 3. case (lowercase first), only consulted when accents tie too.
//!
//! Whitespace sorts before punctuation, punctuation before digits, digits
//! before letters. Letters outside the Latin alphabet follow by code point.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;

const COMBINING_TILDE: char = '\u{0303}';

const WEIGHT_SPACE: u32 = 1;
const WEIGHT_PUNCT: u32 = 2;
const WEIGHT_DIGIT: u32 = 100;
const WEIGHT_LATIN: u32 = 200;
const WEIGHT_OTHER: u32 = 1000;

/// Precomputed sort key; comparing keys is equivalent to [`compare`].
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<u32>,
    secondary: Vec<u32>,
    tertiary: Vec<u8>,
}

impl CollationKey {
    pub fn new(text: &str) -> Self {
        let mut key = CollationKey {
            primary: Vec::new(),
            secondary: Vec::new(),
            tertiary: Vec::new(),
        };

        let mut chars = text.nfd().peekable();
        while let Some(ch) = chars.next() {
            if is_combining(ch) {
                // Stray mark with no base letter: an empty slot on every level
                // keeps the three weight lists aligned.
                key.primary.push(0);
                key.secondary.push(ch as u32);
                key.tertiary.push(0);
                continue;
            }

            let lower = ch.to_lowercase().next().unwrap_or(ch);
            let is_upper = lower != ch;

            let mut accent: u32 = 0;
            let mut enye = false;
            while let Some(&mark) = chars.peek() {
                if !is_combining(mark) {
                    break;
                }
                chars.next();
                if lower == 'n' && mark == COMBINING_TILDE && !enye {
                    enye = true;
                } else {
                    accent = accent.wrapping_mul(0x400).wrapping_add(mark as u32);
                }
            }

            key.primary.push(primary_weight(lower, enye));
            key.secondary.push(accent);
            key.tertiary.push(u8::from(is_upper));
        }

        key
    }
}

fn is_combining(ch: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&ch)
}

fn primary_weight(lower: char, enye: bool) -> u32 {
    match lower {
        c if c.is_whitespace() => WEIGHT_SPACE,
        c if c.is_ascii_digit() => WEIGHT_DIGIT + (c as u32 - '0' as u32),
        'a'..='n' => {
            let base = WEIGHT_LATIN + 2 * (lower as u32 - 'a' as u32);
            if enye { base + 1 } else { base }
        }
        'o'..='z' => WEIGHT_LATIN + 2 * (lower as u32 - 'a' as u32),
        c if c.is_alphabetic() => WEIGHT_OTHER + c as u32,
        _ => WEIGHT_PUNCT,
    }
}

/// Compare two strings using Spanish collation rules
pub fn compare(a: &str, b: &str) -> Ordering {
    CollationKey::new(a).cmp(&CollationKey::new(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(words: &[&str]) -> Vec<String> {
        let mut words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        words.sort_by(|a, b| compare(a, b));
        words
    }

    #[test]
    fn test_enye_sorts_between_n_and_o() {
        assert_eq!(
            sorted(&["oso", "ñandú", "nube", "nzz"]),
            vec!["nube", "nzz", "ñandú", "oso"]
        );
    }

    #[test]
    fn test_accents_are_secondary() {
        // Accent only breaks ties; base letters decide first.
        assert_eq!(sorted(&["ábaco", "abeja", "abaco"]), vec!["abaco", "ábaco", "abeja"]);
        assert_eq!(compare("Ángel", "angel"), Ordering::Greater);
        assert_eq!(compare("Ángel", "Angela"), Ordering::Less);
    }

    #[test]
    fn test_case_is_tertiary() {
        assert_eq!(compare("ardo", "Ardo"), Ordering::Less);
        assert_eq!(compare("Ardo", "brisa"), Ordering::Less);
        assert_eq!(compare("Ardo", "Ardo"), Ordering::Equal);
    }

    #[test]
    fn test_upper_enye_is_enye() {
        assert_eq!(compare("Ñu", "Nu"), Ordering::Greater);
        assert_eq!(compare("Ñu", "Ou"), Ordering::Less);
    }

    #[test]
    fn test_digits_before_letters() {
        assert_eq!(sorted(&["b", "2", "a", "10"]), vec!["10", "2", "a", "b"]);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(compare("Ard", "Ardo"), Ordering::Less);
    }

    #[test]
    fn test_leading_mark_keeps_levels_aligned() {
        let key = CollationKey::new("\u{0301}ab");
        assert_eq!(key.primary.len(), 3);
        assert_eq!(key.secondary.len(), 3);
        assert_eq!(key.tertiary.len(), 3);
        // Accent on the second letter still compares against the second letter.
        assert_eq!(
            compare("\u{0301}ab\u{0301}", "\u{0301}ab"),
            Ordering::Greater
        );
    }
}

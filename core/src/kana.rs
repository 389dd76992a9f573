//! Kana helpers.

use unicode_normalization::UnicodeNormalization;

/// Distance between a katakana codepoint and its hiragana counterpart.
const KATAKANA_OFFSET: u32 = 0x60;

/// True for full-width katakana ァ (U+30A1) through ヶ (U+30F6), small kana included.
pub fn is_katakana(ch: char) -> bool {
    ('\u{30A1}'..='\u{30F6}').contains(&ch)
}

/// Map full-width katakana to hiragana, leaving every other codepoint alone.
///
/// Output has the same number of codepoints as the input, and applying the
/// function twice gives the same result as applying it once.
///
/// # Example
/// ```
/// assert_eq!(yomi_core::katakana_to_hiragana("スシ"), "すし");
/// ```
pub fn katakana_to_hiragana(text: &str) -> String {
    text.chars()
        .map(|ch| {
            if is_katakana(ch) {
                char::from_u32(ch as u32 - KATAKANA_OFFSET).unwrap_or(ch)
            } else {
                ch
            }
        })
        .collect()
}

/// Comparison key for readings: NFC, then katakana folded to hiragana.
pub fn reading_key(text: &str) -> String {
    let composed: String = text.nfc().collect();
    katakana_to_hiragana(&composed)
}

//! Surface → reading lookup built from one token sequence.

use std::collections::HashMap;

use crate::error::Result;
use crate::furigana;
use crate::token::Token;

/// Readings keyed by surface text. Surfaces are opaque keys.
pub type OverrideTable = HashMap<String, String>;

/// Collect readings from a token sequence.
///
/// Tokens without a reading are skipped. When a surface appears more than
/// once, the later reading wins.
pub fn extract_overrides(sequence: &[Token]) -> OverrideTable {
    let mut overrides = OverrideTable::with_capacity(sequence.len());
    for t in sequence {
        if let Some(reading) = t.reading() {
            overrides.insert(t.surface().to_string(), reading.to_string());
        }
    }
    overrides
}

/// Parse furigana notation and collect its readings.
pub fn overrides_from_notation(text: &str) -> Result<OverrideTable> {
    Ok(extract_overrides(&furigana::parse(text)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_parsed_token_contributes() {
        let table = overrides_from_notation("{橋/ばし}を渡る").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("橋").map(String::as_str), Some("ばし"));
        assert_eq!(table.get("を渡る").map(String::as_str), Some("を渡る"));
        assert!(!table.contains_key("渡"));
    }

    #[test]
    fn later_occurrence_wins() {
        let seq = vec![
            Token::new("生", "なま"),
            Token::plain("と"),
            Token::new("生", "せい"),
        ];
        let table = extract_overrides(&seq);
        assert_eq!(table.get("生").map(String::as_str), Some("せい"));
    }

    #[test]
    fn bare_tokens_are_skipped() {
        let seq = vec![Token::bare("猫"), Token::new("犬", "いぬ")];
        let table = extract_overrides(&seq);
        assert!(!table.contains_key("猫"));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn empty_sequence_gives_empty_table() {
        assert!(extract_overrides(&[]).is_empty());
    }
}

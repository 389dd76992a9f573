// core/src/reconcile.rs
//
// Reading reconciliation: the dictionary tagger decides segmentation, the
// contextual tagger decides readings wherever it annotated the same surface.
//
// Matching is by exact surface. A span segmented differently by the two
// taggers gets no override.

use tracing::trace;

use crate::error::Result;
use crate::furigana;
use crate::overrides::{overrides_from_notation, OverrideTable};
use crate::token::Token;

/// Merge dictionary-tagger notation with contextual-tagger notation.
///
/// The result has exactly the dictionary tokens' surfaces, in order; only
/// readings may differ.
///
/// # Example
/// ```
/// use yomi_core::{reconcile, Token};
///
/// let merged = reconcile("{橋/はし}を{渡/わた}る", "{橋/ばし}を渡る").unwrap();
/// assert_eq!(merged[0], Token::new("橋", "ばし"));
/// assert_eq!(merged[2], Token::new("渡", "わた"));
/// ```
pub fn reconcile(dict_annotated: &str, context_annotated: &str) -> Result<Vec<Token>> {
    let base = furigana::parse(dict_annotated)?;
    let overrides = overrides_from_notation(context_annotated)?;
    Ok(apply_overrides(base, &overrides))
}

/// Replace readings of base tokens whose surface has an override.
///
/// Tokens with an absent or empty reading are kept as they are.
pub fn apply_overrides(base: Vec<Token>, overrides: &OverrideTable) -> Vec<Token> {
    base.into_iter()
        .map(|t| {
            if !t.has_reading() {
                return t;
            }
            match overrides.get(t.surface()) {
                Some(reading) => {
                    if t.reading() != Some(reading.as_str()) {
                        trace!(surface = t.surface(), from = t.yomi(), to = %reading, "reading override");
                    }
                    t.with_reading(reading.as_str())
                }
                None => t,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::YomiError;

    fn pairs(tokens: &[Token]) -> Vec<(&str, &str)> {
        tokens.iter().map(|t| (t.surface(), t.yomi())).collect()
    }

    #[test]
    fn context_reading_replaces_dictionary_reading() {
        let merged = reconcile("{橋/はし}を{渡/わた}る", "{橋/ばし}を渡る").unwrap();
        assert_eq!(
            pairs(&merged),
            vec![("橋", "ばし"), ("を", "を"), ("渡", "わた"), ("る", "る")]
        );
    }

    #[test]
    fn segmentation_follows_dictionary() {
        let merged = reconcile("{今日/きょう}は", "{今日は/こんにちは}").unwrap();
        assert_eq!(pairs(&merged), vec![("今日", "きょう"), ("は", "は")]);
    }

    #[test]
    fn every_shared_surface_takes_context_reading() {
        let merged = reconcile("{日本/にほん}へ", "{日本/にっぽん}へ").unwrap();
        assert_eq!(pairs(&merged), vec![("日本", "にっぽん"), ("へ", "へ")]);
    }

    #[test]
    fn empty_base_reading_is_not_overridden() {
        let mut table = OverrideTable::new();
        table.insert("橋".to_string(), "ばし".to_string());
        let base = vec![Token::new("橋", ""), Token::bare("橋"), Token::new("橋", "はし")];
        let merged = apply_overrides(base, &table);
        assert_eq!(merged[0], Token::new("橋", ""));
        assert_eq!(merged[1], Token::bare("橋"));
        assert_eq!(merged[2], Token::new("橋", "ばし"));
    }

    #[test]
    fn malformed_context_propagates() {
        let err = reconcile("{橋/はし}", "{橋/ばし").unwrap_err();
        assert!(matches!(err, YomiError::MalformedNotation { .. }));
    }

    #[test]
    fn malformed_dictionary_propagates() {
        let err = reconcile("{橋", "{橋/ばし}").unwrap_err();
        assert!(matches!(err, YomiError::MalformedNotation { offset: 0, .. }));
    }
}

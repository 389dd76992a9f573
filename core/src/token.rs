//! Token type produced by every analyzer.

use serde::{Deserialize, Serialize};

/// A surface span and its reading.
///
/// `reading == None` means the surface is its own reading. Fields are private
/// so a token cannot change after construction; build a new one instead.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    surface: String,
    #[serde(default)]
    reading: Option<String>,
}

impl Token {
    /// Token with an explicit reading.
    pub fn new<S: Into<String>, R: Into<String>>(surface: S, reading: R) -> Self {
        Token {
            surface: surface.into(),
            reading: Some(reading.into()),
        }
    }

    /// Plain-text token: the reading is set explicitly to the surface.
    pub fn plain<S: Into<String>>(text: S) -> Self {
        let surface = text.into();
        Token {
            reading: Some(surface.clone()),
            surface,
        }
    }

    /// Token without a reading.
    pub fn bare<S: Into<String>>(surface: S) -> Self {
        Token {
            surface: surface.into(),
            reading: None,
        }
    }

    pub fn surface(&self) -> &str {
        &self.surface
    }

    pub fn reading(&self) -> Option<&str> {
        self.reading.as_deref()
    }

    /// True when the token carries a present, non-empty reading.
    pub fn has_reading(&self) -> bool {
        self.reading.as_deref().is_some_and(|r| !r.is_empty())
    }

    /// Reading to report: the reading if non-empty, otherwise the surface.
    pub fn yomi(&self) -> &str {
        match self.reading.as_deref() {
            Some(r) if !r.is_empty() => r,
            _ => &self.surface,
        }
    }

    /// Same surface, different reading.
    pub fn with_reading<R: Into<String>>(&self, reading: R) -> Self {
        Token::new(self.surface.clone(), reading)
    }
}

/// Concatenate the surfaces of a token sequence.
pub fn surface_text(tokens: &[Token]) -> String {
    tokens.iter().map(Token::surface).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_token_reads_as_itself() {
        let t = Token::plain("いい天気");
        assert_eq!(t.surface(), "いい天気");
        assert_eq!(t.reading(), Some("いい天気"));
        assert!(t.has_reading());
    }

    #[test]
    fn yomi_falls_back_to_surface() {
        assert_eq!(Token::bare("東京").yomi(), "東京");
        assert_eq!(Token::new("東京", "").yomi(), "東京");
        assert_eq!(Token::new("東京", "とうきょう").yomi(), "とうきょう");
        assert!(!Token::new("東京", "").has_reading());
    }

    #[test]
    fn with_reading_keeps_surface() {
        let t = Token::new("橋", "はし").with_reading("ばし");
        assert_eq!(t, Token::new("橋", "ばし"));
    }

    #[test]
    fn surface_text_concatenates_in_order() {
        let tokens = vec![Token::plain("今日"), Token::new("は", "わ"), Token::bare("晴れ")];
        assert_eq!(surface_text(&tokens), "今日は晴れ");
    }

    #[test]
    fn deserializes_missing_reading_as_none() {
        let t: Token = serde_json::from_str(r#"{"surface":"猫"}"#).unwrap();
        assert_eq!(t, Token::bare("猫"));
    }
}

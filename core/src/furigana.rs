// core/src/furigana.rs
//
// Furigana notation: literal text with inline `{surface/reading}` spans.
// This is the format both external taggers speak.
//
// - `parse` turns notation into tokens
// - `render` turns tokens back into notation
// - `strip` drops the annotations and keeps the surfaces

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Result, YomiError};
use crate::token::{surface_text, Token};

/// `{surface/reading}`: surface has no `/`, reading has no `}`.
static ANNOTATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^/]+)/([^}]+)\}").expect("annotation pattern compiles"));

/// Characters of context kept in a `MalformedNotation` error.
const FRAGMENT_CHARS: usize = 16;

/// Parse furigana notation into a token sequence.
///
/// Plain runs between annotations become tokens whose reading equals their
/// surface (not an absent reading). Adjacent annotations produce no empty
/// token in between, and empty input produces no tokens at all.
///
/// An opening brace that does not start a well-formed annotation is an
/// error rather than literal text, since dropping or keeping it silently
/// would hide a broken producer.
///
/// # Example
/// ```
/// use yomi_core::{furigana, Token};
///
/// let tokens = furigana::parse("今日{は/わ}いい天気").unwrap();
/// assert_eq!(
///     tokens,
///     vec![Token::plain("今日"), Token::new("は", "わ"), Token::plain("いい天気")]
/// );
/// ```
pub fn parse(text: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for caps in ANNOTATION.captures_iter(text) {
        let (Some(whole), Some(surface), Some(reading)) = (caps.get(0), caps.get(1), caps.get(2))
        else {
            continue;
        };

        push_plain(text, cursor, whole.start(), &mut tokens)?;
        tokens.push(Token::new(surface.as_str(), reading.as_str()));
        cursor = whole.end();
    }

    push_plain(text, cursor, text.len(), &mut tokens)?;
    Ok(tokens)
}

fn push_plain(text: &str, start: usize, end: usize, tokens: &mut Vec<Token>) -> Result<()> {
    if start >= end {
        return Ok(());
    }

    let run = &text[start..end];
    if let Some(pos) = run.find('{') {
        return Err(YomiError::MalformedNotation {
            offset: start + pos,
            fragment: run[pos..].chars().take(FRAGMENT_CHARS).collect(),
        });
    }

    tokens.push(Token::plain(run));
    Ok(())
}

/// Render tokens as furigana notation.
///
/// Tokens whose reading is absent, empty or identical to the surface are
/// written as plain text.
pub fn render(tokens: &[Token]) -> String {
    let mut out = String::new();
    for t in tokens {
        match t.reading() {
            Some(r) if !r.is_empty() && r != t.surface() => {
                out.push('{');
                out.push_str(t.surface());
                out.push('/');
                out.push_str(r);
                out.push('}');
            }
            _ => out.push_str(t.surface()),
        }
    }
    out
}

/// Text with all annotations replaced by their surfaces.
pub fn strip(text: &str) -> Result<String> {
    Ok(surface_text(&parse(text)?))
}

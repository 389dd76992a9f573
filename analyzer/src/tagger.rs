// analyzer/src/tagger.rs
//
// Seams to the external taggers. Implementations only move text in and out;
// none of them do linguistic work themselves.

use yomi_core::{Result, Token};

/// A tagger that answers in furigana notation (`{surface/reading}` spans).
///
/// Returning `YomiError::UnsupportedInput` means "this sentence cannot be
/// processed", which callers treat as an expected per-sentence outcome.
pub trait FuriganaTagger: Send + Sync {
    /// Short name used in logs and errors (e.g. "dictionary", "context").
    fn name(&self) -> &str;

    /// Annotate `text` in furigana notation.
    fn furigana(&self, text: &str) -> Result<String>;
}

/// A tokenizer that answers with surface/reading pairs directly.
pub trait TokenTagger: Send + Sync {
    fn name(&self) -> &str;

    fn tokenize(&self, text: &str) -> Result<Vec<Token>>;
}

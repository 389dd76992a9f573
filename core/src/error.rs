// core/src/error.rs
//
// Error taxonomy for annotation and analysis.
//
// `UnsupportedInput` is an expected per-sentence condition; everything else
// points at a broken tagger, a broken notation producer, or the environment.

use thiserror::Error;

pub type Result<T, E = YomiError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum YomiError {
    /// An external tagger reported that it cannot process the sentence.
    #[error("tagger '{tagger}' cannot process input: {message}")]
    UnsupportedInput { tagger: String, message: String },

    /// Furigana notation violates the `{surface/reading}` grammar.
    #[error("malformed furigana notation at byte {offset}: {fragment:?}")]
    MalformedNotation { offset: usize, fragment: String },

    /// Transport or protocol failure while talking to a tagger.
    #[error("tagger '{tagger}' failed: {message}")]
    Tagger { tagger: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl YomiError {
    pub fn unsupported<T: Into<String>, M: Into<String>>(tagger: T, message: M) -> Self {
        YomiError::UnsupportedInput {
            tagger: tagger.into(),
            message: message.into(),
        }
    }

    pub fn tagger<T: Into<String>, M: Into<String>>(tagger: T, message: M) -> Self {
        YomiError::Tagger {
            tagger: tagger.into(),
            message: message.into(),
        }
    }

    /// True for the "tagger cannot process this sentence" case.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, YomiError::UnsupportedInput { .. })
    }
}

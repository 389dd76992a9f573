//! yomi-core
//!
//! Reading annotation primitives shared by the analyzer crate and the
//! benchmark tools.
//!
//! Public API:
//! - `Token` - Surface span with an optional reading
//! - `furigana` - Parse/render `{surface/reading}` notation
//! - `OverrideTable` - Surface → reading lookup built from a token sequence
//! - `kana` - Katakana → hiragana normalization
//! - `reconcile` - Merge dictionary segmentation with contextual readings
//! - `batch` - Exercise/solution records exchanged as JSON
//! - `Config` - Configuration shared by every analyzer backend
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Result, YomiError};

pub mod token;
pub use token::{surface_text, Token};

pub mod furigana;

pub mod overrides;
pub use overrides::{extract_overrides, OverrideTable};

pub mod kana;
pub use kana::katakana_to_hiragana;

pub mod reconcile;
pub use reconcile::{apply_overrides, reconcile};

pub mod batch;
pub use batch::{Exercise, Segment, Solution, TokenRecord};

/// Generic configuration for analysis.
///
/// Only backend-agnostic fields live here. Tagger selection and transport
/// settings belong in `AnalyzerConfig` in the analyzer crate, which flattens
/// this struct.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Map katakana to hiragana before handing text to the taggers.
    pub normalize_katakana: bool,

    /// Write batch output with 2-space indentation instead of a single line.
    pub pretty_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            normalize_katakana: true,
            pretty_output: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let content = self.to_toml_string()?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| YomiError::Config(e.to_string()))
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| YomiError::Config(e.to_string()))
    }
}

//! Analyzer configuration that extends the base `Config` from core.
//!
//! This configuration includes:
//! - All generic options from `yomi_core::Config` (flattened via serde)
//! - The backend kind (reconciling two furigana taggers, or pass-through tokens)
//! - Transport settings for each external tagger
//!
//! # Example
//!
//! ```rust
//! use yomi_analyzer::{AnalyzerConfig, Backend};
//!
//! let config = AnalyzerConfig::from_toml_str(r#"
//! backend = "reconcile"
//!
//! [dictionary]
//! kind = "command"
//! program = "dict-tagger"
//!
//! [context]
//! kind = "http"
//! url = "http://127.0.0.1:8000/furigana"
//! "#).unwrap();
//! assert_eq!(config.backend, Backend::Reconcile);
//! assert!(config.base.normalize_katakana);
//! ```
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use yomi_core::{Config, Result, YomiError};

use crate::analyzer::{Analyzer, PassThroughAnalyzer, ReconcilingAnalyzer};
use crate::command::CommandTagger;
use crate::http::{HttpTagger, DEFAULT_TIMEOUT_MS};
use crate::tagger::{FuriganaTagger, TokenTagger};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Dictionary tagger + contextual tagger, merged.
    #[default]
    Reconcile,
    /// A single tokenizer that reports readings itself.
    Tokens,
}

/// How to reach one external tagger.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TaggerSpec {
    Command {
        program: String,
        #[serde(default)]
        args: Vec<String>,
    },
    Http {
        url: String,
        #[serde(default = "default_timeout_ms")]
        timeout_ms: u64,
    },
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl TaggerSpec {
    pub fn furigana_tagger(&self, name: &str) -> Result<Arc<dyn FuriganaTagger>> {
        let tagger: Arc<dyn FuriganaTagger> = match self {
            TaggerSpec::Command { program, args } => {
                Arc::new(CommandTagger::new(name, program.as_str()).args(args.iter().cloned()))
            }
            TaggerSpec::Http { url, timeout_ms } => {
                Arc::new(HttpTagger::new(name, url.as_str(), *timeout_ms)?)
            }
        };
        Ok(tagger)
    }

    pub fn token_tagger(&self, name: &str) -> Result<Arc<dyn TokenTagger>> {
        let tagger: Arc<dyn TokenTagger> = match self {
            TaggerSpec::Command { program, args } => {
                Arc::new(CommandTagger::new(name, program.as_str()).args(args.iter().cloned()))
            }
            TaggerSpec::Http { url, timeout_ms } => {
                Arc::new(HttpTagger::new(name, url.as_str(), *timeout_ms)?)
            }
        };
        Ok(tagger)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AnalyzerConfig {
    /// Base configuration fields (katakana folding, output format)
    #[serde(flatten)]
    pub base: Config,

    #[serde(default)]
    pub backend: Backend,

    /// Dictionary tagger (segmentation authority) for the reconcile backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<TaggerSpec>,

    /// Contextual tagger (reading authority) for the reconcile backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<TaggerSpec>,

    /// Tokenizer for the tokens backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokenizer: Option<TaggerSpec>,
}

impl AnalyzerConfig {
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| YomiError::Config(e.to_string()))
    }

    /// Get a reference to the base config
    pub fn base(&self) -> &Config {
        &self.base
    }

    /// Construct the configured analyzer. Tagger handles are created here,
    /// once, and shared by every sentence the analyzer sees.
    pub fn build_analyzer(&self) -> Result<Box<dyn Analyzer>> {
        match self.backend {
            Backend::Reconcile => {
                let dictionary = required(&self.dictionary, "dictionary")?.furigana_tagger("dictionary")?;
                let context = required(&self.context, "context")?.furigana_tagger("context")?;
                Ok(Box::new(
                    ReconcilingAnalyzer::new(dictionary, context).with_config(&self.base),
                ))
            }
            Backend::Tokens => {
                let tokenizer = required(&self.tokenizer, "tokenizer")?.token_tagger("tokenizer")?;
                Ok(Box::new(PassThroughAnalyzer::new(tokenizer)))
            }
        }
    }
}

fn required<'a>(spec: &'a Option<TaggerSpec>, section: &str) -> Result<&'a TaggerSpec> {
    spec.as_ref().ok_or_else(|| {
        YomiError::Config(format!("missing [{}] tagger section", section))
    })
}

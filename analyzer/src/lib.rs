//! # yomi-analyzer
//!
//! Reading analyzers built on yomi-core: the external-tagger seams and their
//! subprocess/HTTP transports, the reconciling and pass-through analyzers,
//! and the batch runner behind the `yomi` binary.

pub mod analyzer;
pub mod batch;
pub mod command;
pub mod config;
pub mod http;
pub mod tagger;

// Re-export the core types analyzers hand out
pub use yomi_core::{Config, Exercise, Result, Solution, Token, YomiError};

pub use analyzer::{Analyzer, PassThroughAnalyzer, ReconcilingAnalyzer};
pub use batch::{analyze_exercises, run_file};
pub use command::CommandTagger;
pub use config::{AnalyzerConfig, Backend, TaggerSpec};
pub use http::HttpTagger;
pub use tagger::{FuriganaTagger, TokenTagger};

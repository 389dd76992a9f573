use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use yomi_analyzer::{run_file, AnalyzerConfig};
use yomi_core::{furigana, katakana_to_hiragana, reconcile};

#[derive(Parser)]
#[command(name = "yomi")]
#[command(about = "Japanese reading annotation: dictionary segmentation with contextual readings")]
#[command(version)]
struct Cli {
    /// Log progress (-v) or tagger traffic (-vv) to stderr
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a JSON file of exercises and write one solution per exercise
    Run {
        /// Input exercises (JSON array of {"segments": [...]})
        input: PathBuf,
        /// Output solutions (JSON array of {"tokens": [...]})
        output: PathBuf,
        /// Analyzer configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Analyze one sentence and print surface/reading pairs
    Analyze {
        sentence: String,
        /// Analyzer configuration (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Merge two furigana strings and print the result as notation
    Reconcile {
        /// Notation from the dictionary tagger
        dictionary: String,
        /// Notation from the contextual tagger
        context: String,
    },
    /// Fold katakana to hiragana
    Normalize { text: String },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<AnalyzerConfig> {
    match path {
        Some(p) => AnalyzerConfig::load_toml(p)
            .with_context(|| format!("failed to load config {}", p.display())),
        None => Ok(AnalyzerConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run { input, output, config } => {
            let cfg = load_config(config.as_deref())?;
            let analyzer = cfg
                .build_analyzer()
                .context("cannot build analyzer (pass --config with tagger sections)")?;
            let count = run_file(analyzer.as_ref(), &input, &output, cfg.base.pretty_output)
                .with_context(|| format!("batch {} -> {} failed", input.display(), output.display()))?;
            eprintln!("Wrote {} solutions to {}", count, output.display());
        }
        Commands::Analyze { sentence, config } => {
            let cfg = load_config(config.as_deref())?;
            let analyzer = cfg
                .build_analyzer()
                .context("cannot build analyzer (pass --config with tagger sections)")?;
            let tokens = analyzer.analyze(&sentence);
            if tokens.is_empty() {
                println!("(no tokens)");
            }
            for t in &tokens {
                println!("{}\t{}", t.surface(), t.yomi());
            }
        }
        Commands::Reconcile { dictionary, context } => {
            let tokens = reconcile(&dictionary, &context).context("cannot reconcile notation")?;
            println!("{}", furigana::render(&tokens));
        }
        Commands::Normalize { text } => {
            println!("{}", katakana_to_hiragana(&text));
        }
    }

    Ok(())
}

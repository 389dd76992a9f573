mod grade;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use yomi_core::batch::{read_exercises, read_solutions, write_json};

use grade::{GradableBuilder, GradeRegistry};

/// Grade analyzer outputs against the expected readings in an exercise file.
#[derive(Parser)]
#[command(name = "grade")]
struct Args {
    /// Exercise file with expected `yomi` and `tags` on graded segments
    #[arg(long)]
    exercises: PathBuf,

    /// Analyzer output to grade, as NAME=PATH (repeatable)
    #[arg(long = "result", value_name = "NAME=PATH", value_parser = parse_result, required = true)]
    results: Vec<(String, PathBuf)>,

    /// Where to write the per-tag report
    #[arg(long, default_value = "benchmark-results.json")]
    out: PathBuf,

    /// Log per-analyzer progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_result(s: &str) -> Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((name, path)) if !name.is_empty() && !path.is_empty() => {
            Ok((name.to_string(), PathBuf::from(path)))
        }
        _ => Err(format!("expected NAME=PATH, got '{}'", s)),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::INFO } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let exercises = read_exercises(&args.exercises)
        .with_context(|| format!("failed to read exercises {}", args.exercises.display()))?;

    let mut builder = GradableBuilder::new();
    for (name, path) in &args.results {
        let solutions = read_solutions(path)
            .with_context(|| format!("failed to read {} output {}", name, path.display()))?;
        info!(analyzer = %name, solutions = solutions.len(), "ingesting");
        builder.ingest(name, &exercises, &solutions);
    }

    let mut registry = GradeRegistry::new();
    registry.grade(builder.gradables());
    let report = registry.to_series();

    write_json(&args.out, &report, true)
        .with_context(|| format!("failed to write report {}", args.out.display()))?;
    println!(
        "Graded {} segments into {} tags; wrote {}",
        builder.gradables().len(),
        report.len(),
        args.out.display()
    );
    Ok(())
}

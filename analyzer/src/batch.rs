//! Batch processing of exercise files.

use std::path::Path;

use tracing::info;
use yomi_core::batch::{read_exercises, write_json};
use yomi_core::{Exercise, Result, Solution};

use crate::analyzer::Analyzer;

/// Analyze every exercise in order, one solution per exercise.
///
/// A sentence that cannot be analyzed gets an empty token list; the rest of
/// the batch carries on.
pub fn analyze_exercises(analyzer: &dyn Analyzer, exercises: &[Exercise]) -> Vec<Solution> {
    exercises
        .iter()
        .map(|exercise| {
            let sentence = exercise.sentence();
            Solution::from_tokens(&analyzer.analyze(&sentence))
        })
        .collect()
}

/// Read exercises from `input`, analyze them and write solutions to `output`.
///
/// Returns the number of exercises processed. File and JSON errors abort the
/// whole run.
pub fn run_file<P: AsRef<Path>, Q: AsRef<Path>>(
    analyzer: &dyn Analyzer,
    input: P,
    output: Q,
    pretty: bool,
) -> Result<usize> {
    let exercises = read_exercises(&input)?;
    info!(
        analyzer = analyzer.name(),
        count = exercises.len(),
        input = %input.as_ref().display(),
        "analyzing exercises"
    );

    let solutions = analyze_exercises(analyzer, &exercises);
    let empty = solutions.iter().filter(|s| s.tokens.is_empty()).count();
    if empty > 0 {
        info!(empty, "sentences without tokens");
    }

    write_json(&output, &solutions, pretty)?;
    info!(output = %output.as_ref().display(), "solutions written");
    Ok(solutions.len())
}

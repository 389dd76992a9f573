// tools/src/grade.rs
//
// Benchmark grading: line analyzer tokens up with the exercise segments that
// carry an expected reading, compare readings, and tally pass rates per tag
// and analyzer.
//
// Alignment is by character offset. Every character of the analyzer output
// remembers which token it came from; a segment covering characters
// [offset, offset + len) is matched to the distinct tokens in that window.

use serde::Serialize;
use tracing::warn;
use yomi_core::kana::reading_key;
use yomi_core::{Exercise, Segment, Solution, TokenRecord};

/// One graded segment: what the exercise expects and what an analyzer said.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradable {
    pub analyzer: String,
    pub text: String,
    pub tags: Vec<String>,
    pub yomi_expected: String,
    pub yomi_actual: String,
}

/// Pair every segment with the solution tokens that overlap it.
pub fn align_segments<'a>(
    exercise: &'a Exercise,
    solution: &'a Solution,
) -> Vec<(&'a Segment, Vec<&'a TokenRecord>)> {
    let owners: Vec<usize> = solution
        .tokens
        .iter()
        .enumerate()
        .flat_map(|(i, t)| std::iter::repeat(i).take(t.text.chars().count()))
        .collect();

    let mut offset = 0;
    exercise
        .segments
        .iter()
        .map(|segment| {
            let len = segment.text().chars().count();
            let start = offset.min(owners.len());
            let end = (offset + len).min(owners.len());
            offset += len;

            let mut matched: Vec<usize> = Vec::new();
            for &i in &owners[start..end] {
                if !matched.contains(&i) {
                    matched.push(i);
                }
            }
            (segment, matched.into_iter().map(|i| &solution.tokens[i]).collect())
        })
        .collect()
}

/// Collects gradable segments across analyzers.
#[derive(Debug, Default)]
pub struct GradableBuilder {
    gradables: Vec<Gradable>,
}

impl GradableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the gradable segments of one analyzer's output.
    ///
    /// `solutions[i]` answers `exercises[i]`; a missing answer counts as an
    /// empty token list.
    pub fn ingest(&mut self, analyzer: &str, exercises: &[Exercise], solutions: &[Solution]) {
        if solutions.len() != exercises.len() {
            warn!(
                analyzer,
                exercises = exercises.len(),
                solutions = solutions.len(),
                "solution count does not match exercise count"
            );
        }

        let empty = Solution::default();
        for (i, exercise) in exercises.iter().enumerate() {
            let solution = solutions.get(i).unwrap_or(&empty);
            for (segment, tokens) in align_segments(exercise, solution) {
                let Some(expected) = segment.expected_yomi() else {
                    continue;
                };
                self.gradables.push(Gradable {
                    analyzer: analyzer.to_string(),
                    text: segment.text().to_string(),
                    tags: segment.tags().to_vec(),
                    yomi_expected: expected.to_string(),
                    yomi_actual: tokens.iter().map(|t| t.yomi.as_str()).collect(),
                });
            }
        }
    }

    pub fn gradables(&self) -> &[Gradable] {
        &self.gradables
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct GradeResult {
    tag: String,
    analyzer: String,
    is_correct: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassRate {
    pub pass: u32,
    pub total: u32,
}

impl PassRate {
    /// Whole-number percentage, halves rounded up.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (f64::from(self.pass) / f64::from(self.total) * 100.0).round() as u32
    }
}

/// One chart series: a tag, with one point per analyzer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub data: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Point {
    pub x: String,
    pub y: u32,
}

/// Tallies correctness per (tag, analyzer).
#[derive(Debug, Default)]
pub struct GradeRegistry {
    results: Vec<GradeResult>,
}

impl GradeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Readings are compared after NFC and katakana folding, so ガッコウ
    /// and がっこう count as the same answer.
    pub fn grade(&mut self, gradables: &[Gradable]) {
        for g in gradables {
            let is_correct = reading_key(&g.yomi_expected) == reading_key(&g.yomi_actual);
            for tag in &g.tags {
                self.results.push(GradeResult {
                    tag: tag.clone(),
                    analyzer: g.analyzer.clone(),
                    is_correct,
                });
            }
        }
    }

    /// Pass rates grouped by tag, then analyzer, both in first-seen order.
    pub fn pass_rates(&self) -> Vec<(String, Vec<(String, PassRate)>)> {
        let mut registry: Vec<(String, Vec<(String, PassRate)>)> = Vec::new();

        for r in &self.results {
            let tag_idx = match registry.iter().position(|(tag, _)| *tag == r.tag) {
                Some(i) => i,
                None => {
                    registry.push((r.tag.clone(), Vec::new()));
                    registry.len() - 1
                }
            };
            let analyzers = &mut registry[tag_idx].1;
            let an_idx = match analyzers.iter().position(|(name, _)| *name == r.analyzer) {
                Some(i) => i,
                None => {
                    analyzers.push((r.analyzer.clone(), PassRate::default()));
                    analyzers.len() - 1
                }
            };

            let stats = &mut analyzers[an_idx].1;
            stats.total += 1;
            if r.is_correct {
                stats.pass += 1;
            }
        }

        registry
    }

    /// Chart-ready report: `[{"name": tag, "data": [{"x": analyzer, "y": percent}]}]`.
    pub fn to_series(&self) -> Vec<Series> {
        self.pass_rates()
            .into_iter()
            .map(|(name, analyzers)| Series {
                name,
                data: analyzers
                    .into_iter()
                    .map(|(x, stats)| Point { x, y: stats.percent() })
                    .collect(),
            })
            .collect()
    }
}

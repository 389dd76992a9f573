//! Batch records exchanged as JSON.
//!
//! Input is a list of exercises, each a list of segments. A segment is either
//! a bare string or an object with a `text` field (and optionally the
//! expected `yomi` plus `tags`, used only for grading). Output is one
//! `Solution` per exercise, in the same order.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::Result;
use crate::token::Token;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    Text(String),
    Annotated(AnnotatedSegment),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedSegment {
    #[serde(default)]
    pub text: String,
    /// Expected reading of this segment, if it is graded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yomi: Option<String>,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
}

/// `"tags": null` reads as no tags.
fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Text(text) => text,
            Segment::Annotated(seg) => &seg.text,
        }
    }

    /// Expected reading; an empty reading means the segment is not graded.
    pub fn expected_yomi(&self) -> Option<&str> {
        match self {
            Segment::Text(_) => None,
            Segment::Annotated(seg) => seg.yomi.as_deref().filter(|y| !y.is_empty()),
        }
    }

    pub fn tags(&self) -> &[String] {
        match self {
            Segment::Text(_) => &[],
            Segment::Annotated(seg) => &seg.tags,
        }
    }
}

/// One input sentence, split into segments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub segments: Vec<Segment>,
}

impl Exercise {
    /// Concatenate segment texts in order. Segment boundaries are not kept.
    pub fn sentence(&self) -> String {
        self.segments.iter().map(Segment::text).collect()
    }
}

/// Output entry for one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub text: String,
    pub yomi: String,
}

impl From<&Token> for TokenRecord {
    fn from(t: &Token) -> Self {
        TokenRecord {
            text: t.surface().to_string(),
            yomi: t.yomi().to_string(),
        }
    }
}

/// Analyzer output for one exercise.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    pub tokens: Vec<TokenRecord>,
}

impl Solution {
    pub fn from_tokens(tokens: &[Token]) -> Self {
        Solution {
            tokens: tokens.iter().map(TokenRecord::from).collect(),
        }
    }
}

/// Read a JSON document from a file.
pub fn read_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Write a JSON document to a file. Non-ASCII text is written verbatim.
pub fn write_json<T: Serialize, P: AsRef<Path>>(path: P, value: &T, pretty: bool) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    if pretty {
        serde_json::to_writer_pretty(&mut writer, value)?;
    } else {
        serde_json::to_writer(&mut writer, value)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_exercises<P: AsRef<Path>>(path: P) -> Result<Vec<Exercise>> {
    read_json(path)
}

pub fn read_solutions<P: AsRef<Path>>(path: P) -> Result<Vec<Solution>> {
    read_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_segments_concatenate() {
        let ex: Exercise =
            serde_json::from_str(r#"{"segments": ["こんにちは、", {"text": "元気"}, "？"]}"#).unwrap();
        assert_eq!(ex.sentence(), "こんにちは、元気？");
    }

    #[test]
    fn annotated_segment_fields() {
        let ex: Exercise = serde_json::from_str(
            r#"{"segments": [{"text": "橋", "yomi": "はし", "tags": ["rendaku"]}, "を"]}"#,
        )
        .unwrap();
        assert_eq!(ex.segments[0].expected_yomi(), Some("はし"));
        assert_eq!(ex.segments[0].tags(), ["rendaku".to_string()]);
        assert_eq!(ex.segments[1].expected_yomi(), None);
        assert!(ex.segments[1].tags().is_empty());
    }

    #[test]
    fn null_tags_read_as_empty() {
        let ex: Exercise =
            serde_json::from_str(r#"{"segments":[{"text":"橋","yomi":"はし","tags":null}]}"#).unwrap();
        assert_eq!(ex.segments[0].expected_yomi(), Some("はし"));
        assert!(ex.segments[0].tags().is_empty());
    }

    #[test]
    fn empty_yomi_is_not_expected() {
        let ex: Exercise =
            serde_json::from_str(r#"{"segments":[{"text":"橋","yomi":"","tags":["noun"]}]}"#).unwrap();
        assert_eq!(ex.segments[0].expected_yomi(), None);
    }

    #[test]
    fn object_without_text_counts_as_empty() {
        let ex: Exercise = serde_json::from_str(r#"{"segments": ["a", {"yomi": "x"}, "b"]}"#).unwrap();
        assert_eq!(ex.sentence(), "ab");
    }

    #[test]
    fn extra_exercise_fields_are_ignored() {
        let ex: Exercise =
            serde_json::from_str(r#"{"id": 7, "segments": ["猫"], "note": "x"}"#).unwrap();
        assert_eq!(ex.sentence(), "猫");
    }

    #[test]
    fn solution_uses_surface_when_reading_missing() {
        let sol = Solution::from_tokens(&[Token::new("橋", "ばし"), Token::bare("！"), Token::new("を", "")]);
        let json = serde_json::to_string(&sol).unwrap();
        assert_eq!(
            json,
            r#"{"tokens":[{"text":"橋","yomi":"ばし"},{"text":"！","yomi":"！"},{"text":"を","yomi":"を"}]}"#
        );
    }

    #[test]
    fn write_then_read_file() {
        let path = std::env::temp_dir().join(format!("yomi_core_batch_{}.json", std::process::id()));
        let out = vec![Solution::from_tokens(&[Token::plain("猫")]), Solution::default()];
        write_json(&path, &out, true).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let back = read_solutions(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert!(raw.contains("\"猫\""));
        assert!(raw.contains("\n  {"));
        assert_eq!(back, out);
    }
}

//! Subprocess transport for external taggers.
//!
//! The tagger is any program that reads one sentence on stdin and prints its
//! answer on stdout:
//! - furigana taggers print notation (trailing newlines are dropped)
//! - token taggers print a JSON array of `{"surface": .., "reading": ..}`
//!
//! A non-zero exit status is the program's way of saying it cannot process
//! the sentence; stderr becomes the error message.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;
use yomi_core::{Result, Token, YomiError};

use crate::tagger::{FuriganaTagger, TokenTagger};

/// Runs an external program once per sentence.
#[derive(Debug, Clone)]
pub struct CommandTagger {
    name: String,
    program: String,
    args: Vec<String>,
}

impl CommandTagger {
    pub fn new<N: Into<String>, P: Into<String>>(name: N, program: P) -> Self {
        Self {
            name: name.into(),
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append an argument passed to every invocation.
    pub fn arg<A: Into<String>>(mut self, arg: A) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the program with `text` on stdin and return its stdout.
    fn run(&self, text: &str) -> Result<String> {
        debug!(tagger = %self.name, program = %self.program, "spawning tagger");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        // Feed stdin from a separate thread so a chatty child cannot block
        // on a full stdout pipe while we are still writing.
        let stdin = child.stdin.take();
        let input = text.to_owned();
        let writer = thread::spawn(move || -> std::io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(input.as_bytes())?;
            }
            Ok(())
        });

        let output = child.wait_with_output()?;
        let written = writer
            .join()
            .map_err(|_| YomiError::tagger(&self.name, "stdin writer thread panicked"))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(YomiError::unsupported(&self.name, message));
        }
        written?;

        String::from_utf8(output.stdout)
            .map_err(|e| YomiError::tagger(&self.name, format!("output is not UTF-8: {}", e)))
    }
}

impl FuriganaTagger for CommandTagger {
    fn name(&self) -> &str {
        &self.name
    }

    fn furigana(&self, text: &str) -> Result<String> {
        let out = self.run(text)?;
        Ok(out.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl TokenTagger for CommandTagger {
    fn name(&self) -> &str {
        &self.name
    }

    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let out = self.run(text)?;
        Ok(serde_json::from_str(&out)?)
    }
}

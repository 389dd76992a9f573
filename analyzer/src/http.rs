//! HTTP transport for taggers served by a model server.
//!
//! Request: `POST <url>` with JSON body `{"text": "..."}`.
//!
//! Responses:
//! - furigana taggers: `{"furigana": "..."}`
//! - token taggers: `{"tokens": [{"surface": "...", "reading": "..."}, ...]}`
//!
//! `422 Unprocessable Entity` means the server cannot handle the sentence.
//!
//! Uses the `reqwest` blocking client; the client is built once and reused
//! for every sentence.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use yomi_core::{Result, Token, YomiError};

use crate::tagger::{FuriganaTagger, TokenTagger};

/// Default request timeout for remote taggers.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Serialize)]
struct TagRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct FuriganaResponse {
    furigana: String,
}

#[derive(Deserialize)]
struct TokensResponse {
    tokens: Vec<Token>,
}

pub struct HttpTagger {
    name: String,
    url: String,
    timeout_ms: u64,
    client: reqwest::blocking::Client,
}

impl HttpTagger {
    pub fn new<N: Into<String>, U: Into<String>>(name: N, url: U, timeout_ms: u64) -> Result<Self> {
        let name = name.into();
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| YomiError::tagger(&name, format!("cannot build HTTP client: {}", e)))?;

        Ok(Self {
            name,
            url: url.into(),
            timeout_ms,
            client,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    fn post<T: DeserializeOwned>(&self, text: &str) -> Result<T> {
        let response = self
            .client
            .post(&self.url)
            .json(&TagRequest { text })
            .send()
            .map_err(|e| YomiError::tagger(&self.name, e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let body = response.text().unwrap_or_default();
            return Err(YomiError::unsupported(&self.name, body.trim()));
        }
        if !status.is_success() {
            return Err(YomiError::tagger(&self.name, format!("HTTP {}", status)));
        }

        response
            .json::<T>()
            .map_err(|e| YomiError::tagger(&self.name, format!("invalid response: {}", e)))
    }
}

impl FuriganaTagger for HttpTagger {
    fn name(&self) -> &str {
        &self.name
    }

    fn furigana(&self, text: &str) -> Result<String> {
        Ok(self.post::<FuriganaResponse>(text)?.furigana)
    }
}

impl TokenTagger for HttpTagger {
    fn name(&self) -> &str {
        &self.name
    }

    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        Ok(self.post::<TokensResponse>(text)?.tokens)
    }
}

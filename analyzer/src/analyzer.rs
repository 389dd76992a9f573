// analyzer/src/analyzer.rs
//
// Analyzer adapters: turn a sentence into tokens using injected taggers.
//
// `analyze` never fails. A sentence that cannot be processed yields an empty
// token list so one bad sentence never stops a batch. The typed error is
// still available through `try_analyze`.

use std::sync::Arc;

use tracing::{debug, warn};
use yomi_core::{katakana_to_hiragana, reconcile, Config, Result, Token, YomiError};

use crate::tagger::{FuriganaTagger, TokenTagger};

/// Anything that can annotate a sentence with readings.
pub trait Analyzer: Send + Sync {
    fn name(&self) -> &str;

    /// Tokens for `sentence`, or an empty list when it cannot be analyzed.
    fn analyze(&self, sentence: &str) -> Vec<Token>;
}

/// Log a per-sentence failure at a level matching how surprising it is.
fn log_failure(analyzer: &str, sentence: &str, err: &YomiError) {
    match err {
        YomiError::UnsupportedInput { .. } => {
            debug!(analyzer, sentence, error = %err, "sentence skipped");
        }
        YomiError::MalformedNotation { .. } => {
            warn!(analyzer, sentence, error = %err, "tagger produced malformed notation");
        }
        _ => {
            warn!(analyzer, sentence, error = %err, "analysis failed");
        }
    }
}

/// Dictionary segmentation with contextual readings.
///
/// The sentence is katakana-folded (unless disabled), sent to the dictionary
/// tagger and then to the contextual tagger, and the two annotations are
/// merged with [`yomi_core::reconcile`].
pub struct ReconcilingAnalyzer {
    name: String,
    dictionary: Arc<dyn FuriganaTagger>,
    context: Arc<dyn FuriganaTagger>,
    normalize_katakana: bool,
}

impl ReconcilingAnalyzer {
    pub fn new(dictionary: Arc<dyn FuriganaTagger>, context: Arc<dyn FuriganaTagger>) -> Self {
        Self {
            name: "reconcile".to_string(),
            dictionary,
            context,
            normalize_katakana: true,
        }
    }

    pub fn with_name<N: Into<String>>(mut self, name: N) -> Self {
        self.name = name.into();
        self
    }

    /// Apply the backend-agnostic settings from `config`.
    pub fn with_config(mut self, config: &Config) -> Self {
        self.normalize_katakana = config.normalize_katakana;
        self
    }

    pub fn set_normalize_katakana(&mut self, enabled: bool) {
        self.normalize_katakana = enabled;
    }

    pub fn normalizes_katakana(&self) -> bool {
        self.normalize_katakana
    }

    /// Analyze and report failures instead of swallowing them.
    pub fn try_analyze(&self, sentence: &str) -> Result<Vec<Token>> {
        if sentence.is_empty() {
            return Ok(Vec::new());
        }

        let text = if self.normalize_katakana {
            katakana_to_hiragana(sentence)
        } else {
            sentence.to_string()
        };

        let dict_furigana = self.dictionary.furigana(&text)?;
        let context_furigana = self.context.furigana(&text)?;
        debug!(dictionary = %dict_furigana, context = %context_furigana, "tagger output");

        reconcile(&dict_furigana, &context_furigana)
    }
}

impl Analyzer for ReconcilingAnalyzer {
    fn name(&self) -> &str {
        &self.name
    }

    fn analyze(&self, sentence: &str) -> Vec<Token> {
        self.try_analyze(sentence).unwrap_or_else(|e| {
            log_failure(&self.name, sentence, &e);
            Vec::new()
        })
    }
}

/// Tokens straight from a tokenizer that already reports readings.
pub struct PassThroughAnalyzer {
    tagger: Arc<dyn TokenTagger>,
}

impl PassThroughAnalyzer {
    pub fn new(tagger: Arc<dyn TokenTagger>) -> Self {
        Self { tagger }
    }

    pub fn try_analyze(&self, sentence: &str) -> Result<Vec<Token>> {
        if sentence.is_empty() {
            return Ok(Vec::new());
        }
        let mut tokens = self.tagger.tokenize(sentence)?;
        tokens.retain(|t| !t.surface().is_empty());
        Ok(tokens)
    }
}

impl Analyzer for PassThroughAnalyzer {
    fn name(&self) -> &str {
        self.tagger.name()
    }

    fn analyze(&self, sentence: &str) -> Vec<Token> {
        self.try_analyze(sentence).unwrap_or_else(|e| {
            log_failure(self.tagger.name(), sentence, &e);
            Vec::new()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Answers from a fixed table and remembers what it was asked.
    struct TableTagger {
        name: &'static str,
        answers: HashMap<&'static str, &'static str>,
        seen: Mutex<Vec<String>>,
    }

    impl TableTagger {
        fn new(name: &'static str, answers: &[(&'static str, &'static str)]) -> Arc<Self> {
            Arc::new(Self {
                name,
                answers: answers.iter().copied().collect(),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    impl FuriganaTagger for TableTagger {
        fn name(&self) -> &str {
            self.name
        }

        fn furigana(&self, text: &str) -> Result<String> {
            self.seen.lock().unwrap().push(text.to_string());
            self.answers
                .get(text)
                .map(|s| s.to_string())
                .ok_or_else(|| YomiError::unsupported(self.name, "not in table"))
        }
    }

    #[test]
    fn merges_both_taggers() {
        let dict = TableTagger::new("dictionary", &[("橋を渡る", "{橋/はし}を{渡/わた}る")]);
        let ctx = TableTagger::new("context", &[("橋を渡る", "{橋/ばし}を渡る")]);
        let analyzer = ReconcilingAnalyzer::new(dict, ctx);

        let tokens = analyzer.analyze("橋を渡る");
        assert_eq!(
            tokens,
            vec![
                Token::new("橋", "ばし"),
                Token::new("を", "を"),
                Token::new("渡", "わた"),
                Token::new("る", "る"),
            ]
        );
    }

    #[test]
    fn taggers_see_folded_katakana() {
        let dict = TableTagger::new("dictionary", &[("すしを食べる", "すしを{食/た}べる")]);
        let ctx = TableTagger::new("context", &[("すしを食べる", "すしを{食/た}べる")]);
        let analyzer = ReconcilingAnalyzer::new(dict.clone(), ctx.clone());

        let tokens = analyzer.analyze("スシを食べる");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0], Token::plain("すしを"));
        assert_eq!(dict.seen.lock().unwrap().as_slice(), ["すしを食べる".to_string()]);
        assert_eq!(ctx.seen.lock().unwrap().as_slice(), ["すしを食べる".to_string()]);
    }

    #[test]
    fn folding_can_be_disabled() {
        let dict = TableTagger::new("dictionary", &[("スシ", "スシ")]);
        let ctx = TableTagger::new("context", &[("スシ", "スシ")]);
        let cfg = Config {
            normalize_katakana: false,
            ..Config::default()
        };
        let analyzer = ReconcilingAnalyzer::new(dict, ctx).with_config(&cfg);
        assert!(!analyzer.normalizes_katakana());
        assert_eq!(analyzer.analyze("スシ"), vec![Token::plain("スシ")]);
    }

    #[test]
    fn unsupported_input_gives_empty_result() {
        let dict = TableTagger::new("dictionary", &[("猫", "{猫/ねこ}")]);
        let ctx = TableTagger::new("context", &[]);
        let analyzer = ReconcilingAnalyzer::new(dict, ctx);

        assert!(analyzer.analyze("猫").is_empty());
        assert!(analyzer.try_analyze("猫").unwrap_err().is_unsupported());
    }

    #[test]
    fn context_is_not_called_when_dictionary_fails() {
        let dict = TableTagger::new("dictionary", &[]);
        let ctx = TableTagger::new("context", &[("！", "！")]);
        let analyzer = ReconcilingAnalyzer::new(dict, ctx.clone());

        assert!(analyzer.analyze("！").is_empty());
        assert!(ctx.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn malformed_notation_is_reported_distinctly() {
        let dict = TableTagger::new("dictionary", &[("橋", "{橋/はし")]);
        let ctx = TableTagger::new("context", &[("橋", "{橋/ばし}")]);
        let analyzer = ReconcilingAnalyzer::new(dict, ctx);

        assert!(analyzer.analyze("橋").is_empty());
        assert!(matches!(
            analyzer.try_analyze("橋"),
            Err(YomiError::MalformedNotation { .. })
        ));
    }

    #[test]
    fn empty_sentence_skips_taggers() {
        let dict = TableTagger::new("dictionary", &[]);
        let ctx = TableTagger::new("context", &[]);
        let analyzer = ReconcilingAnalyzer::new(dict.clone(), ctx);
        assert!(analyzer.try_analyze("").unwrap().is_empty());
        assert!(dict.seen.lock().unwrap().is_empty());
    }

    struct FixedTokens(Vec<Token>);

    impl TokenTagger for FixedTokens {
        fn name(&self) -> &str {
            "fixed"
        }

        fn tokenize(&self, _text: &str) -> Result<Vec<Token>> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn pass_through_keeps_tokens() {
        let tagger = Arc::new(FixedTokens(vec![
            Token::new("猫", "ねこ"),
            Token::bare(""),
            Token::bare("！"),
        ]));
        let analyzer = PassThroughAnalyzer::new(tagger);
        assert_eq!(analyzer.name(), "fixed");
        assert_eq!(
            analyzer.analyze("猫！"),
            vec![Token::new("猫", "ねこ"), Token::bare("！")]
        );
    }
}

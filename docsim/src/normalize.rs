//! Text normalization into comparable token streams.
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use hashbrown::HashSet;

use crate::config::NormalizerConfig;
use crate::stopwords;

/// Splits lowercased text into tokens.
pub trait Tokenizer: Send + Sync {
    /// Returns the tokens of `text` in their original order.
    fn tokenize<'t>(&self, text: &'t str) -> Vec<&'t str>;

    /// Gets a short name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Keeps whitespace-delimited words made only of alphanumeric characters.
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicTokenizer;

impl Tokenizer for BasicTokenizer {
    fn tokenize<'t>(&self, text: &'t str) -> Vec<&'t str> {
        alphanumeric_words(text).collect()
    }

    fn name(&self) -> &'static str {
        "basic"
    }
}

/// [`BasicTokenizer`] followed by stopword removal.
#[derive(Clone, Debug)]
pub struct RichTokenizer {
    stopwords: HashSet<String>,
}

impl RichTokenizer {
    /// Creates an instance from a stopword set. Stopwords are matched case-insensitively.
    pub fn new<I, S>(stopwords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            stopwords: stopwords
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Creates an instance with the built-in English stopwords.
    pub fn english() -> Self {
        Self::new(stopwords::ENGLISH)
    }

    /// Loads stopwords from a file with one word per line.
    pub fn from_file<P>(path: P) -> io::Result<Self>
    where
        P: AsRef<Path>,
    {
        let text = fs::read_to_string(path)?;
        Ok(Self::new(text.lines()))
    }

    /// Checks if `word` is a stopword.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Gets the number of stopwords.
    pub fn num_stopwords(&self) -> usize {
        self.stopwords.len()
    }
}

impl Tokenizer for RichTokenizer {
    fn tokenize<'t>(&self, text: &'t str) -> Vec<&'t str> {
        alphanumeric_words(text)
            .filter(|w| !self.is_stopword(w))
            .collect()
    }

    fn name(&self) -> &'static str {
        "rich"
    }
}

fn alphanumeric_words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .filter(|w| w.chars().all(char::is_alphanumeric))
}

/// Normalized form of a text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NormalizedText {
    tokens: Vec<String>,
}

impl NormalizedText {
    /// Gets the tokens.
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Checks if no token survived normalization.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Joins the tokens with single spaces.
    pub fn to_text(&self) -> String {
        self.tokens.join(" ")
    }

    /// Gets the characters of [`Self::to_text()`].
    pub fn chars(&self) -> Vec<char> {
        let mut chars = vec![];
        for (i, token) in self.tokens.iter().enumerate() {
            if i != 0 {
                chars.push(' ');
            }
            chars.extend(token.chars());
        }
        chars
    }
}

/// Lowercases text and tokenizes it with a [`Tokenizer`].
///
/// The tokenizer is fixed when the normalizer is built, so normalization
/// itself never fails.
#[derive(Clone)]
pub struct Normalizer {
    tokenizer: Arc<dyn Tokenizer>,
}

impl Normalizer {
    /// Creates an instance.
    pub fn new<T>(tokenizer: T) -> Self
    where
        T: Tokenizer + 'static,
    {
        Self {
            tokenizer: Arc::new(tokenizer),
        }
    }

    /// Creates an instance without stopword removal.
    pub fn basic() -> Self {
        Self::new(BasicTokenizer)
    }

    /// Creates an instance from options.
    ///
    /// If the configured stopword file cannot be read, the basic tokenizer is
    /// used instead.
    pub fn from_config(config: &NormalizerConfig) -> Self {
        if !config.use_stopwords {
            return Self::basic();
        }
        if let Some(words) = &config.stopword_set {
            return Self::new(RichTokenizer::new(words));
        }
        match &config.stopword_file {
            None => Self::new(RichTokenizer::english()),
            Some(path) => match RichTokenizer::from_file(path) {
                Ok(tokenizer) => {
                    tracing::debug!(
                        path = %path.display(),
                        num_stopwords = tokenizer.num_stopwords(),
                        "loaded stopwords"
                    );
                    Self::new(tokenizer)
                }
                Err(e) => {
                    tracing::debug!(
                        path = %path.display(),
                        error = %e,
                        "stopwords unavailable, falling back to basic tokenizer"
                    );
                    Self::basic()
                }
            },
        }
    }

    /// Normalizes `text`.
    pub fn normalize(&self, text: &str) -> NormalizedText {
        let lowered = text.to_lowercase();
        let tokens = self
            .tokenizer
            .tokenize(&lowered)
            .into_iter()
            .map(str::to_string)
            .collect();
        NormalizedText { tokens }
    }

    /// Gets the name of the tokenizer in use.
    pub fn tokenizer_name(&self) -> &'static str {
        self.tokenizer.name()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::from_config(&NormalizerConfig::default())
    }
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("tokenizer", &self.tokenizer.name())
            .finish()
    }
}

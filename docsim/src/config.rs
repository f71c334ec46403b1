//! Engine configuration.
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{DocsimError, Result};

/// Unit of the sequences handed to the matcher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// Characters of the normalized text, tokens joined by single spaces.
    #[default]
    Char,
    /// Normalized tokens.
    Token,
}

impl FromStr for Granularity {
    type Err = &'static str;
    fn from_str(g: &str) -> Result<Self, Self::Err> {
        match g {
            "char" => Ok(Self::Char),
            "token" => Ok(Self::Token),
            _ => Err("Could not parse a granularity option"),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Char => f.write_str("char"),
            Self::Token => f.write_str("token"),
        }
    }
}

/// Options of the text normalizer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NormalizerConfig {
    /// Drops stopwords after the alphanumeric filter.
    pub use_stopwords: bool,
    /// Explicit stopword set, replacing the built-in English one.
    pub stopword_set: Option<Vec<String>>,
    /// File with one stopword per line, used when `stopword_set` is absent.
    /// If it cannot be read, the basic tokenizer is used instead.
    pub stopword_file: Option<PathBuf>,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            use_stopwords: true,
            stopword_set: None,
            stopword_file: None,
        }
    }
}

/// Options of the comparison engine.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Unit of the matched sequences.
    pub granularity: Granularity,
    /// Evaluates batch pairs on the rayon thread pool.
    pub parallel: bool,
    /// Keeps the full list of matching blocks in each result.
    pub keep_blocks: bool,
    /// Normalizer options.
    pub normalizer: NormalizerConfig,
}

impl EngineConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| DocsimError::Config(e.to_string()))
    }

    /// Reads a TOML file.
    pub fn from_path<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| DocsimError::io(path, e))?;
        toml::from_str(&text).map_err(|e| DocsimError::Config(format!("{}: {e}", path.display())))
    }

    /// Reads a TOML file, falling back to the defaults if it does not exist.
    pub fn load_or_default<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        match fs::metadata(path) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no configuration file, using defaults");
                Ok(Self::default())
            }
            _ => Self::from_path(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.granularity, Granularity::Char);
        assert!(config.normalizer.use_stopwords);
        assert!(!config.parallel);
    }

    #[test]
    fn test_full() {
        let config = EngineConfig::from_toml_str(
            r#"
            granularity = "token"
            parallel = true
            keep_blocks = true

            [normalizer]
            use_stopwords = true
            stopword_set = ["foo", "bar"]
            stopword_file = "stop.txt"
            "#,
        )
        .unwrap();
        assert_eq!(config.granularity, Granularity::Token);
        assert!(config.parallel);
        assert!(config.keep_blocks);
        assert_eq!(
            config.normalizer.stopword_set,
            Some(vec!["foo".to_string(), "bar".to_string()])
        );
        assert_eq!(
            config.normalizer.stopword_file,
            Some(PathBuf::from("stop.txt"))
        );
    }

    #[test]
    fn test_unknown_key() {
        let result = EngineConfig::from_toml_str("granularity = \"word\"");
        assert!(matches!(result, Err(DocsimError::Config(_))));
        let result = EngineConfig::from_toml_str("paralel = true");
        assert!(matches!(result, Err(DocsimError::Config(_))));
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert_eq!(
            EngineConfig::load_or_default(&missing).unwrap(),
            EngineConfig::default()
        );

        let path = dir.path().join("docsim.toml");
        fs::write(&path, "granularity = \"token\"\n").unwrap();
        assert_eq!(
            EngineConfig::load_or_default(&path).unwrap().granularity,
            Granularity::Token
        );
    }

    #[test]
    fn test_granularity_from_str() {
        assert_eq!("char".parse::<Granularity>(), Ok(Granularity::Char));
        assert_eq!("token".parse::<Granularity>(), Ok(Granularity::Token));
        assert!("word".parse::<Granularity>().is_err());
        assert_eq!(Granularity::Token.to_string(), "token");
    }
}

//! Search options, settable in code or loaded from TOML.
//!
//! ```
//! use craft::SearchOptions;
//!
//! let options = SearchOptions::from_toml_str(r#"
//!     max_passes = 250
//!     fixed = [0, 3]
//!     initial = [1, 0, 2, 3]
//! "#).unwrap();
//!
//! assert_eq!(options.max_passes, 250);
//! assert_eq!(options.fixed, vec![0, 3]);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pass ceiling used when none is given.
pub const DEFAULT_MAX_PASSES: usize = 10_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchOptions {
    /// Upper bound on the number of passes.
    pub max_passes: usize,

    /// Entities whose location never changes.
    pub fixed: Vec<usize>,

    /// Starting permutation; identity when absent.
    pub initial: Option<Vec<usize>>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            fixed: Vec::new(),
            initial: None,
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    pub fn with_fixed(mut self, fixed: impl IntoIterator<Item = usize>) -> Self {
        self.fixed = fixed.into_iter().collect();
        self
    }

    pub fn with_initial(mut self, initial: Vec<usize>) -> Self {
        self.initial = Some(initial);
        self
    }

    /// Loads options from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses options from a TOML string. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let options = SearchOptions::from_toml_str("").unwrap();
        assert_eq!(options, SearchOptions::default());
        assert_eq!(options.max_passes, DEFAULT_MAX_PASSES);
        assert!(options.fixed.is_empty());
        assert!(options.initial.is_none());
    }

    #[test]
    fn partial_toml() {
        let options = SearchOptions::from_toml_str("fixed = [2]").unwrap();
        assert_eq!(options.fixed, vec![2]);
        assert_eq!(options.max_passes, DEFAULT_MAX_PASSES);
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = SearchOptions::from_toml_str("max_pases = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn missing_file() {
        let err = SearchOptions::from_toml_file("/nonexistent/craft.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn builder() {
        let options = SearchOptions::new()
            .with_max_passes(5)
            .with_fixed([1, 1, 4])
            .with_initial(vec![1, 0]);
        assert_eq!(options.max_passes, 5);
        assert_eq!(options.fixed, vec![1, 1, 4]);
        assert_eq!(options.initial, Some(vec![1, 0]));
    }
}

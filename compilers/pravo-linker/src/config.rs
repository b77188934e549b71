//! Engine tuning knobs.
//!
//! Defaults match the behaviour the citation linker was calibrated on; a
//! JSON file may override any subset of them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ResourceError, Result};

/// Non-punctuation tokens inspected after a citation when looking for the law.
pub const DEFAULT_LOOKAHEAD: usize = 12;

/// Hard cap on lookahead window tokens, quoted titles included.
pub const DEFAULT_WINDOW_CAP: usize = 800;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub lookahead: usize,
    pub window_cap: usize,
    /// Let citations fall back to aliases stripped of `российский`,
    /// `федерация` and similar qualifiers.
    pub compact_matching: bool,
    /// Cap on phrase length below the longest alias in the index.
    pub max_alias_words: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookahead: DEFAULT_LOOKAHEAD,
            window_cap: DEFAULT_WINDOW_CAP,
            compact_matching: true,
            max_alias_words: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ResourceError::json("config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ResourceError::io(path, e))?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        if self.lookahead == 0 {
            return Err(ResourceError::InvalidConfig("lookahead must be positive".into()));
        }
        if self.window_cap < self.lookahead {
            return Err(ResourceError::InvalidConfig(format!(
                "window_cap ({}) is smaller than lookahead ({})",
                self.window_cap, self.lookahead
            )));
        }
        if self.max_alias_words == Some(0) {
            return Err(ResourceError::InvalidConfig("max_alias_words must be positive".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{"lookahead": 20}"#).unwrap();
        assert_eq!(config.lookahead, 20);
        assert_eq!(config.window_cap, DEFAULT_WINDOW_CAP);
        assert!(config.compact_matching);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            EngineConfig::from_json(r#"{"lookahead": 0}"#),
            Err(ResourceError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"max_alias_words": 0}"#),
            Err(ResourceError::InvalidConfig(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"lookahed": 3}"#),
            Err(ResourceError::Json { .. })
        ));
    }
}

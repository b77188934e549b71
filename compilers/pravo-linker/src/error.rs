//! Errors surfaced while loading resources.
//!
//! Resolution itself never fails; only building an [`Engine`](crate::Engine)
//! can.

use std::path::PathBuf;

use pravo_morph::MorphError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResourceError {
    /// Resource file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Resource is not valid JSON or does not have the expected shape
    #[error("malformed JSON in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// Morphological lexicon is structurally invalid
    #[error("invalid lexicon: {0}")]
    Lexicon(#[from] MorphError),

    /// Alias text is blank or holds no words
    #[error("alias {0:?} contains no words")]
    EmptyAlias(String),

    /// Alias maps to an empty identifier list
    #[error("alias {0:?} maps to no identifiers")]
    EmptyIdentifiers(String),

    /// Alias maps to a blank identifier string
    #[error("alias {0:?} maps to a blank identifier")]
    BlankIdentifier(String),

    #[error("alias dictionary is empty")]
    EmptyDictionary,

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl ResourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ResourceError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(origin: impl Into<String>, source: serde_json::Error) -> Self {
        ResourceError::Json {
            origin: origin.into(),
            source,
        }
    }
}

/// Result type alias for resource loading
pub type Result<T> = std::result::Result<T, ResourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResourceError::EmptyIdentifiers("ГК РФ".to_string());
        assert_eq!(err.to_string(), "alias \"ГК РФ\" maps to no identifiers");

        let err = ResourceError::io(
            "missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.to_string().starts_with("failed to read missing.json"));
    }
}

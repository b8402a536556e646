//! Error types for the solchat core.
//!
//! Uses `thiserror` for the public error enums. Note that malformed user
//! input is never an error at the `parse` boundary: [`ParseError`] exists only
//! to explain *why* a line did not resolve to a command.

use std::path::PathBuf;

use crate::grammar::ArgKind;

/// Top-level error type for the solchat core library.
#[derive(Debug, thiserror::Error)]
pub enum SolchatError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] toml::ser::Error),
}

/// Errors from the configuration system.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },
}

/// Why a line of chat input did not resolve to a slash command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Input is not a slash command")]
    NotACommand,

    #[error("Missing command name after '/'")]
    EmptyTrigger,

    #[error("Unknown command '/{trigger}'{}", did_you_mean(.suggestion))]
    UnknownTrigger {
        trigger: String,
        suggestion: Option<String>,
    },

    #[error("/{trigger}: missing {kind} argument <{name}>")]
    MissingArgument {
        trigger: String,
        name: String,
        kind: ArgKind,
    },

    #[error("/{trigger}: invalid {kind} for <{name}>: {reason}")]
    InvalidArgument {
        trigger: String,
        name: String,
        kind: ArgKind,
        reason: ArgumentError,
    },

    #[error("/{trigger}: unexpected argument '{token}'")]
    UnexpectedArgument { trigger: String, token: String },
}

/// A single argument token failing its format rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    #[error("expected {expected} characters, got {actual}")]
    WrongLength { expected: String, actual: usize },

    #[error("character '{ch}' at position {position} is not in the base58 alphabet")]
    InvalidCharacter { ch: char, position: usize },

    #[error("value is empty")]
    Empty,
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(trigger) => format!(" (did you mean /{trigger}?)"),
        None => String::new(),
    }
}

/// A type alias for results using the top-level `SolchatError`.
pub type Result<T> = std::result::Result<T, SolchatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_config() {
        let err = SolchatError::Config(ConfigError::FileNotFound {
            path: PathBuf::from("/tmp/missing.toml"),
        });
        assert_eq!(
            err.to_string(),
            "Configuration error: Configuration file not found: /tmp/missing.toml"
        );
    }

    #[test]
    fn test_unknown_trigger_with_suggestion() {
        let err = ParseError::UnknownTrigger {
            trigger: "walet".into(),
            suggestion: Some("wallet".into()),
        };
        assert_eq!(
            err.to_string(),
            "Unknown command '/walet' (did you mean /wallet?)"
        );
    }

    #[test]
    fn test_unknown_trigger_without_suggestion() {
        let err = ParseError::UnknownTrigger {
            trigger: "zzz".into(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "Unknown command '/zzz'");
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = ParseError::InvalidArgument {
            trigger: "tx".into(),
            name: "signature".into(),
            kind: ArgKind::Signature,
            reason: ArgumentError::WrongLength {
                expected: "64".into(),
                actual: 5,
            },
        };
        assert_eq!(
            err.to_string(),
            "/tx: invalid signature for <signature>: expected 64 characters, got 5"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: SolchatError = io.into();
        assert!(matches!(err, SolchatError::Io(_)));
    }
}

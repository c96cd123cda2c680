//! Error types
//!
//! Configuration problems are typed so callers can tell them apart; the
//! binary reports everything through `anyhow`.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a field range token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeIssue {
    #[error("not a number or number range")]
    NotANumber,
    #[error("lower bound exceeds upper bound")]
    Reversed,
    #[error("fields are numbered from 1")]
    Zero,
}

/// A field range token that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid field range '{token}': {reason}")]
pub struct InvalidRange {
    /// The token as written on the command line
    pub token: String,
    pub reason: RangeIssue,
}

impl InvalidRange {
    pub(crate) fn new(token: &str, reason: RangeIssue) -> Self {
        Self {
            token: token.to_string(),
            reason,
        }
    }
}

/// Invalid or conflicting command-line options
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    InvalidRange(#[from] InvalidRange),

    #[error("no splitting mode given: use one of --delimiter, --extract, --csv or --tsv")]
    NoMode,

    #[error("only one of --delimiter, --extract, --csv or --tsv may be given (got {})", .0.join(", "))]
    ConflictingModes(Vec<&'static str>),

    #[error("invalid regex pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("the input delimiter must not be empty")]
    EmptyDelimiter,

    #[error("unknown input encoding '{0}'")]
    UnknownEncoding(String),
}

/// Failures while acquiring input
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot open '{}'", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl From<InputError> for io::Error {
    fn from(err: InputError) -> Self {
        let kind = match &err {
            InputError::Open { source, .. } => source.kind(),
        };
        io::Error::new(kind, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_message_names_token() {
        let err = InvalidRange::new("5-2", RangeIssue::Reversed);
        assert_eq!(
            err.to_string(),
            "invalid field range '5-2': lower bound exceeds upper bound"
        );
    }

    #[test]
    fn test_conflicting_modes_lists_flags() {
        let err = ConfigError::ConflictingModes(vec!["--csv", "--tsv"]);
        assert!(err.to_string().ends_with("(got --csv, --tsv)"));
    }

    #[test]
    fn test_open_error_keeps_kind() {
        let err: io::Error = InputError::Open {
            path: PathBuf::from("missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        }
        .into();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert_eq!(err.to_string(), "cannot open 'missing.txt'");
    }
}

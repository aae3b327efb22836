//! Error types for absplit.
//!
//! All construction failures are strongly typed using thiserror so callers
//! can match on the exact misconfiguration. None of them are transient:
//! they point at the call site or the registry, never at the runtime.

use thiserror::Error;

/// Remediation hint appended to unknown-split errors in development.
pub const SCHEMA_RESYNC_HINT: &str = "You may need to re-sync the local split schema";

/// Errors raised while constructing a [`crate::SplitVariantResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbError {
    /// A required option key was never supplied.
    #[error("Required option '{option}' is missing")]
    MissingOption {
        /// Name of the missing option.
        option: String,
    },

    /// Option keys this component does not understand were supplied.
    #[error("unknown options: {}", .options.join(", "))]
    UnrecognizedOption {
        /// Offending keys, ascending.
        options: Vec<String>,
    },

    /// The split is not present in the supplied registry.
    #[error("unknown split: {split_name}.{}", hint_suffix(.hint))]
    UnknownSplit {
        /// Split that failed the lookup.
        split_name: String,
        /// Remediation hint, only set in development-like environments.
        hint: Option<String>,
    },

    /// A raw option value had the wrong shape.
    #[error("Invalid value for option '{option}': {reason}")]
    InvalidOption {
        /// Name of the option.
        option: String,
        /// What was wrong with it.
        reason: String,
    },
}

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_ref().map(|h| format!(" {h}")).unwrap_or_default()
}

/// Result alias used throughout the crate.
pub type AbResult<T> = Result<T, AbError>;

impl AbError {
    /// Creates a missing-option error.
    #[must_use]
    pub fn missing(option: impl Into<String>) -> Self {
        Self::MissingOption {
            option: option.into(),
        }
    }

    /// Creates an invalid-option error.
    #[must_use]
    pub fn invalid(option: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option: option.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if this is a missing-option error.
    #[must_use]
    pub const fn is_missing_option(&self) -> bool {
        matches!(self, Self::MissingOption { .. })
    }

    /// Returns true if this is an unrecognized-option error.
    #[must_use]
    pub const fn is_unrecognized_option(&self) -> bool {
        matches!(self, Self::UnrecognizedOption { .. })
    }

    /// Returns true if this is an unknown-split error.
    #[must_use]
    pub const fn is_unknown_split(&self) -> bool {
        matches!(self, Self::UnknownSplit { .. })
    }

    /// Returns true if this is an invalid-option error.
    #[must_use]
    pub const fn is_invalid_option(&self) -> bool {
        matches!(self, Self::InvalidOption { .. })
    }

    /// Returns true if this error is retryable.
    ///
    /// Always false: every variant is a programmer or configuration error.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_option_message() {
        let err = AbError::missing("split_name");
        assert_eq!(err.to_string(), "Required option 'split_name' is missing");
        assert!(err.is_missing_option());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_unrecognized_option_lists_keys() {
        let err = AbError::UnrecognizedOption {
            options: vec!["bar".to_string(), "foo".to_string()],
        };
        assert_eq!(err.to_string(), "unknown options: bar, foo");
        assert!(err.is_unrecognized_option());
    }

    #[test]
    fn test_unknown_split_without_hint() {
        let err = AbError::UnknownSplit {
            split_name: "checkout_flow".to_string(),
            hint: None,
        };
        assert_eq!(err.to_string(), "unknown split: checkout_flow.");
        assert!(err.is_unknown_split());
    }

    #[test]
    fn test_unknown_split_with_hint() {
        let err = AbError::UnknownSplit {
            split_name: "checkout_flow".to_string(),
            hint: Some(SCHEMA_RESYNC_HINT.to_string()),
        };
        assert_eq!(
            err.to_string(),
            "unknown split: checkout_flow. You may need to re-sync the local split schema"
        );
    }

    #[test]
    fn test_invalid_option() {
        let err = AbError::invalid("split_name", "expected a string");
        assert!(err.is_invalid_option());
        assert!(err.to_string().contains("split_name"));
    }
}

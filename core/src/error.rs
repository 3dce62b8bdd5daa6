//! Error types for option registration, processing and queries.
//!
//! Every failure the registry can report is a variant of [`OptionError`].
//! Failures raised while processing arguments come from user input; the
//! rest indicate a mistake in the host program.

use thiserror::Error;

use crate::ValueKind;

/// Errors that can occur while registering, processing or querying options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    /// Token matches neither a registered setting nor a registered flag.
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    /// A recognized setting was the final token, with no value after it.
    #[error("Missing value for setting: {setting}")]
    MissingValue { setting: String },

    /// The value token cannot be parsed as the setting's kind.
    #[error("Invalid value '{value}' for setting {setting} (expected {expected})")]
    InvalidValue {
        setting: String,
        value: String,
        expected: ValueKind,
    },

    /// Queried setting name was never registered.
    #[error("The setting {0} is not registered!")]
    UnregisteredSetting(String),

    /// Queried flag name was never registered.
    #[error("The flag {0} is not registered!")]
    UnregisteredFlag(String),

    /// Typed getter requested a kind other than the registered one.
    #[error("The setting {setting} holds a {registered} value, not {requested}")]
    KindMismatch {
        setting: String,
        registered: ValueKind,
        requested: ValueKind,
    },

    /// Kind name outside the supported set.
    #[error("Unsupported setting kind: {0}")]
    UnsupportedKind(String),

    #[error("The setting {0} is already registered")]
    DuplicateSetting(String),

    #[error("The flag {0} is already registered")]
    DuplicateFlag(String),

    /// Name is already taken by the other option category.
    #[error("{0} is registered as both a setting and a flag")]
    NameCollision(String),
}

impl OptionError {
    /// Returns `true` when the error was caused by the command line itself
    /// rather than by the host program.
    ///
    /// # Examples
    ///
    /// ```
    /// use clom_core::OptionError;
    ///
    /// assert!(OptionError::UnknownOption("foo".into()).is_usage_error());
    /// assert!(!OptionError::UnregisteredFlag("--smart".into()).is_usage_error());
    /// ```
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownOption(_) | Self::MissingValue { .. } | Self::InvalidValue { .. }
        )
    }
}

/// Convenience alias for results with [`OptionError`].
pub type Result<T> = std::result::Result<T, OptionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_offending_parts() {
        let err = OptionError::InvalidValue {
            setting: "height".to_string(),
            value: "abc".to_string(),
            expected: ValueKind::Float,
        };
        assert_eq!(
            err.to_string(),
            "Invalid value 'abc' for setting height (expected float)"
        );

        let err = OptionError::KindMismatch {
            setting: "height".to_string(),
            registered: ValueKind::Float,
            requested: ValueKind::Int,
        };
        assert_eq!(
            err.to_string(),
            "The setting height holds a float value, not int"
        );
    }

    #[test]
    fn test_usage_errors_are_the_processing_failures() {
        assert!(
            OptionError::MissingValue {
                setting: "height".into()
            }
            .is_usage_error()
        );
        assert!(!OptionError::UnsupportedKind("u128".into()).is_usage_error());
        assert!(!OptionError::NameCollision("name".into()).is_usage_error());
    }
}

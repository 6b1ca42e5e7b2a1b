//! Error types for option lookup, coercion, and decoding.

use std::fmt;

/// The four shapes a UCI option value can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionType {
    Boolean,
    Integer,
    ListString,
    String,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Boolean => write!(f, "boolean"),
            OptionType::Integer => write!(f, "integer"),
            OptionType::ListString => write!(f, "list of strings"),
            OptionType::String => write!(f, "string"),
        }
    }
}

/// The requested option is not present in the section.
///
/// `available_options` is the key set of the queried [`crate::Options`] at the
/// time of the lookup, sorted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("option {option:?} not found, available options: {available_options:?}")]
pub struct OptionNotFoundError {
    pub option: String,
    pub available_options: Vec<String>,
}

/// The option is present but its value does not coerce to the requested type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expected option of type {expected}, found {actual}")]
pub struct OptionTypeMismatchError {
    pub expected: OptionType,
    pub actual: OptionType,
}

/// Error returned by the typed getters on [`crate::Options`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionError {
    #[error(transparent)]
    NotFound(#[from] OptionNotFoundError),

    #[error(transparent)]
    TypeMismatch(#[from] OptionTypeMismatchError),
}

impl OptionError {
    /// Whether the option was absent, as opposed to holding the wrong type.
    ///
    /// Callers usually treat an absent option as a null attribute.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, OptionError::NotFound(_))
    }
}

/// No interpretation of a raw JSON value succeeded.
///
/// Each field holds the reason the corresponding interpretation was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error(
    "unable to decode option value: boolean: {boolean}; integer: {integer}; \
     list of strings: {list_string}; string: {string}"
)]
pub struct DecodeError {
    pub boolean: String,
    pub integer: String,
    pub list_string: String,
    pub string: String,
}

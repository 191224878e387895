//! Error type for enum metadata operations.
//!
//! Four categories, nothing else:
//! - `InvalidArgument`: wrong input representation, or a type that is not a
//!   registered enum
//! - `Overflow`: a number outside the underlying kind's range
//! - `Format`: empty or malformed text, unknown names, bad format tokens
//! - `InvalidValue`: a value that failed validation
//!
//! Construct errors through the factory functions below; they are `#[cold]`
//! so the success paths stay tight.

use enumkit_ops::IntegralKind;

/// Result of a fallible enum operation.
pub type EnumResult<T> = Result<T, EnumError>;

/// Failure of an enum metadata operation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EnumError {
    /// The input had the wrong representation, or the type is not an enum.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A number fell outside the range of the underlying type, or of the
    /// target type of a conversion.
    #[error("value `{value}` does not fit in `{kind}` (enum `{type_name}`)")]
    Overflow {
        type_name: &'static str,
        kind: IntegralKind,
        value: String,
    },

    /// Text could not be understood.
    #[error("{message}")]
    Format { message: String },

    /// A value failed validation.
    #[error("invalid value `{value}` for enum `{type_name}` (argument `{label}`)")]
    InvalidValue {
        type_name: &'static str,
        value: String,
        label: String,
    },
}

impl EnumError {
    /// Whether this is an `Overflow` error.
    pub fn is_overflow(&self) -> bool {
        matches!(self, EnumError::Overflow { .. })
    }

    /// Whether this is a `Format` error.
    pub fn is_format(&self) -> bool {
        matches!(self, EnumError::Format { .. })
    }
}

/// A type argument that was never declared as an enum.
#[cold]
pub fn not_an_enum(type_name: &str) -> EnumError {
    EnumError::InvalidArgument {
        message: format!("type argument `{type_name}` is not a registered enum type"),
    }
}

/// A raw value that is neither one of the eight integers nor text.
#[cold]
pub fn unsupported_input(type_name: &str) -> EnumError {
    EnumError::InvalidArgument {
        message: format!("value for enum `{type_name}` must be an integer or text"),
    }
}

#[cold]
pub fn overflow(type_name: &'static str, kind: IntegralKind, value: impl ToString) -> EnumError {
    EnumError::Overflow {
        type_name,
        kind,
        value: value.to_string(),
    }
}

/// Empty or whitespace-only text.
#[cold]
pub fn empty_text(type_name: &str) -> EnumError {
    EnumError::Format {
        message: format!("text for enum `{type_name}` must not be empty or only white space"),
    }
}

/// Text that matches neither a member name nor an accepted number form.
#[cold]
pub fn unknown_value(type_name: &str, text: &str) -> EnumError {
    EnumError::Format {
        message: format!("`{text}` is not a member name or numeric value of enum `{type_name}`"),
    }
}

/// A parsed value that does not correspond to a single defined member.
#[cold]
pub fn not_a_member(type_name: &str, text: &str) -> EnumError {
    EnumError::Format {
        message: format!("`{text}` does not name a defined member of enum `{type_name}`"),
    }
}

/// A format token other than `G`, `F`, `D` or `X`.
#[cold]
pub fn invalid_format(token: &str) -> EnumError {
    EnumError::Format {
        message: format!("invalid format specifier `{token}`, expected one of G, F, D, X"),
    }
}

#[cold]
pub fn invalid_value(type_name: &'static str, value: impl ToString, label: &str) -> EnumError {
    EnumError::InvalidValue {
        type_name,
        value: value.to_string(),
        label: label.to_owned(),
    }
}

use std::borrow::Cow;

use crate::field::Field;
use crate::value::FieldKind;

/// Result type used by the by-name field accessors.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced when a record is read or written through field names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The requested name is not a property of the record.
    #[error("unknown record field '{name}'")]
    UnknownField { name: Cow<'static, str> },

    /// The value offered for a field has the wrong kind.
    #[error("cannot assign {found} value to field {field}: expected {expected}")]
    TypeMismatch {
        field: Field,
        expected: FieldKind,
        found: FieldKind,
    },
}

impl Error {
    #[must_use]
    pub fn unknown_field(name: impl Into<Cow<'static, str>>) -> Self {
        Self::UnknownField { name: name.into() }
    }

    #[must_use]
    pub const fn type_mismatch(field: Field, found: FieldKind) -> Self {
        Self::TypeMismatch {
            field,
            expected: field.kind(),
            found,
        }
    }
}

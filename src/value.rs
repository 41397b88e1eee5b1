use std::borrow::Cow;
use std::fmt;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// A single field value read from or written to a [`ValueRecord`](crate::ValueRecord).
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue<'a> {
    /// UTF-8 text.
    Str(Cow<'a, str>),
    /// 32-bit signed integer.
    Int32(i32),
    /// Point in time, compared as an instant.
    DateTime(OffsetDateTime),
    /// 32-bit floating point number.
    Float32(f32),
    /// Field holds no value.
    Missing,
}

impl FieldValue<'_> {
    #[must_use]
    pub fn into_owned(self) -> FieldValue<'static> {
        match self {
            FieldValue::Str(s) => FieldValue::Str(Cow::Owned(s.into_owned())),
            FieldValue::Int32(v) => FieldValue::Int32(v),
            FieldValue::DateTime(dt) => FieldValue::DateTime(dt),
            FieldValue::Float32(v) => FieldValue::Float32(v),
            FieldValue::Missing => FieldValue::Missing,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        match self {
            FieldValue::Str(_) => FieldKind::Str,
            FieldValue::Int32(_) => FieldKind::Int32,
            FieldValue::DateTime(_) => FieldKind::DateTime,
            FieldValue::Float32(_) => FieldKind::Float32,
            FieldValue::Missing => FieldKind::Missing,
        }
    }

    #[must_use]
    pub const fn is_missing(&self) -> bool {
        matches!(self, FieldValue::Missing)
    }
}

/// Diagnostic rendering: text in single quotes, `null` for missing values.
impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Str(s) => write!(f, "'{s}'"),
            FieldValue::Int32(v) => f.write_str(itoa::Buffer::new().format(*v)),
            FieldValue::DateTime(dt) => match dt.format(&Rfc3339) {
                Ok(rendered) => f.write_str(&rendered),
                // RFC 3339 cannot express years past 9999 or sub-minute offsets.
                Err(_) => write!(f, "{dt}"),
            },
            FieldValue::Float32(v) => f.write_str(ryu::Buffer::new().format(*v)),
            FieldValue::Missing => f.write_str("null"),
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Str(Cow::Borrowed(value))
    }
}

impl From<String> for FieldValue<'_> {
    fn from(value: String) -> Self {
        FieldValue::Str(Cow::Owned(value))
    }
}

impl From<i32> for FieldValue<'_> {
    fn from(value: i32) -> Self {
        FieldValue::Int32(value)
    }
}

impl From<OffsetDateTime> for FieldValue<'_> {
    fn from(value: OffsetDateTime) -> Self {
        FieldValue::DateTime(value)
    }
}

impl From<f32> for FieldValue<'_> {
    fn from(value: f32) -> Self {
        FieldValue::Float32(value)
    }
}

impl<'a, T> From<Option<T>> for FieldValue<'a>
where
    T: Into<FieldValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Missing, Into::into)
    }
}

/// Discriminant of a [`FieldValue`], used for type checks and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Str,
    Int32,
    DateTime,
    Float32,
    Missing,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str => write!(f, "text"),
            Self::Int32 => write!(f, "32-bit integer"),
            Self::DateTime => write!(f, "timestamp"),
            Self::Float32 => write!(f, "32-bit float"),
            Self::Missing => write!(f, "missing"),
        }
    }
}

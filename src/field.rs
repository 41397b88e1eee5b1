use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::value::FieldKind;

/// Properties of a [`ValueRecord`](crate::ValueRecord), in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Label,
    Age,
    StartDate,
    Birthday,
    Pct,
}

impl Field {
    /// Every field, in the order used for hashing and rendering.
    pub const ALL: [Self; 5] = [
        Self::Label,
        Self::Age,
        Self::StartDate,
        Self::Birthday,
        Self::Pct,
    ];

    /// Property name as seen by name-based mappers.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Age => "age",
            Self::StartDate => "startDate",
            Self::Birthday => "birthday",
            Self::Pct => "pct",
        }
    }

    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::Label | Self::Birthday => FieldKind::Str,
            Self::Age => FieldKind::Int32,
            Self::StartDate => FieldKind::DateTime,
            Self::Pct => FieldKind::Float32,
        }
    }

    /// Whether the field can hold no value. Only `age` is always set.
    #[must_use]
    pub const fn is_nullable(self) -> bool {
        !matches!(self, Self::Age)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.name() == name)
            .ok_or_else(|| Error::unknown_field(name.to_owned()))
    }
}

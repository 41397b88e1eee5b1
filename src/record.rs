use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};

use time::OffsetDateTime;

use crate::error::{Error, Result};
use crate::field::Field;
use crate::hash::{UNSET, canonical_bits, combine, float_hash, instant_hash, str_hash};
use crate::logger::log_warn;
use crate::value::FieldValue;

/// Mutable record with value semantics: five independently settable fields,
/// compared and hashed by content.
///
/// `birthday` is free text while `start_date` is an instant; the two are
/// unrelated fields.
#[derive(Debug, Clone, Default)]
pub struct ValueRecord {
    label: Option<String>,
    age: i32,
    start_date: Option<OffsetDateTime>,
    birthday: Option<String>,
    pct: Option<f32>,
}

impl ValueRecord {
    /// Creates a record with every optional field unset and `age` at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            label: None,
            age: 0,
            start_date: None,
            birthday: None,
            pct: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub const fn with_age(mut self, age: i32) -> Self {
        self.age = age;
        self
    }

    #[must_use]
    pub const fn with_start_date(mut self, start_date: OffsetDateTime) -> Self {
        self.start_date = Some(start_date);
        self
    }

    #[must_use]
    pub fn with_birthday(mut self, birthday: impl Into<String>) -> Self {
        self.birthday = Some(birthday.into());
        self
    }

    #[must_use]
    pub const fn with_pct(mut self, pct: f32) -> Self {
        self.pct = Some(pct);
        self
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    #[must_use]
    pub const fn age(&self) -> i32 {
        self.age
    }

    pub const fn set_age(&mut self, age: i32) {
        self.age = age;
    }

    #[must_use]
    pub const fn start_date(&self) -> Option<OffsetDateTime> {
        self.start_date
    }

    pub const fn set_start_date(&mut self, start_date: Option<OffsetDateTime>) {
        self.start_date = start_date;
    }

    #[must_use]
    pub fn birthday(&self) -> Option<&str> {
        self.birthday.as_deref()
    }

    pub fn set_birthday(&mut self, birthday: Option<String>) {
        self.birthday = birthday;
    }

    #[must_use]
    pub const fn pct(&self) -> Option<f32> {
        self.pct
    }

    pub const fn set_pct(&mut self, pct: Option<f32>) {
        self.pct = pct;
    }

    /// Structural equality against a possibly absent record.
    #[must_use]
    pub fn equals(&self, other: Option<&Self>) -> bool {
        other.is_some_and(|other| self == other)
    }

    /// Structural equality against an arbitrary value; anything that is not a
    /// `ValueRecord` compares unequal.
    #[must_use]
    pub fn equals_any(&self, other: &dyn Any) -> bool {
        self.equals(other.downcast_ref::<Self>())
    }

    /// Order-sensitive combination of the field hashes, unset fields
    /// counting as zero. Stable across runs and platforms.
    #[must_use]
    pub fn hash_code(&self) -> i32 {
        let mut acc = self.label.as_deref().map_or(UNSET, str_hash);
        acc = combine(acc, self.age);
        acc = combine(acc, self.start_date.as_ref().map_or(UNSET, instant_hash));
        acc = combine(acc, self.birthday.as_deref().map_or(UNSET, str_hash));
        combine(acc, self.pct.map_or(UNSET, float_hash))
    }

    /// Reads one field without copying text.
    #[must_use]
    pub fn field(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Label => self.label.as_deref().into(),
            Field::Age => FieldValue::Int32(self.age),
            Field::StartDate => self.start_date.into(),
            Field::Birthday => self.birthday.as_deref().into(),
            Field::Pct => self.pct.into(),
        }
    }

    /// Writes one field. `Missing` unsets a nullable field and resets `age`
    /// to zero.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] if the value kind does not fit the
    /// field; the record is left untouched.
    pub fn set_field(&mut self, field: Field, value: FieldValue<'_>) -> Result<()> {
        match (field, value) {
            (Field::Label, FieldValue::Str(text)) => self.label = Some(text.into_owned()),
            (Field::Label, FieldValue::Missing) => self.label = None,
            (Field::Age, FieldValue::Int32(age)) => self.age = age,
            (Field::Age, FieldValue::Missing) => {
                log_warn(&format!("field {field} cannot be unset; resetting to 0"));
                self.age = 0;
            }
            (Field::StartDate, FieldValue::DateTime(dt)) => self.start_date = Some(dt),
            (Field::StartDate, FieldValue::Missing) => self.start_date = None,
            (Field::Birthday, FieldValue::Str(text)) => self.birthday = Some(text.into_owned()),
            (Field::Birthday, FieldValue::Missing) => self.birthday = None,
            (Field::Pct, FieldValue::Float32(pct)) => self.pct = Some(pct),
            (Field::Pct, FieldValue::Missing) => self.pct = None,
            (field, other) => return Err(Error::type_mismatch(field, other.kind())),
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if `name` is not a record property.
    pub fn get_by_name(&self, name: &str) -> Result<FieldValue<'_>> {
        Ok(self.field(name.parse()?))
    }

    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] for an unknown `name` and
    /// [`Error::TypeMismatch`] when the value does not fit the field.
    pub fn set_by_name(&mut self, name: &str, value: FieldValue<'_>) -> Result<()> {
        self.set_field(name.parse()?, value)
    }

    /// Every field with its current value, in declaration order.
    #[must_use]
    pub fn fields(&self) -> impl Iterator<Item = (Field, FieldValue<'_>)> + '_ {
        Field::ALL.into_iter().map(|field| (field, self.field(field)))
    }

    /// Copies the listed fields from `source`, leaving the others as they are.
    pub fn copy_from<I>(&mut self, source: &Self, fields: I)
    where
        I: IntoIterator<Item = Field>,
    {
        for field in fields {
            match field {
                Field::Label => self.label.clone_from(&source.label),
                Field::Age => self.age = source.age,
                Field::StartDate => self.start_date = source.start_date,
                Field::Birthday => self.birthday.clone_from(&source.birthday),
                Field::Pct => self.pct = source.pct,
            }
        }
    }
}

impl PartialEq for ValueRecord {
    fn eq(&self, other: &Self) -> bool {
        self.age == other.age
            && self.label == other.label
            && self.start_date == other.start_date
            && self.birthday == other.birthday
            && self.pct.map(canonical_bits) == other.pct.map(canonical_bits)
    }
}

impl Eq for ValueRecord {}

impl Hash for ValueRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.label.hash(state);
        self.age.hash(state);
        // Instants compare across offsets, so hash the UTC position only.
        self.start_date
            .map(OffsetDateTime::unix_timestamp_nanos)
            .hash(state);
        self.birthday.hash(state);
        self.pct.map(canonical_bits).hash(state);
    }
}

impl fmt::Display for ValueRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueRecord{")?;
        for (position, (field, value)) in self.fields().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{field}={value}")?;
        }
        f.write_str("}")
    }
}

#[cfg(test)]
mod tests {
    use time::UtcOffset;

    use super::*;

    fn alpha() -> ValueRecord {
        ValueRecord::new().with_label("alpha").with_age(30)
    }

    #[test]
    fn new_record_is_empty() {
        let record = ValueRecord::new();
        assert_eq!(record.label(), None);
        assert_eq!(record.age(), 0);
        assert_eq!(record.start_date(), None);
        assert_eq!(record.birthday(), None);
        assert_eq!(record.pct(), None);
        assert_eq!(record, ValueRecord::default());
    }

    #[test]
    fn hash_code_of_empty_record_is_zero() {
        assert_eq!(ValueRecord::new().hash_code(), 0);
    }

    #[test]
    fn hash_code_combines_fields_in_order() {
        let expected = combine(combine(combine(combine(str_hash("alpha"), 30), 0), 0), 0);
        assert_eq!(alpha().hash_code(), expected);

        let swapped = ValueRecord::new().with_birthday("alpha").with_age(30);
        assert_ne!(alpha().hash_code(), swapped.hash_code());
    }

    #[test]
    fn pct_set_to_zero_differs_from_unset() {
        let zero = alpha().with_pct(0.0);
        assert_ne!(zero, alpha());
        assert_ne!(alpha().with_pct(-0.0), zero);
        assert_eq!(alpha().with_pct(f32::NAN), alpha().with_pct(f32::NAN));
    }

    #[test]
    fn start_date_compares_as_instant() {
        let utc = OffsetDateTime::from_unix_timestamp(1_000_000).unwrap();
        let shifted = utc.to_offset(UtcOffset::from_hms(2, 0, 0).unwrap());
        let a = alpha().with_start_date(utc);
        let b = alpha().with_start_date(shifted);
        assert_eq!(a, b);
        assert_eq!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn missing_age_resets_to_zero() {
        let mut record = alpha();
        record.set_field(Field::Age, FieldValue::Missing).unwrap();
        assert_eq!(record.age(), 0);
    }

    #[test]
    fn mismatched_value_leaves_record_untouched() {
        let mut record = alpha();
        let err = record
            .set_field(Field::StartDate, FieldValue::from("2015-01-01"))
            .unwrap_err();
        assert_eq!(
            err,
            Error::TypeMismatch {
                field: Field::StartDate,
                expected: crate::value::FieldKind::DateTime,
                found: crate::value::FieldKind::Str,
            }
        );
        assert_eq!(record, alpha());
    }

    #[test]
    fn copy_from_only_touches_listed_fields() {
        let source = ValueRecord::new()
            .with_label("beta")
            .with_age(41)
            .with_birthday("1984-02-29")
            .with_pct(0.25);
        let mut target = alpha();
        target.copy_from(&source, [Field::Birthday, Field::Pct]);
        assert_eq!(target.label(), Some("alpha"));
        assert_eq!(target.age(), 30);
        assert_eq!(target.birthday(), Some("1984-02-29"));
        assert_eq!(target.pct(), Some(0.25));

        target.copy_from(&ValueRecord::new(), [Field::Label]);
        assert_eq!(target.label(), None);
    }
}

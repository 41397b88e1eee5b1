pub mod error;
pub mod field;
pub mod hash;
pub mod logger;
pub mod record;
pub mod value;
pub use crate::error::{Error, Result};
pub use field::Field;
pub use record::ValueRecord;
pub use value::{FieldKind, FieldValue};

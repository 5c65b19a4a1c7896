// Validation traits

use crate::{Schema, ValidatedFields, ValidationErrors};
use std::collections::HashMap;

/// Types built from the fields of a schema-checked submission.
pub trait FromFields: Sized {
    /// Schema a raw submission must satisfy.
    fn schema() -> Schema;

    /// Build the value from fields that already passed [`Self::schema`].
    fn from_fields(fields: &ValidatedFields) -> Result<Self, ValidationErrors>;

    /// Run the schema, then build.
    fn parse(raw: &HashMap<String, String>) -> Result<Self, ValidationErrors> {
        let fields = Self::schema().safe_parse(raw)?;
        Self::from_fields(&fields)
    }
}

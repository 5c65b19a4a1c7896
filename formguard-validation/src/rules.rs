// Validation rules builder

use crate::ValidationError;
use std::sync::Arc;

type ValidatorFn<T> = Arc<dyn Fn(&T, &str) -> Result<(), ValidationError> + Send + Sync>;

/// Builder for creating validation rules
///
/// Rules run in the order they were added and every failure is reported.
pub struct ValidationRules<T: ?Sized = str> {
    validators: Vec<ValidatorFn<T>>,
    field: String,
}

impl<T: ?Sized> ValidationRules<T> {
    /// Create new validation rules for a field
    pub fn for_field(field: impl Into<String>) -> Self {
        Self {
            validators: Vec::new(),
            field: field.into(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Add a custom validator function
    #[allow(clippy::should_implement_trait)]
    pub fn add<F>(mut self, validator: F) -> Self
    where
        F: Fn(&T, &str) -> Result<(), ValidationError> + Send + Sync + 'static,
    {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Validate a value against all rules
    pub fn validate(&self, value: &T) -> Result<(), Vec<ValidationError>> {
        let errors: Vec<ValidationError> = self
            .validators
            .iter()
            .filter_map(|validator| validator(value, &self.field).err())
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl<T: ?Sized> Clone for ValidationRules<T> {
    fn clone(&self) -> Self {
        Self {
            validators: self.validators.clone(),
            field: self.field.clone(),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for ValidationRules<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationRules")
            .field("field", &self.field)
            .field("validators", &self.validators.len())
            .finish()
    }
}

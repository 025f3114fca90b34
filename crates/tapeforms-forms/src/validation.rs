//! Validation pipeline for form processing.
//!
//! 1. Field-level validation (type coercion and built-in checks per field).
//! 2. Form-level cleaners run over the cleaned data.
//!
//! Errors accumulate rather than short-circuiting, so all validation issues
//! are reported at once.

use std::collections::BTreeMap;
use std::sync::Arc;

use tapeforms_core::error::ValidationError;

use crate::data::{CleanedValue, ErrorDict, NON_FIELD_ERRORS};
use crate::fields::Field;

/// A form-level validation hook. A returned error becomes a non-field error.
pub type FormCleaner =
    Arc<dyn Fn(&BTreeMap<String, CleanedValue>) -> Result<(), ValidationError> + Send + Sync>;

/// Performs field-level validation for all fields.
///
/// `raw_values` maps field names to their submitted raw value. Each field
/// either lands in `cleaned_data` or contributes its messages to `errors`.
pub fn clean_fields(
    fields: &[Field],
    raw_values: &BTreeMap<String, Option<String>>,
    cleaned_data: &mut BTreeMap<String, CleanedValue>,
    errors: &mut ErrorDict,
) {
    for field in fields {
        let raw = raw_values.get(&field.name).and_then(Option::as_deref);

        match field.clean(raw) {
            Ok(value) => {
                cleaned_data.insert(field.name.clone(), value);
            }
            Err(field_errors) => {
                tracing::trace!(field = %field.name, count = field_errors.len(), "field failed validation");
                errors.extend(field.name.clone(), field_errors);
            }
        }
    }
}

/// Runs form-level cleaners in order, collecting their errors as non-field errors.
pub fn run_cleaners(
    cleaners: &[FormCleaner],
    cleaned_data: &BTreeMap<String, CleanedValue>,
    errors: &mut ErrorDict,
) {
    for cleaner in cleaners {
        if let Err(e) = cleaner(cleaned_data) {
            errors.add(NON_FIELD_ERRORS, e.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldKind;

    #[test]
    fn test_clean_fields_valid() {
        let fields = vec![Field::char("name"), Field::new("age", FieldKind::IntegerField)];
        let raw: BTreeMap<String, Option<String>> = [
            ("name".to_string(), Some("Alice".to_string())),
            ("age".to_string(), Some("30".to_string())),
        ]
        .into_iter()
        .collect();

        let mut cleaned = BTreeMap::new();
        let mut errors = ErrorDict::new();
        clean_fields(&fields, &raw, &mut cleaned, &mut errors);

        assert!(errors.is_empty());
        assert_eq!(cleaned.get("name"), Some(&CleanedValue::String("Alice".into())));
        assert_eq!(cleaned.get("age"), Some(&CleanedValue::Int(30)));
    }

    #[test]
    fn test_clean_fields_accumulates() {
        let fields = vec![Field::char("a"), Field::char("b")];
        let mut cleaned = BTreeMap::new();
        let mut errors = ErrorDict::new();
        clean_fields(&fields, &BTreeMap::new(), &mut cleaned, &mut errors);

        assert_eq!(errors.field_names(), ["a", "b"]);
        assert!(cleaned.is_empty());
    }

    #[test]
    fn test_run_cleaners_adds_non_field_errors() {
        let ok: FormCleaner = Arc::new(|_| Ok(()));
        let failing: FormCleaner =
            Arc::new(|_| Err(ValidationError::new("Passwords differ.", "mismatch")));

        let mut errors = ErrorDict::new();
        run_cleaners(&[ok, failing], &BTreeMap::new(), &mut errors);
        assert_eq!(errors.get(NON_FIELD_ERRORS), ["Passwords differ."]);
    }
}

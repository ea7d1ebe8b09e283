use std::fmt;

use log::debug;

use crate::catalog::{FieldId, ValueError};

use super::{FormSchema, FormValues, Widget};

pub type ValidationResult = Result<(), Vec<FormError>>;

#[derive(Debug, Clone, PartialEq)]
pub enum FormErrorType {
    MissingRequiredField,
    InvalidValue(ValueError),
    /// The value is an option, but not one under the parent's current value.
    OutsideParentGroup { parent: FieldId },
}

/// A form value that cannot be submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct FormError {
    pub key: String,
    pub label: String,
    pub error_type: FormErrorType,
}

impl FormError {
    fn new(key: &str, label: &str, error_type: FormErrorType) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            error_type,
        }
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_type {
            FormErrorType::MissingRequiredField => write!(f, "{} is required", self.label),
            FormErrorType::InvalidValue(e) => write!(f, "{}: {}", self.label, e),
            FormErrorType::OutsideParentGroup { parent } => write!(
                f,
                "{}: value does not belong to the selection in field {}",
                self.label, parent
            ),
        }
    }
}

impl std::error::Error for FormError {}

impl FormSchema {
    /// Validates submitted values against the schema.
    pub fn validate(&self, values: &FormValues) -> ValidationResult {
        let mut errors = Vec::new();

        for (form_field, field) in self.fields.iter().zip(self.catalog.iter()) {
            let value = values
                .get(&form_field.key)
                .map(|v| v.trim())
                .unwrap_or_default();

            if value.is_empty() {
                if form_field.required {
                    errors.push(FormError::new(
                        &form_field.key,
                        &form_field.label,
                        FormErrorType::MissingRequiredField,
                    ));
                }
                continue;
            }

            if let Err(e) = field.data_type.validate_value(value) {
                errors.push(FormError::new(
                    &form_field.key,
                    &form_field.label,
                    FormErrorType::InvalidValue(e),
                ));
                continue;
            }

            // Dependent selects must stay inside the parent's group
            if let (Some(parent), Widget::Select { .. }) = (form_field.depends_on, &form_field.widget) {
                let allowed = self.select_options(&form_field.key, values);
                if !allowed.iter().any(|option| option.value == value) {
                    errors.push(FormError::new(
                        &form_field.key,
                        &form_field.label,
                        FormErrorType::OutsideParentGroup { parent },
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            debug!("Form failed validation with {} errors", errors.len());
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Field, FieldDataType, ValueOption};
    use assert_matches::assert_matches;

    fn schema() -> FormSchema {
        let catalog = Catalog::new(vec![
            Field::new(1, "Title", "Title", FieldDataType::FreeText),
            Field::new(2, "Published", "Published", FieldDataType::Date),
            Field::new(
                3,
                "Group",
                "Group",
                FieldDataType::Enumerated {
                    options: vec![ValueOption::new("g1", "Print"), ValueOption::new("g2", "Web")],
                },
            ),
            Field::new(
                4,
                "Category",
                "Category",
                FieldDataType::Enumerated {
                    options: vec![
                        ValueOption::new("c1", "Poster").with_group("g1"),
                        ValueOption::new("c2", "Banner").with_group("g2"),
                    ],
                },
            )
            .depending_on(3),
        ])
        .unwrap();
        FormSchema::from_catalog(&catalog)
    }

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_validate_ok() {
        let result = schema().validate(&values(&[
            ("field_1", "Poster"),
            ("field_3", "g1"),
            ("field_4", "c1"),
        ]));
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_error_missing_required() {
        let errors = schema()
            .validate(&values(&[("field_1", "  "), ("field_3", "g1"), ("field_4", "c1")]))
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].key, "field_1");
        assert_matches!(errors[0].error_type, FormErrorType::MissingRequiredField);
        assert_eq!(errors[0].to_string(), "Title is required");
    }

    #[test]
    fn test_validate_error_invalid_date() {
        let errors = schema()
            .validate(&values(&[
                ("field_1", "Poster"),
                ("field_2", "next week"),
                ("field_3", "g1"),
                ("field_4", "c1"),
            ]))
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_matches!(
            &errors[0].error_type,
            FormErrorType::InvalidValue(ValueError::InvalidDate(value)) if value == "next week"
        );
    }

    #[test]
    fn test_validate_error_outside_parent_group() {
        let errors = schema()
            .validate(&values(&[("field_1", "Poster"), ("field_3", "g1"), ("field_4", "c2")]))
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_matches!(
            errors[0].error_type,
            FormErrorType::OutsideParentGroup { parent } if parent == FieldId::new(3)
        );
    }

    #[test]
    fn test_validate_collects_every_error() {
        let errors = schema().validate(&FormValues::new()).unwrap_err();
        let keys: Vec<&str> = errors.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["field_1", "field_3", "field_4"]);
    }
}

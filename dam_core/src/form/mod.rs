//! Dynamic forms derived from the field catalog
//!
//! Every catalog field becomes one form field keyed `field_{id}`. The data
//! type picks the widget and whether a value is required.

mod validation;

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Field, FieldDataType, FieldId, ValueOption};

pub use validation::{FormError, FormErrorType, ValidationResult};

/// Submitted form values, keyed by form field key.
pub type FormValues = BTreeMap<String, String>;

/// Input widget for a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Widget {
    TextInput,
    TextArea,
    DatePicker,
    Select { options: Vec<ValueOption> },
}

impl FieldDataType {
    /// Selects the form widget for this type.
    pub fn widget(&self) -> Widget {
        match self {
            FieldDataType::FreeText => Widget::TextInput,
            FieldDataType::Multiline => Widget::TextArea,
            FieldDataType::Date => Widget::DatePicker,
            FieldDataType::Enumerated { options } => Widget::Select {
                options: options.clone(),
            },
        }
    }

    /// Whether a form must carry a value for this type.
    pub fn is_required(&self) -> bool {
        match self {
            FieldDataType::FreeText | FieldDataType::Enumerated { .. } => true,
            FieldDataType::Multiline | FieldDataType::Date => false,
        }
    }
}

/// Builds the form key for a field.
pub fn field_key(id: FieldId) -> String {
    format!("field_{}", id)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    pub key: String,
    pub field_id: FieldId,
    pub label: String,
    pub widget: Widget,
    pub required: bool,
    pub placeholder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<FieldId>,
}

impl FormField {
    fn from_field(field: &Field) -> Self {
        let verb = match field.data_type {
            FieldDataType::Enumerated { .. } => "Select",
            _ => "Enter",
        };

        Self {
            key: field_key(field.id),
            field_id: field.id,
            label: field.display_label.clone(),
            widget: field.data_type.widget(),
            required: field.data_type.is_required(),
            placeholder: format!("{} {}", verb, field.display_label.to_lowercase()),
            depends_on: field.depends_on,
        }
    }
}

/// One entry of the `FieldsJSON` payload sent when an asset is saved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValueItem {
    pub id: FieldId,
    pub field_name: String,
    pub value: String,
}

/// The form for one catalog, in catalog order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormSchema {
    fields: Vec<FormField>,
    #[serde(skip)]
    catalog: Catalog,
}

impl FormSchema {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let fields: Vec<FormField> = catalog.iter().map(FormField::from_field).collect();
        debug!("Built form schema with {} fields", fields.len());

        Self {
            fields,
            catalog: catalog.clone(),
        }
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Every key mapped to an empty value.
    pub fn default_values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|f| (f.key.clone(), String::new()))
            .collect()
    }

    /// Options a select offers given the other values in the form.
    ///
    /// A dependent select offers only options grouped under the parent's
    /// current value, and nothing until the parent has one.
    pub fn select_options(&self, key: &str, values: &FormValues) -> Vec<ValueOption> {
        let Some(field) = self.field(key) else {
            return Vec::new();
        };
        let Widget::Select { options } = &field.widget else {
            return Vec::new();
        };

        let Some(parent) = field.depends_on else {
            return options.clone();
        };
        let parent_value = values
            .get(&field_key(parent))
            .map(|v| v.trim())
            .unwrap_or_default();
        if parent_value.is_empty() {
            return Vec::new();
        }

        options
            .iter()
            .filter(|option| option.group_key.as_deref() == Some(parent_value))
            .cloned()
            .collect()
    }

    /// Projects form values onto the save payload. Missing values are sent
    /// as empty strings.
    pub fn fields_json(&self, values: &FormValues) -> Vec<FieldValueItem> {
        self.catalog
            .iter()
            .map(|field| FieldValueItem {
                id: field.id,
                field_name: field.name.clone(),
                value: values
                    .get(&field_key(field.id))
                    .map(|v| v.trim().to_string())
                    .unwrap_or_default(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Field::new(1, "Title", "Title", FieldDataType::FreeText),
            Field::new(2, "Description", "Description", FieldDataType::Multiline),
            Field::new(3, "Published", "Published on", FieldDataType::Date),
            Field::new(
                4,
                "CategoryGroup",
                "Category group",
                FieldDataType::Enumerated {
                    options: vec![ValueOption::new("g1", "Print"), ValueOption::new("g2", "Web")],
                },
            ),
            Field::new(
                5,
                "Category",
                "Category",
                FieldDataType::Enumerated {
                    options: vec![
                        ValueOption::new("c1", "Poster").with_group("g1"),
                        ValueOption::new("c2", "Banner").with_group("g2"),
                    ],
                },
            )
            .depending_on(4),
        ])
        .unwrap()
    }

    #[test]
    fn test_widgets_and_required_flags() {
        let schema = FormSchema::from_catalog(&catalog());
        let summary: Vec<(&str, bool)> = schema
            .fields()
            .iter()
            .map(|f| {
                let widget = match f.widget {
                    Widget::TextInput => "text",
                    Widget::TextArea => "textarea",
                    Widget::DatePicker => "date",
                    Widget::Select { .. } => "select",
                };
                (widget, f.required)
            })
            .collect();

        assert_eq!(
            summary,
            vec![
                ("text", true),
                ("textarea", false),
                ("date", false),
                ("select", true),
                ("select", true),
            ]
        );
    }

    #[test]
    fn test_keys_and_placeholders() {
        let schema = FormSchema::from_catalog(&catalog());
        let title = &schema.fields()[0];
        assert_eq!(title.key, "field_1");
        assert_eq!(title.placeholder, "Enter title");
        assert_eq!(schema.field("field_4").unwrap().placeholder, "Select category group");
    }

    #[test]
    fn test_default_values_are_empty() {
        let values = FormSchema::from_catalog(&catalog()).default_values();
        assert_eq!(values.len(), 5);
        assert!(values.values().all(|v| v.is_empty()));
    }

    #[test]
    fn test_dependent_select_follows_parent() {
        let schema = FormSchema::from_catalog(&catalog());
        let mut values = schema.default_values();
        assert!(schema.select_options("field_5", &values).is_empty());

        values.insert("field_4".to_string(), "g2".to_string());
        let options = schema.select_options("field_5", &values);
        assert_eq!(options.len(), 1);
        assert_eq!(options[0].value, "c2");

        assert_eq!(schema.select_options("field_4", &values).len(), 2);
        assert!(schema.select_options("field_1", &values).is_empty());
    }

    #[test]
    fn test_fields_json_payload() {
        let schema = FormSchema::from_catalog(&catalog());
        let mut values = FormValues::new();
        values.insert("field_1".to_string(), " Summer poster ".to_string());

        let payload = schema.fields_json(&values);

        assert_eq!(payload.len(), 5);
        assert_eq!(
            serde_json::to_string(&payload[0]).unwrap(),
            r#"{"id":1,"fieldName":"Title","value":"Summer poster"}"#
        );
        assert_eq!(payload[1].value, "");
    }
}

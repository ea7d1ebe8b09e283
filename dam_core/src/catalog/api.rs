//! Conversion from the field catalog endpoint's payload

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::{Catalog, CatalogError, Field, FieldDataType, FieldId, parse_datasource};

/// Data types excluded from filtering unless configured otherwise.
pub const DEFAULT_EXCLUDED_TYPES: &[&str] = &["image"];

/// Data type descriptor as delivered by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiDataType {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    /// JSON-encoded option list for enumerated types
    #[serde(default)]
    pub datasource: Option<String>,
}

/// Field record as delivered by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiField {
    pub id: i64,
    pub field_name: String,
    pub display_name: String,
    pub data_type: ApiDataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depends_on_field_id: Option<i64>,
}

/// Options for building a catalog from server fields.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogOptions {
    /// Data type names that never appear in the catalog
    pub excluded_types: Vec<String>,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            excluded_types: DEFAULT_EXCLUDED_TYPES.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl ApiDataType {
    /// Maps the server's type name and datasource onto a [`FieldDataType`].
    ///
    /// Any type with a non-empty datasource is enumerated, whatever its name.
    pub fn to_data_type(&self) -> FieldDataType {
        let options = parse_datasource(self.datasource.as_deref());
        if !options.is_empty() {
            return FieldDataType::Enumerated { options };
        }

        match self.name.to_lowercase().as_str() {
            "multiline" => FieldDataType::Multiline,
            "date" | "datetime" => FieldDataType::Date,
            _ => FieldDataType::FreeText,
        }
    }
}

impl Catalog {
    /// Builds a catalog from server fields, dropping excluded data types.
    ///
    /// Dependencies pointing at a field that did not make it into the catalog
    /// are dropped with a warning.
    pub fn from_api_fields(
        fields: &[ApiField],
        options: &CatalogOptions,
    ) -> Result<Self, CatalogError> {
        let kept: Vec<&ApiField> = fields
            .iter()
            .filter(|field| {
                let excluded = options
                    .excluded_types
                    .iter()
                    .any(|t| t.eq_ignore_ascii_case(&field.data_type.name));
                if excluded {
                    debug!(
                        "Excluding field '{}' of type '{}'",
                        field.field_name, field.data_type.name
                    );
                }
                !excluded
            })
            .collect();

        let converted = kept
            .iter()
            .map(|api| {
                let mut field = Field::new(
                    api.id,
                    api.field_name.clone(),
                    api.display_name.clone(),
                    api.data_type.to_data_type(),
                );
                if let Some(parent) = api.depends_on_field_id {
                    if kept.iter().any(|other| other.id == parent) && field.data_type.is_enumerated() {
                        field.depends_on = Some(FieldId::new(parent));
                    } else {
                        warn!(
                            "Ignoring dependency of field '{}' on field {}",
                            api.field_name, parent
                        );
                    }
                }
                field
            })
            .collect();

        Catalog::new(converted)
    }
}

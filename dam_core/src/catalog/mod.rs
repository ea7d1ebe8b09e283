//! The field catalog: filterable, typed attributes supplied by the server
//!
//! A catalog is immutable for the duration of one editing session. Filter
//! rows and form fields refer to its entries by [`FieldId`].

mod api;
mod data_type;
mod datasource;

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

pub use api::{ApiDataType, ApiField, CatalogOptions};
pub use data_type::{DateValue, FieldDataType, ValueEditor, ValueError, ValueOption};
pub use datasource::parse_datasource;

/// Server-assigned identifier of a field. Serializes as a bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(i64);

impl FieldId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for FieldId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, typed attribute that can appear in a filter or a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: FieldId,
    /// Machine key
    pub name: String,
    pub display_label: String,
    pub data_type: FieldDataType,
    /// Field whose selected value narrows this field's options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depends_on: Option<FieldId>,
}

impl Field {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        display_label: impl Into<String>,
        data_type: FieldDataType,
    ) -> Self {
        Self {
            id: FieldId::new(id),
            name: name.into(),
            display_label: display_label.into(),
            data_type,
            depends_on: None,
        }
    }

    /// Declares that this field's options are grouped by another field's value.
    pub fn depending_on(mut self, parent: i64) -> Self {
        self.depends_on = Some(FieldId::new(parent));
        self
    }
}

/// Errors raised while assembling a catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    DuplicateField(FieldId),
    UnknownField(FieldId),
    SelfDependency(FieldId),
    /// Only enumerated fields can narrow their options by a parent.
    NotEnumerated(FieldId),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::DuplicateField(id) => {
                write!(f, "Field {} appears more than once in the catalog", id)
            }
            CatalogError::UnknownField(id) => write!(f, "Field {} is not in the catalog", id),
            CatalogError::SelfDependency(id) => write!(f, "Field {} cannot depend on itself", id),
            CatalogError::NotEnumerated(id) => write!(
                f,
                "Field {} is not enumerated and cannot depend on another field",
                id
            ),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Ordered list of fields available for one editing session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    fields: Vec<Field>,
}

impl Catalog {
    /// Creates a catalog, checking ids are unique and dependencies resolve.
    pub fn new(fields: Vec<Field>) -> Result<Self, CatalogError> {
        let catalog = Self { fields };

        for (index, field) in catalog.fields.iter().enumerate() {
            if catalog.fields[..index].iter().any(|f| f.id == field.id) {
                return Err(CatalogError::DuplicateField(field.id));
            }
        }
        for field in &catalog.fields {
            if let Some(parent) = field.depends_on {
                catalog.check_dependency(field.id, parent)?;
            }
        }

        debug!("Created catalog with {} fields", catalog.fields.len());
        Ok(catalog)
    }

    /// Declares that `child` takes its option group from `parent`.
    pub fn declare_dependency(
        &mut self,
        child: FieldId,
        parent: FieldId,
    ) -> Result<(), CatalogError> {
        self.check_dependency(child, parent)?;
        if let Some(field) = self.fields.iter_mut().find(|f| f.id == child) {
            field.depends_on = Some(parent);
        }
        Ok(())
    }

    fn check_dependency(&self, child: FieldId, parent: FieldId) -> Result<(), CatalogError> {
        let child_field = self.get(child).ok_or(CatalogError::UnknownField(child))?;
        if !self.contains(parent) {
            return Err(CatalogError::UnknownField(parent));
        }
        if child == parent {
            return Err(CatalogError::SelfDependency(child));
        }
        if !child_field.data_type.is_enumerated() {
            return Err(CatalogError::NotEnumerated(child));
        }
        Ok(())
    }

    pub fn first(&self) -> Option<&Field> {
        self.fields.first()
    }

    pub fn get(&self, id: FieldId) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Finds a field by its machine key.
    pub fn find_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name.eq_ignore_ascii_case(name))
    }

    pub fn contains(&self, id: FieldId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

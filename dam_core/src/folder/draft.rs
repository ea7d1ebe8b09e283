//! Folder create/update drafts

use std::fmt;

use serde::Serialize;

use crate::filter::{FilterQuery, Predicate};

use super::Folder;

/// Largest index the server stores for a folder.
pub const MAX_FOLDER_INDEX: i64 = i32::MAX as i64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FolderError {
    MissingName,
    IndexOutOfRange(i64),
    /// A smart folder was requested without any filter.
    SmartFolderWithoutFilters,
}

impl fmt::Display for FolderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FolderError::MissingName => write!(f, "Folder name is required"),
            FolderError::IndexOutOfRange(index) => write!(
                f,
                "Folder index {} is out of range (0 to {})",
                index, MAX_FOLDER_INDEX
            ),
            FolderError::SmartFolderWithoutFilters => {
                write!(f, "A smart folder needs at least one filter")
            }
        }
    }
}

impl std::error::Error for FolderError {}

/// A folder being created or edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderDraft {
    pub id: Option<i64>,
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<i64>,
    pub index: i64,
    #[serde(skip)]
    pub is_smart_folder: bool,
    pub filters: Vec<Predicate>,
}

impl FolderDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            parent_id: None,
            index: 0,
            is_smart_folder: false,
            filters: Vec::new(),
        }
    }

    /// Starts an edit of an existing folder, keeping its stored filters in
    /// `sort_order` and renumbered from zero.
    pub fn for_folder(folder: &Folder) -> Self {
        let mut stored: Vec<_> = folder.filters.iter().collect();
        stored.sort_by_key(|filter| filter.sort_order);
        let filters = stored
            .into_iter()
            .enumerate()
            .map(|(position, filter)| Predicate {
                field_id: filter.field.id,
                operator: filter.operator.clone(),
                value: filter.value.clone(),
                connective: filter.logical_group,
                position,
            })
            .collect();

        Self {
            id: Some(folder.id),
            name: folder.name.clone(),
            description: folder.description.clone(),
            parent_id: folder.parent_id,
            index: folder.index,
            is_smart_folder: folder.is_smart(),
            filters,
        }
    }

    /// Makes this a smart folder selecting whatever the query selects.
    pub fn with_query(mut self, query: FilterQuery) -> Self {
        self.is_smart_folder = true;
        self.filters = query.filters;
        self
    }

    pub fn validate(&self) -> Result<(), Vec<FolderError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(FolderError::MissingName);
        }
        if !(0..=MAX_FOLDER_INDEX).contains(&self.index) {
            errors.push(FolderError::IndexOutOfRange(self.index));
        }
        if self.is_smart_folder && self.filters.is_empty() {
            errors.push(FolderError::SmartFolderWithoutFilters);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FieldId;
    use crate::filter::Connective;
    use crate::folder::{FilterFieldRef, FolderFilter};

    fn predicate() -> Predicate {
        Predicate {
            field_id: FieldId::new(4),
            operator: "EQUALS".to_string(),
            value: "1".to_string(),
            connective: Connective::And,
            position: 0,
        }
    }

    #[test]
    fn test_plain_folder_ok() {
        assert!(FolderDraft::new("Campaigns").validate().is_ok());
    }

    #[test]
    fn test_validate_collects_errors() {
        let mut draft = FolderDraft::new("   ");
        draft.index = MAX_FOLDER_INDEX + 1;
        draft.is_smart_folder = true;

        assert_eq!(
            draft.validate(),
            Err(vec![
                FolderError::MissingName,
                FolderError::IndexOutOfRange(MAX_FOLDER_INDEX + 1),
                FolderError::SmartFolderWithoutFilters,
            ])
        );
    }

    #[test]
    fn test_negative_index_rejected() {
        let mut draft = FolderDraft::new("Campaigns");
        draft.index = -1;
        assert_eq!(draft.validate(), Err(vec![FolderError::IndexOutOfRange(-1)]));
    }

    #[test]
    fn test_smart_folder_request_shape() {
        let draft = FolderDraft::new("Active").with_query(FilterQuery {
            filters: vec![predicate()],
        });

        assert!(draft.validate().is_ok());
        assert_eq!(
            serde_json::to_string(&draft).unwrap(),
            r#"{"id":null,"name":"Active","description":null,"parentId":null,"index":0,"filters":[{"fieldId":4,"operator":"EQUALS","value":"1","logicalGroup":"AND","sortOrder":0}]}"#
        );
    }

    fn stored_filter(field: i64, value: &str, connective: Connective, sort_order: usize) -> FolderFilter {
        FolderFilter {
            field: FilterFieldRef {
                id: FieldId::new(field),
                name: format!("field {}", field),
            },
            operator: "EQUALS".to_string(),
            value: value.to_string(),
            logical_group: connective,
            sort_order,
        }
    }

    #[test]
    fn test_unchanged_smart_folder_keeps_filters() {
        let folder = Folder {
            id: 9,
            name: "Active posters".to_string(),
            description: None,
            index: 2,
            level: 1,
            path_code: Some("9".to_string()),
            parent_id: None,
            childs: Vec::new(),
            filters: vec![
                stored_filter(2, "1", Connective::Or, 5),
                stored_filter(1, "poster", Connective::And, 3),
            ],
        };

        let draft = FolderDraft::for_folder(&folder);

        assert!(draft.is_smart_folder);
        assert_eq!(draft.validate(), Ok(()));
        let summary: Vec<(i64, &str, Connective, usize)> = draft
            .filters
            .iter()
            .map(|p| (p.field_id.get(), p.value.as_str(), p.connective, p.position))
            .collect();
        assert_eq!(
            summary,
            vec![(1, "poster", Connective::And, 0), (2, "1", Connective::Or, 1)]
        );
    }
}

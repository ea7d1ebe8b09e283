//! Folder trees and smart-folder filters
//!
//! Folders arrive from the server as nested trees. A folder carrying
//! filters is a smart folder: its contents are whatever its stored filter
//! chain selects.

mod draft;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, FieldId};
use crate::filter::{Connective, InitialPredicate};

pub use draft::{FolderDraft, FolderError, MAX_FOLDER_INDEX};

/// Field reference inside a stored folder filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterFieldRef {
    pub id: FieldId,
    #[serde(default)]
    pub name: String,
}

/// A filter predicate as stored on a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderFilter {
    pub field: FilterFieldRef,
    pub operator: String,
    pub value: String,
    #[serde(default)]
    pub logical_group: Connective,
    #[serde(default)]
    pub sort_order: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub index: i64,
    #[serde(default)]
    pub level: i64,
    #[serde(default)]
    pub path_code: Option<String>,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub childs: Vec<Folder>,
    #[serde(default)]
    pub filters: Vec<FolderFilter>,
}

impl Folder {
    pub fn is_smart(&self) -> bool {
        !self.filters.is_empty()
    }

    pub fn has_parent(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// One entry of a flat folder picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderOption {
    pub value: String,
    pub label: String,
    pub depth: usize,
}

/// The folder forest as delivered by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FolderTree {
    roots: Vec<Folder>,
}

impl FolderTree {
    pub fn new(roots: Vec<Folder>) -> Self {
        Self { roots }
    }

    pub fn roots(&self) -> &[Folder] {
        &self.roots
    }

    pub fn find(&self, id: i64) -> Option<&Folder> {
        fn walk(folders: &[Folder], id: i64) -> Option<&Folder> {
            folders
                .iter()
                .find_map(|f| if f.id == id { Some(f) } else { walk(&f.childs, id) })
        }
        walk(&self.roots, id)
    }

    /// Folders from a root down to the given folder, inclusive. Empty when
    /// the folder is not in the tree.
    pub fn breadcrumb(&self, id: i64) -> Vec<&Folder> {
        fn walk<'a>(folders: &'a [Folder], id: i64, path: &mut Vec<&'a Folder>) -> bool {
            for folder in folders {
                path.push(folder);
                if folder.id == id || walk(&folder.childs, id, path) {
                    return true;
                }
                path.pop();
            }
            false
        }

        let mut path = Vec::new();
        walk(&self.roots, id, &mut path);
        path
    }

    /// Depth-first listing with `Parent / Child` labels. Siblings are
    /// ordered by their index.
    pub fn flatten(&self) -> Vec<FolderOption> {
        fn walk(folders: &[Folder], prefix: Option<&str>, depth: usize, out: &mut Vec<FolderOption>) {
            let mut siblings: Vec<&Folder> = folders.iter().collect();
            siblings.sort_by_key(|f| f.index);

            for folder in siblings {
                let label = match prefix {
                    Some(prefix) => format!("{} / {}", prefix, folder.name),
                    None => folder.name.clone(),
                };
                out.push(FolderOption {
                    value: folder.id.to_string(),
                    label: label.clone(),
                    depth,
                });
                walk(&folder.childs, Some(&label), depth + 1, out);
            }
        }

        let mut options = Vec::new();
        walk(&self.roots, None, 0, &mut options);
        options
    }

    pub fn len(&self) -> usize {
        fn count(folders: &[Folder]) -> usize {
            folders.iter().map(|f| 1 + count(&f.childs)).sum()
        }
        count(&self.roots)
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

/// Number of segments in a dotted path code such as `1.4.9`.
pub fn path_depth(path_code: &str) -> usize {
    let path_code = path_code.trim();
    if path_code.is_empty() {
        return 0;
    }
    path_code.split('.').count()
}

/// Turns a smart folder's stored filters into builder seeds.
///
/// Filters on fields the catalog no longer has are dropped.
pub fn folder_filters_to_initial(filters: &[FolderFilter], catalog: &Catalog) -> Vec<InitialPredicate> {
    let initial: Vec<InitialPredicate> = filters
        .iter()
        .filter(|filter| {
            let known = catalog.contains(filter.field.id);
            if !known {
                warn!(
                    "Dropping folder filter on unknown field {} ({})",
                    filter.field.id, filter.field.name
                );
            }
            known
        })
        .map(|filter| InitialPredicate {
            field_id: filter.field.id,
            operator: filter.operator.clone(),
            value: filter.value.clone(),
            logical_group: filter.logical_group,
            sort_order: Some(filter.sort_order),
        })
        .collect();

    debug!("Converted {} of {} folder filters", initial.len(), filters.len());
    initial
}

//! The serialized filter query and its wire shape

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::FieldId;

use super::row::FilterRow;
use super::types::Connective;

/// One validated predicate of a query.
///
/// Serializes as `{"fieldId","operator","value","logicalGroup","sortOrder"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    #[serde(rename = "fieldId")]
    pub field_id: FieldId,
    pub operator: String,
    pub value: String,
    #[serde(rename = "logicalGroup")]
    pub connective: Connective,
    /// Zero-based position in the chain
    #[serde(rename = "sortOrder")]
    pub position: usize,
}

/// Flat chain of predicates, evaluated left to right without precedence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterQuery {
    pub filters: Vec<Predicate>,
}

impl FilterQuery {
    /// The query that removes every applied filter.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }
}

/// Projects rows onto a query, dropping incomplete rows.
///
/// Values are trimmed and survivors are numbered in order.
pub fn serialize(rows: &[FilterRow]) -> FilterQuery {
    let filters: Vec<Predicate> = rows
        .iter()
        .filter(|row| {
            let complete = row.is_complete();
            if !complete {
                debug!("Skipping incomplete filter row {}", row.row_id);
            }
            complete
        })
        .filter_map(|row| row.field_id.map(|field_id| (field_id, row)))
        .enumerate()
        .map(|(position, (field_id, row))| Predicate {
            field_id,
            operator: row.operator.clone(),
            value: row.value.trim().to_string(),
            connective: row.connective,
            position,
        })
        .collect();

    debug!(
        "Serialized {} of {} filter rows",
        filters.len(),
        rows.len()
    );
    FilterQuery { filters }
}

/// A predicate as stored on the server, used to seed an edit session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialPredicate {
    pub field_id: FieldId,
    pub operator: String,
    pub value: String,
    #[serde(default)]
    pub logical_group: Connective,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<usize>,
}

impl From<Predicate> for InitialPredicate {
    fn from(predicate: Predicate) -> Self {
        Self {
            field_id: predicate.field_id,
            operator: predicate.operator,
            value: predicate.value,
            logical_group: predicate.connective,
            sort_order: Some(predicate.position),
        }
    }
}

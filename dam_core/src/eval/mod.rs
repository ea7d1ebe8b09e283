//! Local evaluation of filter queries against in-memory assets

mod date;
mod eval_errors;
mod option;
mod table;
mod text;

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, FieldDataType, FieldId};
use crate::filter::{Connective, FilterOperator, FilterQuery, Predicate};

pub use date::compare_date;
pub use eval_errors::EvalError;
pub use option::compare_option;
pub use table::InMemoryTable;
pub use text::compare_text;

/// An asset row with its field values, keyed by field id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: i64,
    #[serde(default)]
    pub values: BTreeMap<FieldId, String>,
}

impl Asset {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            values: BTreeMap::new(),
        }
    }

    pub fn with_value(mut self, field_id: i64, value: impl Into<String>) -> Self {
        self.values.insert(FieldId::new(field_id), value.into());
        self
    }

    /// The asset's value for a field, if present and not blank.
    pub fn value(&self, field_id: FieldId) -> Option<&str> {
        self.values
            .get(&field_id)
            .map(|value| value.as_str())
            .filter(|value| !value.trim().is_empty())
    }
}

/// Whether an asset matches a query.
///
/// Predicates chain left to right: each one is joined to the result so far
/// by its own connective, with no precedence between AND and OR. An empty
/// query matches every asset.
pub fn evaluate(catalog: &Catalog, asset: &Asset, query: &FilterQuery) -> Result<bool, EvalError> {
    let mut predicates = query.filters.iter();
    let Some(first) = predicates.next() else {
        return Ok(true);
    };

    let mut matched = evaluate_predicate(catalog, asset, first)?;
    for predicate in predicates {
        let next = evaluate_predicate(catalog, asset, predicate)?;
        matched = match predicate.connective {
            Connective::And => matched && next,
            Connective::Or => matched || next,
        };
    }
    Ok(matched)
}

fn evaluate_predicate(
    catalog: &Catalog,
    asset: &Asset,
    predicate: &Predicate,
) -> Result<bool, EvalError> {
    let field = catalog
        .get(predicate.field_id)
        .ok_or(EvalError::UnknownField(predicate.field_id))?;
    let operator: FilterOperator = predicate
        .operator
        .parse()
        .map_err(|_| EvalError::UnknownOperator(predicate.operator.clone()))?;

    let Some(value) = asset.value(field.id) else {
        return Ok(operator == FilterOperator::IsEmpty);
    };

    let result = match &field.data_type {
        FieldDataType::FreeText | FieldDataType::Multiline => {
            Ok(compare_text(value, operator, &predicate.value))
        }
        FieldDataType::Date => compare_date(value, operator, &predicate.value),
        FieldDataType::Enumerated { options } => {
            compare_option(options, value, operator, &predicate.value)
        }
    };

    if let Ok(matched) = result {
        debug!(
            "Asset {} {} {} '{}': {}",
            asset.id, field.name, operator, predicate.value, matched
        );
    }
    result
}

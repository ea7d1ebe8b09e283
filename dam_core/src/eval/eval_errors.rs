//! Error types for local query evaluation

use std::fmt;

use crate::catalog::FieldId;
use crate::filter::DispatchError;

/// Errors that can occur while evaluating a query against assets
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// Predicate names a field the catalog does not have
    UnknownField(FieldId),
    /// Operator name outside the known vocabulary
    UnknownOperator(String),
    /// Operator is not supported for the field's data type
    UnsupportedOperator {
        field_type: String,
        operator: String,
        supported: Vec<String>,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnknownField(id) => write!(f, "Unknown field {} in filter", id),
            EvalError::UnknownOperator(operator) => {
                write!(f, "Unknown filter operator '{}'", operator)
            }
            EvalError::UnsupportedOperator {
                field_type,
                operator,
                supported,
            } => write!(
                f,
                "Cannot use '{}' operator on {} fields. Supported: {}",
                operator,
                field_type,
                supported.join(", ")
            ),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<EvalError> for DispatchError {
    fn from(err: EvalError) -> Self {
        DispatchError::new(err.to_string())
    }
}

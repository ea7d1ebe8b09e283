//! Enumerated value comparison logic for filters

use crate::catalog::ValueOption;
use crate::filter::FilterOperator;

use super::EvalError;
use super::text::compare_text;

/// Compare an enumerated value against a filter value.
///
/// Equality compares option values. Substring operators match against the
/// option's label, falling back to the raw value when it is not an option.
pub fn compare_option(
    options: &[ValueOption],
    value: &str,
    operator: FilterOperator,
    filter_value: &str,
) -> Result<bool, EvalError> {
    let value = value.trim();
    let filter_value = filter_value.trim();

    match operator {
        FilterOperator::Equals => Ok(value == filter_value),
        FilterOperator::NotEquals => Ok(value != filter_value),
        FilterOperator::Contains
        | FilterOperator::NotContains
        | FilterOperator::StartsWith
        | FilterOperator::EndsWith => {
            let label = options
                .iter()
                .find(|option| option.value == value)
                .map(|option| option.label.as_str())
                .unwrap_or(value);
            Ok(compare_text(label, operator, filter_value))
        }
        FilterOperator::IsEmpty => Ok(value.is_empty()),
        FilterOperator::IsNotEmpty => Ok(!value.is_empty()),
        _ => Err(EvalError::UnsupportedOperator {
            field_type: "enumerated".to_string(),
            operator: operator.as_wire().to_string(),
            supported: [
                FilterOperator::Equals,
                FilterOperator::NotEquals,
                FilterOperator::Contains,
                FilterOperator::NotContains,
                FilterOperator::StartsWith,
                FilterOperator::EndsWith,
            ]
            .iter()
            .map(|op| op.as_wire().to_string())
            .collect(),
        }),
    }
}

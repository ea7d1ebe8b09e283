//! Date comparison logic for filters

use std::cmp::Ordering;

use crate::catalog::DateValue;
use crate::filter::FilterOperator;

use super::EvalError;

const SUPPORTED_OPS: [FilterOperator; 8] = [
    FilterOperator::Equals,
    FilterOperator::NotEquals,
    FilterOperator::GreaterThan,
    FilterOperator::LessThan,
    FilterOperator::GreaterOrEqual,
    FilterOperator::LessOrEqual,
    FilterOperator::IsEmpty,
    FilterOperator::IsNotEmpty,
];

/// Compare a date value against a filter value.
///
/// Two timestamps compare as instants. As soon as either side is a bare
/// date, only calendar days are compared. Values that are not dates never
/// match.
pub fn compare_date(
    value: &str,
    operator: FilterOperator,
    filter_value: &str,
) -> Result<bool, EvalError> {
    if !SUPPORTED_OPS.contains(&operator) {
        return Err(EvalError::UnsupportedOperator {
            field_type: "date".to_string(),
            operator: operator.as_wire().to_string(),
            supported: SUPPORTED_OPS.iter().map(|op| op.as_wire().to_string()).collect(),
        });
    }

    let (Some(value), Some(filter)) = (DateValue::parse(value), DateValue::parse(filter_value))
    else {
        return Ok(false);
    };

    let ordering = match (value, filter) {
        (DateValue::Instant(left), DateValue::Instant(right)) => left.cmp(&right),
        (left, right) => left.day().cmp(&right.day()),
    };

    Ok(match operator {
        FilterOperator::Equals => ordering == Ordering::Equal,
        FilterOperator::NotEquals => ordering != Ordering::Equal,
        FilterOperator::GreaterThan => ordering.is_gt(),
        FilterOperator::LessThan => ordering.is_lt(),
        FilterOperator::GreaterOrEqual => ordering.is_ge(),
        FilterOperator::LessOrEqual => ordering.is_le(),
        _ => false,
    })
}

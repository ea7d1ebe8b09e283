//! Text comparison logic for filters

use std::cmp::Ordering;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::filter::FilterOperator;

/// Compare a free-text value against a filter value.
///
/// Matching ignores case. Ordering operators compare numerically when both
/// sides are numbers and lexicographically otherwise.
pub fn compare_text(value: &str, operator: FilterOperator, filter_value: &str) -> bool {
    let value = value.trim();
    let filter_value = filter_value.trim();

    match operator {
        FilterOperator::Equals => value.to_lowercase() == filter_value.to_lowercase(),
        FilterOperator::NotEquals => value.to_lowercase() != filter_value.to_lowercase(),
        FilterOperator::Contains => value.to_lowercase().contains(&filter_value.to_lowercase()),
        FilterOperator::NotContains => !value.to_lowercase().contains(&filter_value.to_lowercase()),
        FilterOperator::StartsWith => value
            .to_lowercase()
            .starts_with(&filter_value.to_lowercase()),
        FilterOperator::EndsWith => value.to_lowercase().ends_with(&filter_value.to_lowercase()),
        FilterOperator::GreaterThan => order(value, filter_value).is_gt(),
        FilterOperator::LessThan => order(value, filter_value).is_lt(),
        FilterOperator::GreaterOrEqual => order(value, filter_value).is_ge(),
        FilterOperator::LessOrEqual => order(value, filter_value).is_le(),
        FilterOperator::IsEmpty => value.is_empty(),
        FilterOperator::IsNotEmpty => !value.is_empty(),
    }
}

fn order(value: &str, filter_value: &str) -> Ordering {
    match (Decimal::from_str(value), Decimal::from_str(filter_value)) {
        (Ok(left), Ok(right)) => left.cmp(&right),
        _ => value.to_lowercase().cmp(&filter_value.to_lowercase()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equals_ignores_case() {
        assert!(compare_text("Active", FilterOperator::Equals, "active"));
        assert!(!compare_text("Active", FilterOperator::NotEquals, "ACTIVE"));
    }

    #[test]
    fn test_substring_operators() {
        assert!(compare_text("Summer Poster", FilterOperator::Contains, "poster"));
        assert!(compare_text("Summer Poster", FilterOperator::NotContains, "flyer"));
        assert!(compare_text("Summer Poster", FilterOperator::StartsWith, "sum"));
        assert!(compare_text("Summer Poster", FilterOperator::EndsWith, "STER"));
        assert!(!compare_text("Summer Poster", FilterOperator::EndsWith, "summer"));
    }

    #[test]
    fn test_numeric_ordering() {
        // Lexicographically "9" > "10"
        assert!(compare_text("10", FilterOperator::GreaterThan, "9"));
        assert!(compare_text("2.50", FilterOperator::LessOrEqual, "2.5"));
        assert!(compare_text("-1", FilterOperator::LessThan, "0"));
    }

    #[test]
    fn test_lexicographic_ordering() {
        assert!(compare_text("banana", FilterOperator::GreaterThan, "Apple"));
        assert!(compare_text("apple", FilterOperator::GreaterOrEqual, "APPLE"));
    }
}

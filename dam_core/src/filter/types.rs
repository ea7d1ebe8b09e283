//! Filter type definitions

use std::fmt;
use std::str::FromStr;

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

/// Logical connective joining a predicate to the one before it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Connective {
    #[default]
    And,
    Or,
}

impl Connective {
    pub fn as_wire(&self) -> &'static str {
        match self {
            Connective::And => "AND",
            Connective::Or => "OR",
        }
    }
}

impl fmt::Display for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

impl FromStr for Connective {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AND" => Ok(Connective::And),
            "OR" => Ok(Connective::Or),
            other => Err(format!("Unknown connective '{}', expected AND or OR", other)),
        }
    }
}

/// Comparison operators understood by the search backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOperator {
    Equals,
    NotEquals,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    GreaterOrEqual,
    LessOrEqual,
    IsEmpty,
    IsNotEmpty,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 12] = [
        FilterOperator::Equals,
        FilterOperator::NotEquals,
        FilterOperator::Contains,
        FilterOperator::NotContains,
        FilterOperator::StartsWith,
        FilterOperator::EndsWith,
        FilterOperator::GreaterThan,
        FilterOperator::LessThan,
        FilterOperator::GreaterOrEqual,
        FilterOperator::LessOrEqual,
        FilterOperator::IsEmpty,
        FilterOperator::IsNotEmpty,
    ];

    /// The operator's name on the wire
    pub fn as_wire(&self) -> &'static str {
        match self {
            FilterOperator::Equals => "EQUALS",
            FilterOperator::NotEquals => "NOT_EQUALS",
            FilterOperator::Contains => "CONTAINS",
            FilterOperator::NotContains => "NOT_CONTAINS",
            FilterOperator::StartsWith => "STARTS_WITH",
            FilterOperator::EndsWith => "ENDS_WITH",
            FilterOperator::GreaterThan => "GREATER_THAN",
            FilterOperator::LessThan => "LESS_THAN",
            FilterOperator::GreaterOrEqual => "GREATER_THAN_OR_EQUAL",
            FilterOperator::LessOrEqual => "LESS_THAN_OR_EQUAL",
            FilterOperator::IsEmpty => "IS_EMPTY",
            FilterOperator::IsNotEmpty => "IS_NOT_EMPTY",
        }
    }

    /// Whether the operator compares against the predicate's value.
    pub fn takes_value(&self) -> bool {
        !matches!(self, FilterOperator::IsEmpty | FilterOperator::IsNotEmpty)
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_wire())
    }
}

impl FromStr for FilterOperator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wire = s.trim();
        FilterOperator::ALL
            .into_iter()
            .find(|op| op.as_wire().eq_ignore_ascii_case(wire))
            .ok_or_else(|| format!("Unknown operator '{}'", wire))
    }
}

/// One entry of the operator picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorOption {
    pub value: String,
    pub label: String,
}

impl OperatorOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Operators offered when the caller supplies none.
pub const DEFAULT_OPERATORS: &[(&str, &str)] = &[
    ("EQUALS", "Equals"),
    ("NOT_EQUALS", "Does not equal"),
    ("CONTAINS", "Contains"),
    ("NOT_CONTAINS", "Does not contain"),
    ("STARTS_WITH", "Starts with"),
    ("ENDS_WITH", "Ends with"),
    ("GREATER_THAN", "Greater than"),
    ("LESS_THAN", "Less than"),
    ("GREATER_THAN_OR_EQUAL", "Greater than or equal"),
    ("LESS_THAN_OR_EQUAL", "Less than or equal"),
];

/// Ordered list of operators offered to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorVocabulary {
    options: Vec<OperatorOption>,
}

impl Default for OperatorVocabulary {
    fn default() -> Self {
        Self::new(
            DEFAULT_OPERATORS
                .iter()
                .map(|(value, label)| OperatorOption::new(*value, *label))
                .collect(),
        )
    }
}

impl OperatorVocabulary {
    pub fn new(options: Vec<OperatorOption>) -> Self {
        Self { options }
    }

    /// Builds options from bare wire names, deriving readable labels.
    pub fn from_wire_names(names: &[String]) -> Self {
        Self::new(
            names
                .iter()
                .map(|name| OperatorOption::new(name.clone(), name.to_case(Case::Sentence)))
                .collect(),
        )
    }

    pub fn first(&self) -> Option<&OperatorOption> {
        self.options.first()
    }

    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperatorOption> {
        self.options.iter()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_wire_round_trip() {
        for op in FilterOperator::ALL {
            assert_eq!(op.as_wire().parse::<FilterOperator>().unwrap(), op);
        }
    }

    #[test]
    fn test_operator_parse_is_case_insensitive() {
        assert_eq!(
            "greater_than_or_equal".parse::<FilterOperator>().unwrap(),
            FilterOperator::GreaterOrEqual
        );
        assert!("BETWEEN".parse::<FilterOperator>().is_err());
    }

    #[test]
    fn test_empty_operators_take_no_value() {
        assert!(!FilterOperator::IsEmpty.takes_value());
        assert!(!FilterOperator::IsNotEmpty.takes_value());
        assert!(FilterOperator::Equals.takes_value());
    }

    #[test]
    fn test_connective_wire_names() {
        assert_eq!(serde_json::to_string(&Connective::And).unwrap(), "\"AND\"");
        assert_eq!(serde_json::to_string(&Connective::Or).unwrap(), "\"OR\"");
        assert_eq!(" or ".parse::<Connective>().unwrap(), Connective::Or);
        assert!("XOR".parse::<Connective>().is_err());
    }

    #[test]
    fn test_default_vocabulary() {
        let vocabulary = OperatorVocabulary::default();
        assert_eq!(vocabulary.len(), DEFAULT_OPERATORS.len());
        assert_eq!(vocabulary.first().unwrap().value, "EQUALS");
    }

    #[test]
    fn test_vocabulary_from_wire_names() {
        let vocabulary = OperatorVocabulary::from_wire_names(&[
            "EQUALS".to_string(),
            "GREATER_THAN_OR_EQUAL".to_string(),
        ]);

        let labels: Vec<&str> = vocabulary.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["Equals", "Greater than or equal"]);
        assert!(vocabulary.contains("EQUALS"));
        assert!(!vocabulary.contains("CONTAINS"));
    }
}

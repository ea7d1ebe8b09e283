//! Field data types and the value domains they accept

use std::fmt;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

/// One selectable value of an enumerated field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueOption {
    pub value: String,
    pub label: String,
    /// Key of the parent option this one belongs to, for dependent fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_key: Option<String>,
}

impl ValueOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            group_key: None,
        }
    }

    pub fn with_group(mut self, group_key: impl Into<String>) -> Self {
        self.group_key = Some(group_key.into());
        self
    }
}

/// The data type of a catalog field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldDataType {
    /// Single line of free text
    FreeText,
    /// Free text spanning several lines
    Multiline,
    /// Calendar date, optionally with a time and offset
    Date,
    /// Closed list of values backed by a datasource
    Enumerated { options: Vec<ValueOption> },
}

/// The editor a filter row uses for its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueEditor {
    Text,
    Date,
    Choice,
}

/// A parsed date value. Date-only values compare by calendar day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DateValue {
    Instant(DateTime<FixedOffset>),
    Day(NaiveDate),
}

impl DateValue {
    /// Parses either an RFC 3339 timestamp or a `YYYY-MM-DD` date.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(instant) = value.parse::<DateTime<FixedOffset>>() {
            return Some(DateValue::Instant(instant));
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .map(DateValue::Day)
    }

    /// The calendar day of this value, in its own offset.
    pub fn day(&self) -> NaiveDate {
        match self {
            DateValue::Instant(instant) => instant.date_naive(),
            DateValue::Day(day) => *day,
        }
    }
}

/// A value outside the domain of its field's data type.
#[derive(Debug, Clone, PartialEq)]
pub enum ValueError {
    InvalidDate(String),
    NotAnOption { value: String, allowed: Vec<String> },
}

impl fmt::Display for ValueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueError::InvalidDate(value) => write!(
                f,
                "'{}' is not a valid date (expected YYYY-MM-DD or RFC 3339)",
                value
            ),
            ValueError::NotAnOption { value, allowed } => {
                write!(f, "'{}' is not one of: {}", value, allowed.join(", "))
            }
        }
    }
}

impl std::error::Error for ValueError {}

impl FieldDataType {
    /// Returns the type name for messages and listings
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldDataType::FreeText => "free_text",
            FieldDataType::Multiline => "multiline",
            FieldDataType::Date => "date",
            FieldDataType::Enumerated { .. } => "enumerated",
        }
    }

    /// Options of an enumerated type. Empty for every other type.
    pub fn options(&self) -> &[ValueOption] {
        match self {
            FieldDataType::Enumerated { options } => options,
            _ => &[],
        }
    }

    pub fn is_enumerated(&self) -> bool {
        matches!(self, FieldDataType::Enumerated { .. })
    }

    /// Selects the filter value editor for this type.
    pub fn value_editor(&self) -> ValueEditor {
        match self {
            FieldDataType::FreeText | FieldDataType::Multiline => ValueEditor::Text,
            FieldDataType::Date => ValueEditor::Date,
            FieldDataType::Enumerated { .. } => ValueEditor::Choice,
        }
    }

    /// Checks that a value belongs to the domain of this type.
    pub fn validate_value(&self, value: &str) -> Result<(), ValueError> {
        match self {
            FieldDataType::FreeText | FieldDataType::Multiline => Ok(()),
            FieldDataType::Date => match DateValue::parse(value) {
                Some(_) => Ok(()),
                None => Err(ValueError::InvalidDate(value.to_string())),
            },
            FieldDataType::Enumerated { options } => {
                if options.iter().any(|option| option.value == value) {
                    Ok(())
                } else {
                    Err(ValueError::NotAnOption {
                        value: value.to_string(),
                        allowed: options.iter().map(|o| o.value.clone()).collect(),
                    })
                }
            }
        }
    }
}

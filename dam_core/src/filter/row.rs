//! Filter rows: one user-edited predicate draft each

use std::fmt;

use crate::catalog::{Catalog, Field, FieldId, ValueEditor, ValueOption};

use super::types::Connective;

/// Local identity of a row. Never transmitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

impl RowId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// Hands out row ids unique within one builder.
#[derive(Debug, Default)]
pub(crate) struct RowIdGenerator {
    next: u64,
}

impl RowIdGenerator {
    pub(crate) fn next_id(&mut self) -> RowId {
        self.next += 1;
        RowId::new(self.next)
    }
}

/// A predicate draft as the user edits it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRow {
    pub row_id: RowId,
    pub field_id: Option<FieldId>,
    pub operator: String,
    pub value: String,
    /// Ignored for the first row.
    pub connective: Connective,
}

impl FilterRow {
    /// A row is complete when it names a field, an operator and a non-blank value.
    pub fn is_complete(&self) -> bool {
        self.field_id.is_some() && !self.operator.is_empty() && !self.value.trim().is_empty()
    }
}

/// Partial in-place update of a row. The field is changed separately,
/// because that also clears operator and value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowPatch {
    pub operator: Option<String>,
    pub value: Option<String>,
    pub connective: Option<Connective>,
}

impl RowPatch {
    pub fn operator(operator: impl Into<String>) -> Self {
        Self {
            operator: Some(operator.into()),
            ..Self::default()
        }
    }

    pub fn value(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn connective(connective: Connective) -> Self {
        Self {
            connective: Some(connective),
            ..Self::default()
        }
    }

    pub(crate) fn apply_to(self, row: &mut FilterRow) {
        if let Some(operator) = self.operator {
            row.operator = operator;
        }
        if let Some(value) = self.value {
            row.value = value;
        }
        if let Some(connective) = self.connective {
            row.connective = connective;
        }
    }
}

/// Read-only view of one row in the context of its siblings.
pub struct RowEditor<'a> {
    row: &'a FilterRow,
    index: usize,
    rows: &'a [FilterRow],
    catalog: &'a Catalog,
}

impl<'a> RowEditor<'a> {
    pub(crate) fn new(
        row: &'a FilterRow,
        index: usize,
        rows: &'a [FilterRow],
        catalog: &'a Catalog,
    ) -> Self {
        Self {
            row,
            index,
            rows,
            catalog,
        }
    }

    pub fn row(&self) -> &FilterRow {
        self.row
    }

    /// The first row shows no connective.
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    pub fn field(&self) -> Option<&'a Field> {
        self.row.field_id.and_then(|id| self.catalog.get(id))
    }

    /// Operator and value stay disabled until a field is chosen.
    pub fn is_value_enabled(&self) -> bool {
        self.field().is_some()
    }

    /// The editor to show for the value: free text unless the field is
    /// a date or backed by a datasource.
    pub fn value_editor(&self) -> ValueEditor {
        self.field()
            .map(|field| field.data_type.value_editor())
            .unwrap_or(ValueEditor::Text)
    }

    /// Options for a choice editor.
    ///
    /// For a field that depends on a parent field, only options whose group
    /// matches the value of the sibling row bound to that parent are offered,
    /// and none while that sibling has no value. Without such a sibling every
    /// option is offered.
    pub fn value_options(&self) -> Vec<ValueOption> {
        let Some(field) = self.field() else {
            return Vec::new();
        };
        let options = field.data_type.options();

        let Some(parent) = field.depends_on else {
            return options.to_vec();
        };

        let sibling = self
            .rows
            .iter()
            .find(|other| other.row_id != self.row.row_id && other.field_id == Some(parent));

        match sibling {
            None => options.to_vec(),
            Some(sibling) if sibling.value.trim().is_empty() => Vec::new(),
            Some(sibling) => {
                let group = sibling.value.trim();
                options
                    .iter()
                    .filter(|option| option.group_key.as_deref() == Some(group))
                    .cloned()
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FieldDataType;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Field::new(1, "Title", "Title", FieldDataType::FreeText),
            Field::new(
                10,
                "CategoryGroup",
                "Category group",
                FieldDataType::Enumerated {
                    options: vec![
                        ValueOption::new("g1", "Print"),
                        ValueOption::new("g2", "Web"),
                    ],
                },
            ),
            Field::new(
                11,
                "Category",
                "Category",
                FieldDataType::Enumerated {
                    options: vec![
                        ValueOption::new("c1", "Poster").with_group("g1"),
                        ValueOption::new("c2", "Flyer").with_group("g1"),
                        ValueOption::new("c3", "Banner").with_group("g2"),
                    ],
                },
            )
            .depending_on(10),
            Field::new(12, "Published", "Published", FieldDataType::Date),
        ])
        .unwrap()
    }

    fn row(id: u64, field: Option<i64>, value: &str) -> FilterRow {
        FilterRow {
            row_id: RowId::new(id),
            field_id: field.map(FieldId::new),
            operator: "EQUALS".to_string(),
            value: value.to_string(),
            connective: Connective::And,
        }
    }

    fn option_values(options: &[ValueOption]) -> Vec<&str> {
        options.iter().map(|o| o.value.as_str()).collect()
    }

    #[test]
    fn test_completeness() {
        assert!(row(1, Some(1), "x").is_complete());
        assert!(!row(1, None, "x").is_complete());
        assert!(!row(1, Some(1), "   ").is_complete());

        let mut no_operator = row(1, Some(1), "x");
        no_operator.operator.clear();
        assert!(!no_operator.is_complete());
    }

    #[test]
    fn test_patch_touches_only_given_parts() {
        let mut target = row(1, Some(1), "old");
        RowPatch::value("new").apply_to(&mut target);

        assert_eq!(target.value, "new");
        assert_eq!(target.operator, "EQUALS");
        assert_eq!(target.connective, Connective::And);
    }

    #[test]
    fn test_value_editor_per_field() {
        let catalog = catalog();
        let rows = vec![row(1, Some(1), ""), row(2, Some(10), ""), row(3, Some(12), ""), row(4, None, "")];

        let editors: Vec<ValueEditor> = rows
            .iter()
            .enumerate()
            .map(|(i, r)| RowEditor::new(r, i, &rows, &catalog).value_editor())
            .collect();

        assert_eq!(
            editors,
            vec![ValueEditor::Text, ValueEditor::Choice, ValueEditor::Date, ValueEditor::Text]
        );
    }

    #[test]
    fn test_first_row_and_disabled_value() {
        let catalog = catalog();
        let rows = vec![row(1, Some(1), ""), row(2, None, "")];

        assert!(RowEditor::new(&rows[0], 0, &rows, &catalog).is_first());
        assert!(!RowEditor::new(&rows[1], 1, &rows, &catalog).is_first());
        assert!(!RowEditor::new(&rows[1], 1, &rows, &catalog).is_value_enabled());
    }

    #[test]
    fn test_dependent_options_follow_sibling_value() {
        let catalog = catalog();
        let rows = vec![row(1, Some(10), "g1"), row(2, Some(11), "")];

        let options = RowEditor::new(&rows[1], 1, &rows, &catalog).value_options();
        assert_eq!(option_values(&options), vec!["c1", "c2"]);
    }

    #[test]
    fn test_dependent_options_empty_until_sibling_selected() {
        let catalog = catalog();
        let rows = vec![row(1, Some(10), ""), row(2, Some(11), "")];

        assert!(RowEditor::new(&rows[1], 1, &rows, &catalog).value_options().is_empty());
    }

    #[test]
    fn test_dependent_options_without_sibling() {
        let catalog = catalog();
        let rows = vec![row(1, Some(11), "")];

        let options = RowEditor::new(&rows[0], 0, &rows, &catalog).value_options();
        assert_eq!(option_values(&options), vec!["c1", "c2", "c3"]);
    }

    #[test]
    fn test_independent_options() {
        let catalog = catalog();
        let rows = vec![row(1, Some(10), "")];

        let options = RowEditor::new(&rows[0], 0, &rows, &catalog).value_options();
        assert_eq!(option_values(&options), vec!["g1", "g2"]);
    }

    #[test]
    fn test_row_id_display() {
        assert_eq!(RowId::new(3).to_string(), "row-3");
    }
}

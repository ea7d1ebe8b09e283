//! Interactive row editing with inquire prompts.

use std::fmt;

use inquire::{Confirm, DateSelect, Select, Text};

use dam_core::filter::{OperatorOption, RowEditor};
use dam_core::{Connective, Field, FilterBuilder, RowId, RowPatch, ValueEditor, ValueOption};

use crate::errors::CliError;
use crate::ui;

/// Wrapper for Field that customizes Display for Inquire prompts.
struct InquireField<'a>(&'a Field);
impl fmt::Display for InquireField<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0.display_label, self.0.data_type.type_name())
    }
}

struct InquireOperator<'a>(&'a OperatorOption);
impl fmt::Display for InquireOperator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.label)
    }
}

struct InquireOption(ValueOption);
impl fmt::Display for InquireOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.label)
    }
}

/// Prompts for filter rows until the user is done.
pub fn prompt_rows(builder: &mut FilterBuilder) -> Result<(), CliError> {
    let mut row_id = builder
        .rows()
        .last()
        .map(|row| row.row_id)
        .ok_or(CliError::InputError)?;

    // Stored filters are kept; new rows go after them
    if builder.active_filter_count() > 0 {
        let _ = builder.add_row();
        row_id = builder
            .rows()
            .last()
            .map(|row| row.row_id)
            .ok_or(CliError::InputError)?;
    }

    loop {
        prompt_row(builder, row_id)?;

        let more = Confirm::new("Add another filter?")
            .with_default(false)
            .prompt()
            .map_err(|_| CliError::InputError)?;
        if !more {
            return Ok(());
        }

        let _ = builder.add_row();
        row_id = builder
            .rows()
            .last()
            .map(|row| row.row_id)
            .ok_or(CliError::InputError)?;
    }
}

fn prompt_row(builder: &mut FilterBuilder, row_id: RowId) -> Result<(), CliError> {
    let is_first = builder.editor(row_id).is_some_and(|editor| editor.is_first());
    if !is_first {
        let connective = Select::new("Join with:", vec![Connective::And, Connective::Or])
            .prompt()
            .map_err(|_| CliError::InputError)?;
        let _ = builder.update_row(row_id, RowPatch::connective(connective));
    }

    let field_options: Vec<_> = builder.catalog().iter().map(InquireField).collect();
    let field_id = Select::new("Field:", field_options)
        .prompt()
        .map_err(|_| CliError::InputError)?
        .0
        .id;
    let _ = builder.change_field(row_id, field_id);

    let operator_options: Vec<_> = builder.operators().iter().map(InquireOperator).collect();
    let operator = Select::new("Operator:", operator_options)
        .prompt()
        .map_err(|_| CliError::InputError)?
        .0
        .value
        .clone();
    let _ = builder.update_row(row_id, RowPatch::operator(operator));

    let editor = builder.editor(row_id).ok_or(CliError::InputError)?;
    let value = prompt_value(&editor)?;
    let _ = builder.update_row(row_id, RowPatch::value(value));
    Ok(())
}

fn prompt_value(editor: &RowEditor<'_>) -> Result<String, CliError> {
    match editor.value_editor() {
        ValueEditor::Choice => {
            let options: Vec<_> = editor.value_options().into_iter().map(InquireOption).collect();
            if options.is_empty() {
                ui::warning("No options available; choose a value for the parent field first");
                return Ok(String::new());
            }
            Select::new("Value:", options)
                .prompt()
                .map(|choice| choice.0.value)
                .map_err(|_| CliError::InputError)
        }
        ValueEditor::Date => DateSelect::new("Value:")
            .prompt()
            .map(|date| date.format("%Y-%m-%d").to_string())
            .map_err(|_| CliError::InputError),
        ValueEditor::Text => Text::new("Value:")
            .prompt()
            .map_err(|_| CliError::InputError),
    }
}

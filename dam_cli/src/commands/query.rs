use std::path::Path;

use dam_core::{
    BuilderConfig, Catalog, Connective, Field, FieldDataType, FilterBuilder, RowPatch,
};

use super::row_prompt::prompt_rows;
use crate::errors::CliError;
use crate::files::{load_catalog, load_initial};
use crate::ui::{self, OutputFormat};

/// Composes a filter query from `--row` arguments or interactive prompts
/// and prints its wire form.
pub fn compose_query(
    catalog_path: &Path,
    rows: Vec<String>,
    initial: Option<&Path>,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Composing filter query");
    let (catalog, operators) = load_catalog(catalog_path)?;
    if catalog.is_empty() {
        ui::error("The catalog has no filterable fields");
        return Err(CliError::InputError);
    }

    let mut builder = FilterBuilder::new(catalog, operators, BuilderConfig::manual());
    if let Some(path) = initial {
        builder = builder.with_initial(load_initial(path)?);
        ui::info(&format!(
            "Starting from {} stored filters",
            builder.active_filter_count()
        ));
    }

    if rows.is_empty() {
        prompt_rows(&mut builder)?;
    } else {
        compose_rows(&mut builder, &rows)?;
    }

    let query = builder.query();
    let skipped = builder.rows().len() - query.len();
    if skipped > 0 {
        ui::warning(&format!("Skipped {} incomplete rows", skipped));
    }
    ui::success(&format!("Query has {} filters", query.len()));

    match output_format {
        OutputFormat::Pretty => {
            ui::pretty_output_query(&query, builder.catalog());
            ui::json_output(&query);
        }
        OutputFormat::Json => ui::json_output(&query),
    }
    Ok(())
}

/// Appends rows given as `CONNECTIVE FIELD OPERATOR VALUE` groups.
///
/// When the builder still holds only its untouched default row, the first
/// group fills that row instead of adding another.
pub fn compose_rows(builder: &mut FilterBuilder, args: &[String]) -> Result<(), CliError> {
    let mut reuse_default = builder.active_filter_count() == 0 && builder.rows().len() == 1;

    for chunk in args.chunks(4) {
        let [connective, field, operator, value] = chunk else {
            ui::error("Each --row needs a connective, a field, an operator and a value");
            return Err(CliError::InputError);
        };

        let connective: Connective = connective.parse().map_err(|e: String| {
            ui::error(&e);
            CliError::InputError
        })?;
        let field = resolve_field(builder.catalog(), field)?.clone();
        if !builder.operators().contains(operator) {
            let known: Vec<&str> = builder.operators().iter().map(|o| o.value.as_str()).collect();
            ui::error_with_details(
                &format!("Unknown operator '{}'", operator),
                &format!("expected one of {}", known.join(", ")),
            );
            return Err(CliError::InputError);
        }
        let value = resolve_value(&field, value)?;

        if !reuse_default {
            let _ = builder.add_row();
        }
        reuse_default = false;

        let Some(row_id) = builder.rows().last().map(|row| row.row_id) else {
            return Err(CliError::InputError);
        };
        let _ = builder.change_field(row_id, field.id);
        let _ = builder.update_row(
            row_id,
            RowPatch {
                operator: Some(operator.clone()),
                value: Some(value),
                connective: Some(connective),
            },
        );
    }
    Ok(())
}

/// Finds a field by numeric id or by machine name.
pub fn resolve_field<'a>(catalog: &'a Catalog, key: &str) -> Result<&'a Field, CliError> {
    let by_id = key
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|id| catalog.get(id.into()));

    by_id
        .or_else(|| catalog.find_by_name(key.trim()))
        .ok_or_else(|| {
            ui::error(&format!("Field '{}' is not in the catalog", key));
            CliError::InputError
        })
}

/// Accepts an option label where an option value is expected.
fn resolve_value(field: &Field, value: &str) -> Result<String, CliError> {
    if let FieldDataType::Enumerated { options } = &field.data_type {
        if let Some(option) = options
            .iter()
            .find(|o| o.value != value && o.label.eq_ignore_ascii_case(value.trim()))
        {
            ui::debug(&format!("Using option value '{}' for '{}'", option.value, value));
            return Ok(option.value.clone());
        }
    }

    if let Err(e) = field.data_type.validate_value(value.trim()) {
        ui::error_with_details(&format!("Invalid value for {}", field.display_label), &e.to_string());
        return Err(CliError::InputError);
    }
    Ok(value.to_string())
}

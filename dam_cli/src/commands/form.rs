use std::path::Path;

use dam_core::form::{FieldValueItem, FormSchema};

use crate::errors::CliError;
use crate::files::{load_catalog, load_form_values};
use crate::ui::{self, OutputFormat};

/// Prints the form derived from a catalog.
pub fn show_form(catalog_path: &Path, output_format: OutputFormat) -> Result<(), CliError> {
    ui::header("Building form");
    let (catalog, _) = load_catalog(catalog_path)?;
    let schema = FormSchema::from_catalog(&catalog);

    let required = schema.fields().iter().filter(|f| f.required).count();
    ui::success(&format!(
        "Form has {} fields, {} required",
        schema.fields().len(),
        required
    ));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_form(&schema),
        OutputFormat::Json => ui::json_output(&schema),
    }
    Ok(())
}

/// Validates form values and prints the save payload.
pub fn validate_form(
    catalog_path: &Path,
    values_path: &Path,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Validating form values");
    let payload = form_payload(catalog_path, values_path)?;
    ui::success("Form values are valid");

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_payload(&payload),
        OutputFormat::Json => ui::json_output(&payload),
    }
    Ok(())
}

/// Builds the save payload for form values that pass validation.
pub fn form_payload(catalog_path: &Path, values_path: &Path) -> Result<Vec<FieldValueItem>, CliError> {
    let (catalog, _) = load_catalog(catalog_path)?;
    let schema = FormSchema::from_catalog(&catalog);
    let values = load_form_values(values_path)?;

    for key in values.keys().filter(|key| schema.field(key).is_none()) {
        ui::warning(&format!("Ignoring unknown form key '{}'", key));
    }

    schema.validate(&values).map_err(|errors| {
        ui::error("Form validation failed:");
        ui::pretty_output_form_errors(&errors);
        CliError::ValidationError
    })?;

    Ok(schema.fields_json(&values))
}

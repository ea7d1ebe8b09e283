use std::path::Path;

use crate::errors::CliError;
use crate::files::load_catalog;
use crate::ui::{self, OutputFormat};

/// Lists the filterable fields of a catalog.
pub fn list_fields(catalog_path: &Path, output_format: OutputFormat) -> Result<(), CliError> {
    ui::header("Listing fields");
    let (catalog, operators) = load_catalog(catalog_path)?;

    ui::success(&format!(
        "Found {} filterable fields and {} operators",
        catalog.len(),
        operators.len()
    ));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_fields(&catalog),
        OutputFormat::Json => ui::json_output(&catalog),
    }
    Ok(())
}

use std::path::Path;

use crate::errors::CliError;
use crate::files::load_folders;
use crate::ui::{self, OutputFormat};

/// Prints a folder tree with hierarchical labels.
pub fn list_folders(folders_path: &Path, output_format: OutputFormat) -> Result<(), CliError> {
    ui::header("Listing folders");
    let tree = load_folders(folders_path)?;
    let options = tree.flatten();

    ui::success(&format!("Found {} folders", options.len()));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_folders(&tree, &options),
        OutputFormat::Json => ui::json_output(&options),
    }
    Ok(())
}

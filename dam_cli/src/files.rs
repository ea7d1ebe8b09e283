//! Loading command inputs from JSON files

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use dam_core::eval::Asset;
use dam_core::folder::FolderTree;
use dam_core::form::FormValues;
use dam_core::{ApiField, Catalog, CatalogOptions, FilterQuery, InitialPredicate, OperatorVocabulary};

use crate::errors::CliError;
use crate::ui;

/// A catalog file: the server's field list and, optionally, its operators.
#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub fields: Vec<ApiField>,
    #[serde(default)]
    pub operators: Option<Vec<String>>,
}

/// Reads and parses a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    ui::debug(&format!("Reading {}", path.display()));
    let contents = fs::read_to_string(path).map_err(|e| {
        ui::error_with_details(&format!("Failed to read {}", path.display()), &e.to_string());
        CliError::FileError
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        ui::error_with_details(&format!("Failed to parse {}", path.display()), &e.to_string());
        CliError::FileError
    })
}

/// Loads a catalog file. Without an operator list the default operators
/// are used.
pub fn load_catalog(path: &Path) -> Result<(Catalog, OperatorVocabulary), CliError> {
    let file: CatalogFile = load_json(path)?;
    let catalog = Catalog::from_api_fields(&file.fields, &CatalogOptions::default()).map_err(|e| {
        ui::error_with_details("Invalid field catalog", &e.to_string());
        CliError::InputError
    })?;

    let operators = match file.operators {
        Some(names) if !names.is_empty() => OperatorVocabulary::from_wire_names(&names),
        _ => {
            ui::debug("No operators in catalog file, using defaults");
            OperatorVocabulary::default()
        }
    };
    Ok((catalog, operators))
}

pub fn load_assets(path: &Path) -> Result<Vec<Asset>, CliError> {
    load_json(path)
}

pub fn load_query(path: &Path) -> Result<FilterQuery, CliError> {
    load_json(path)
}

/// Loads stored predicates, either as a bare array or as a query object.
pub fn load_initial(path: &Path) -> Result<Vec<InitialPredicate>, CliError> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stored {
        Predicates(Vec<InitialPredicate>),
        Query(FilterQuery),
    }

    Ok(match load_json(path)? {
        Stored::Predicates(predicates) => predicates,
        Stored::Query(query) => query.filters.into_iter().map(InitialPredicate::from).collect(),
    })
}

pub fn load_form_values(path: &Path) -> Result<FormValues, CliError> {
    load_json(path)
}

pub fn load_folders(path: &Path) -> Result<FolderTree, CliError> {
    load_json(path)
}

mod helpers;

use assert_matches::assert_matches;
use dam_cli::commands::{compose_query, compose_rows, resolve_field};
use dam_cli::errors::CliError;
use dam_cli::files::{load_catalog, load_initial};
use dam_cli::ui::OutputFormat;
use dam_core::{BuilderConfig, Connective, FieldId, FilterBuilder};
use helpers::{CATALOG, args, write_files};

fn builder() -> (tempfile::TempDir, FilterBuilder) {
    let (dir, paths) = write_files(&[("catalog.json", CATALOG)]);
    let (catalog, operators) = load_catalog(&paths[0]).unwrap();
    (dir, FilterBuilder::new(catalog, operators, BuilderConfig::manual()))
}

#[test]
fn test_catalog_file_excludes_images() {
    let (_dir, builder) = builder();
    assert_eq!(builder.catalog().len(), 3);
    assert_eq!(builder.operators().len(), 3);
    assert_eq!(builder.operators().first().unwrap().label, "Equals");
}

#[test]
fn test_rows_from_arguments() {
    let (_dir, mut builder) = builder();

    compose_rows(
        &mut builder,
        &args(&["AND", "title", "CONTAINS", "poster", "OR", "2", "EQUALS", "Archived"]),
    )
    .unwrap();

    let query = builder.query();
    assert_eq!(builder.rows().len(), 2);
    assert_eq!(query.len(), 2);
    assert_eq!(query.filters[0].field_id, FieldId::new(1));
    assert_eq!(query.filters[1].connective, Connective::Or);
    // The option label is replaced by its value
    assert_eq!(query.filters[1].value, "2");
}

#[test]
fn test_unknown_operator_rejected() {
    let (_dir, mut builder) = builder();
    let result = compose_rows(&mut builder, &args(&["AND", "Title", "ENDS_WITH", "x"]));
    assert_matches!(result, Err(CliError::InputError));
}

#[test]
fn test_invalid_date_rejected() {
    let (_dir, mut builder) = builder();
    let result = compose_rows(&mut builder, &args(&["AND", "Published", "GREATER_THAN", "soon"]));
    assert_matches!(result, Err(CliError::InputError));
    assert_eq!(builder.active_filter_count(), 0);
}

#[test]
fn test_resolve_field_by_id_or_name() {
    let (_dir, builder) = builder();
    assert_eq!(resolve_field(builder.catalog(), "3").unwrap().name, "Published");
    assert_eq!(resolve_field(builder.catalog(), "status").unwrap().id, FieldId::new(2));
    assert!(resolve_field(builder.catalog(), "Preview").is_err());
}

#[test]
fn test_initial_predicates_in_either_shape() {
    let (_dir, paths) = write_files(&[
        (
            "array.json",
            r#"[{"fieldId":1,"operator":"EQUALS","value":"Logo","logicalGroup":"AND","sortOrder":0}]"#,
        ),
        (
            "query.json",
            r#"{"filters":[{"fieldId":1,"operator":"EQUALS","value":"Logo","logicalGroup":"AND","sortOrder":0}]}"#,
        ),
    ]);

    let from_array = load_initial(&paths[0]).unwrap();
    let from_query = load_initial(&paths[1]).unwrap();
    assert_eq!(from_array, from_query);
}

#[test]
fn test_compose_query_command() {
    let (_dir, paths) = write_files(&[
        ("catalog.json", CATALOG),
        (
            "initial.json",
            r#"[{"fieldId":2,"operator":"EQUALS","value":"1","logicalGroup":"AND"}]"#,
        ),
    ]);

    let result = compose_query(
        &paths[0],
        args(&["AND", "Title", "CONTAINS", "poster"]),
        Some(&paths[1]),
        OutputFormat::Json,
    );
    assert!(result.is_ok());
}

#[test]
fn test_missing_catalog_file() {
    let result = compose_query(
        std::path::Path::new("/nonexistent/catalog.json"),
        args(&["AND", "Title", "CONTAINS", "poster"]),
        None,
        OutputFormat::Json,
    );
    assert_matches!(result, Err(CliError::FileError));
}

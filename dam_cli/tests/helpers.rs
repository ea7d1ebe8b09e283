//! Shared test helpers for dam-cli tests.

#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

pub const CATALOG: &str = r#"{
    "fields": [
        {"id": 1, "fieldName": "Title", "displayName": "Title",
         "dataType": {"id": 1, "name": "singleline", "datasource": null}},
        {"id": 2, "fieldName": "Status", "displayName": "Status",
         "dataType": {"id": 6, "name": "workflowstatus",
                      "datasource": "[{\"Id\":1,\"Name\":\"Active\"},{\"Id\":2,\"Name\":\"Archived\"}]"}},
        {"id": 3, "fieldName": "Published", "displayName": "Published",
         "dataType": {"id": 2, "name": "datetime", "datasource": null}},
        {"id": 4, "fieldName": "Preview", "displayName": "Preview",
         "dataType": {"id": 9, "name": "image", "datasource": null}}
    ],
    "operators": ["EQUALS", "CONTAINS", "GREATER_THAN"]
}"#;

pub const ASSETS: &str = r#"[
    {"id": 1, "values": {"1": "Summer poster", "2": "1", "3": "2025-06-01"}},
    {"id": 2, "values": {"1": "Winter poster", "2": "2", "3": "2024-12-01"}},
    {"id": 3, "values": {"1": "Logo"}}
]"#;

/// Writes files into a fresh temp dir.
///
/// Returns the TempDir (must be kept alive) and the path of each file.
pub fn write_files(files: &[(&str, &str)]) -> (TempDir, Vec<PathBuf>) {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let paths = files
        .iter()
        .map(|(name, content)| {
            let path = dir.path().join(name);
            fs::write(&path, content).expect("Failed to write file");
            path
        })
        .collect();

    (dir, paths)
}

pub fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

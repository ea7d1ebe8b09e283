//! Tests for dynamic forms and folder drafts built from server payloads

use dam_core::filter::serialize;
use dam_core::folder::{FolderDraft, FolderTree, folder_filters_to_initial};
use dam_core::form::{FormSchema, Widget};
use dam_core::{
    ApiField, BuilderConfig, Catalog, CatalogOptions, FilterBuilder, OperatorVocabulary,
};

fn catalog() -> Catalog {
    let fields: Vec<ApiField> = serde_json::from_str(
        r#"[
            {"id": 1, "fieldName": "Title", "displayName": "Title",
             "dataType": {"id": 1, "name": "singleline", "datasource": null}},
            {"id": 2, "fieldName": "Notes", "displayName": "Notes",
             "dataType": {"id": 3, "name": "multiline", "datasource": null}},
            {"id": 4, "fieldName": "CategoryGroup", "displayName": "Category group",
             "dataType": {"id": 4, "name": "category", "datasource": "[{\"Id\":\"g1\",\"Name\":\"Print\"}]"}},
            {"id": 5, "fieldName": "Category", "displayName": "Category", "dependsOnFieldId": 4,
             "dataType": {"id": 4, "name": "category",
                          "datasource": "[{\"Id\":\"c1\",\"Name\":\"Poster\",\"GroupId\":\"g1\"}]"}}
        ]"#,
    )
    .unwrap();
    Catalog::from_api_fields(&fields, &CatalogOptions::default()).unwrap()
}

#[test]
fn test_form_schema_from_server_fields() {
    let schema = FormSchema::from_catalog(&catalog());

    assert_eq!(schema.fields().len(), 4);
    assert_eq!(schema.fields()[1].widget, Widget::TextArea);
    assert!(!schema.fields()[1].required);

    let mut values = schema.default_values();
    values.insert("field_1".to_string(), "Poster".to_string());
    values.insert("field_4".to_string(), "g1".to_string());
    values.insert("field_5".to_string(), "c1".to_string());

    assert!(schema.validate(&values).is_ok());
    let payload = serde_json::to_value(schema.fields_json(&values)).unwrap();
    assert_eq!(payload[3]["fieldName"], "Category");
    assert_eq!(payload[3]["value"], "c1");
}

#[test]
fn test_smart_folder_edit_cycle() {
    let tree: FolderTree = serde_json::from_str(
        r#"[{"id": 10, "name": "Smart", "index": 0, "pathCode": "10", "childs": [],
             "filters": [
                {"field": {"id": 1, "name": "Title"}, "operator": "CONTAINS", "value": "poster",
                 "logicalGroup": "AND", "sortOrder": 0},
                {"field": {"id": 99, "name": "Removed"}, "operator": "EQUALS", "value": "x",
                 "logicalGroup": "OR", "sortOrder": 1}
             ]}]"#,
    )
    .unwrap();
    let folder = tree.find(10).unwrap();
    let catalog = catalog();

    let initial = folder_filters_to_initial(&folder.filters, &catalog);
    let builder = FilterBuilder::new(catalog, OperatorVocabulary::default(), BuilderConfig::manual())
        .with_initial(initial);

    let draft = FolderDraft::for_folder(folder).with_query(serialize(builder.rows()));

    assert!(draft.validate().is_ok());
    assert_eq!(draft.filters.len(), 1);
    assert_eq!(draft.filters[0].value, "poster");
}

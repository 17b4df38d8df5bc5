use super::*;

// =============================================================================
// Public URL mapping
// =============================================================================

#[test]
fn response_url_is_under_storage_prefix() {
    let row = MaterialRow {
        id: Uuid::nil(),
        title: "intro.pdf".into(),
        category: "web-development".into(),
        file_path: "web-development/intro.pdf".into(),
        teacher_id: Some(Uuid::nil()),
        created_at: "2025-02-01T12:00:00Z".into(),
    };
    let response = to_response(row);
    assert_eq!(response.url, "/storage/course-materials/web-development/intro.pdf");
    assert_eq!(response.category, "web-development");
    assert_eq!(response.title, "intro.pdf");
}

#[test]
fn list_query_category_is_optional() {
    let query: ListMaterialsQuery = serde_json::from_str("{}").unwrap();
    assert!(query.category.is_none());

    let query: ListMaterialsQuery = serde_json::from_str(r#"{"category":"devops"}"#).unwrap();
    assert_eq!(query.category.as_deref(), Some("devops"));
}

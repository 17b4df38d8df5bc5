use super::*;

// =============================================================================
// normalize_category
// =============================================================================

#[test]
fn normalize_category_lowercases_and_dashes() {
    assert_eq!(normalize_category("Web Development"), Some("web-development".into()));
}

#[test]
fn normalize_category_collapses_whitespace_runs() {
    assert_eq!(normalize_category("  Machine   Learning  "), Some("machine-learning".into()));
}

#[test]
fn normalize_category_passes_through_slug() {
    assert_eq!(normalize_category("devops"), Some("devops".into()));
}

#[test]
fn normalize_category_replaces_path_separators() {
    assert_eq!(normalize_category("UI/UX Design"), Some("ui-ux-design".into()));
}

#[test]
fn normalize_category_rejects_empty() {
    assert_eq!(normalize_category(""), None);
    assert_eq!(normalize_category("   "), None);
}

// =============================================================================
// Error surface
// =============================================================================

#[test]
fn invalid_category_message() {
    assert_eq!(MaterialError::InvalidCategory.to_string(), "invalid category");
}

// =============================================================================
// Row serde
// =============================================================================

#[test]
fn material_row_serializes_all_fields() {
    let row = MaterialRow {
        id: Uuid::nil(),
        title: "intro.pdf".into(),
        category: "web-development".into(),
        file_path: "web-development/intro.pdf".into(),
        teacher_id: Some(Uuid::nil()),
        created_at: "2025-02-01T12:00:00Z".into(),
    };
    let json = serde_json::to_value(&row).unwrap();
    assert_eq!(json["title"], "intro.pdf");
    assert_eq!(json["file_path"], "web-development/intro.pdf");
}

use super::*;

fn temp_store() -> MaterialStore {
    let root = std::env::temp_dir().join(format!("edportal-storage-{}", uuid::Uuid::new_v4()));
    MaterialStore::new(root)
}

// =============================================================================
// Path validation
// =============================================================================

#[test]
fn rejects_file_name_with_separator() {
    let store = temp_store();
    assert!(matches!(
        store.resolve("notes", "a/b.pdf"),
        Err(StorageError::InvalidName(_))
    ));
    assert!(matches!(
        store.resolve("notes", "a\\b.pdf"),
        Err(StorageError::InvalidName(_))
    ));
}

#[test]
fn rejects_parent_dir_components() {
    let store = temp_store();
    assert!(matches!(store.resolve("..", "b.pdf"), Err(StorageError::InvalidName(_))));
    assert!(matches!(store.resolve("notes", ".."), Err(StorageError::InvalidName(_))));
}

#[test]
fn rejects_empty_components() {
    let store = temp_store();
    assert!(matches!(store.resolve("", "b.pdf"), Err(StorageError::InvalidName(_))));
    assert!(matches!(store.resolve("notes", ""), Err(StorageError::InvalidName(_))));
}

#[test]
fn resolve_places_object_under_bucket() {
    let store = temp_store();
    let path = store.resolve("web-development", "intro.pdf").expect("name should be valid");
    assert!(path.starts_with(store.bucket_dir()));
    assert!(path.ends_with("web-development/intro.pdf"));
}

// =============================================================================
// Save
// =============================================================================

#[tokio::test]
async fn save_writes_bytes_and_returns_relative_path() {
    let store = temp_store();
    let rel = store
        .save("web-development", "intro.pdf", b"%PDF-1.4 test")
        .await
        .expect("save should succeed");
    assert_eq!(rel, "web-development/intro.pdf");

    let on_disk = tokio::fs::read(store.bucket_dir().join(&rel))
        .await
        .expect("object should exist");
    assert_eq!(on_disk, b"%PDF-1.4 test");
}

#[tokio::test]
async fn save_overwrites_existing_object() {
    let store = temp_store();
    store.save("notes", "a.txt", b"one").await.expect("first save");
    store.save("notes", "a.txt", b"two").await.expect("second save");

    let on_disk = tokio::fs::read(store.bucket_dir().join("notes/a.txt"))
        .await
        .expect("object should exist");
    assert_eq!(on_disk, b"two");
}

#[tokio::test]
async fn save_rejects_bad_name_before_touching_disk() {
    let store = temp_store();
    let result = store.save("notes", "../escape.txt", b"x").await;
    assert!(matches!(result, Err(StorageError::InvalidName(_))));
    assert!(!store.root().exists());
}

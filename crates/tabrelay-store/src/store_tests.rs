use super::*;
use tempfile::TempDir;

#[tokio::test]
async fn test_memory_store_set_get_remove() {
    let store = MemorySettingsStore::new();
    assert_eq!(store.get("fieldMapping").await.unwrap(), None);

    store.set("fieldMapping", "text").await.unwrap();
    assert_eq!(
        store.get("fieldMapping").await.unwrap().as_deref(),
        Some("text")
    );

    store.remove("fieldMapping").await.unwrap();
    assert_eq!(store.get("fieldMapping").await.unwrap(), None);
}

#[tokio::test]
async fn test_file_store_creates_directory() {
    let temp_dir = TempDir::new().unwrap();
    let nested = temp_dir.path().join("a").join("b");
    let store = FileSettingsStore::new(&nested).await.unwrap();
    assert!(nested.exists());
    assert_eq!(store.path(), nested.join("settings.json"));
}

#[tokio::test]
async fn test_file_store_missing_file_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSettingsStore::new(temp_dir.path()).await.unwrap();
    assert_eq!(store.get("anything").await.unwrap(), None);
}

#[tokio::test]
async fn test_file_store_persists_across_instances() {
    let temp_dir = TempDir::new().unwrap();
    {
        let store = FileSettingsStore::new(temp_dir.path()).await.unwrap();
        store.set("fieldMapping", "SOURCE_TAB_NAME: A").await.unwrap();
        store.set("lastUsedPreset", "scale").await.unwrap();
    }

    let store = FileSettingsStore::new(temp_dir.path()).await.unwrap();
    assert_eq!(
        store.get("fieldMapping").await.unwrap().as_deref(),
        Some("SOURCE_TAB_NAME: A")
    );
    assert_eq!(
        store.get("lastUsedPreset").await.unwrap().as_deref(),
        Some("scale")
    );
}

#[tokio::test]
async fn test_file_store_remove() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSettingsStore::new(temp_dir.path()).await.unwrap();
    store.set("a", "1").await.unwrap();
    store.set("b", "2").await.unwrap();

    store.remove("a").await.unwrap();
    store.remove("missing").await.unwrap();

    assert_eq!(store.get("a").await.unwrap(), None);
    assert_eq!(store.get("b").await.unwrap().as_deref(), Some("2"));
}

#[tokio::test]
async fn test_file_store_corrupt_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSettingsStore::new(temp_dir.path()).await.unwrap();
    std::fs::write(store.path(), "{not json").unwrap();

    let err = store.get("a").await.unwrap_err();
    assert!(matches!(err, StoreError::Corrupt(_)));
}

#[tokio::test]
async fn test_file_store_leaves_no_temp_file() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileSettingsStore::new(temp_dir.path()).await.unwrap();
    store.set("a", "1").await.unwrap();

    let entries: Vec<_> = std::fs::read_dir(temp_dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(entries, vec!["settings.json".to_string()]);
}

//! Message library persistence tests
//!
//! Exercises the library's consistency rules end to end against the real
//! JSON file store, using temporary directories.

use qr_audio::application::MessageLibrary;
use qr_audio::domain::audio::{AudioData, AudioMimeType};
use qr_audio::domain::message::{Annotation, AudioMessage};
use qr_audio::infrastructure::JsonFileStore;

fn message(id: &str, title: &str, created_at: u64) -> AudioMessage {
    let audio = AudioData::new(vec![10, 20, 30], AudioMimeType::Flac);
    let mut msg = AudioMessage::new(&audio, Annotation::new(title, "Test clip.", "\u{1F3B5}"));
    msg.id = id.parse().unwrap();
    msg.created_at = created_at;
    msg
}

#[tokio::test]
async fn operations_round_trip_through_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.json");

    {
        let mut library = MessageLibrary::hydrate(JsonFileStore::with_path(&path)).await;
        library.upsert(message("aaa1111", "First", 1000)).await.unwrap();
        library.upsert(message("bbb2222", "Second", 2000)).await.unwrap();
        library.delete("aaa1111").await.unwrap();
        library.upsert(message("ccc3333", "Third", 3000)).await.unwrap();
    }

    // A fresh hydrate sees exactly what the first session produced
    let library = MessageLibrary::hydrate(JsonFileStore::with_path(&path)).await;
    let ids: Vec<&str> = library.messages().iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["ccc3333", "bbb2222"]);
}

#[tokio::test]
async fn edit_keeps_first_created_at_across_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.json");

    {
        let mut library = MessageLibrary::hydrate(JsonFileStore::with_path(&path)).await;
        library.upsert(message("abc1234", "Note", 1000)).await.unwrap();
    }

    {
        let mut library = MessageLibrary::hydrate(JsonFileStore::with_path(&path)).await;
        library.upsert(message("abc1234", "Note2", 9999)).await.unwrap();
    }

    let library = MessageLibrary::hydrate(JsonFileStore::with_path(&path)).await;
    assert_eq!(library.len(), 1);
    let record = library.resolve("abc1234").unwrap();
    assert_eq!(record.title, "Note2");
    assert_eq!(record.created_at, 1000);
}

#[tokio::test]
async fn garbage_file_hydrates_to_empty_library() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.json");
    std::fs::write(&path, "this is not { json").unwrap();

    let library = MessageLibrary::hydrate(JsonFileStore::with_path(&path)).await;
    assert!(library.is_empty());
    assert!(library.resolve("anything").is_none());
}

#[tokio::test]
async fn garbage_file_is_recoverable_by_writing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.json");
    std::fs::write(&path, "\u{0}\u{1}\u{2} corrupted").unwrap();

    let mut library = MessageLibrary::hydrate(JsonFileStore::with_path(&path)).await;
    library.upsert(message("new1234", "Fresh", 1)).await.unwrap();

    let reloaded = MessageLibrary::hydrate(JsonFileStore::with_path(&path)).await;
    assert_eq!(reloaded.len(), 1);
    assert!(reloaded.resolve("new1234").is_some());
}

#[tokio::test]
async fn legacy_bare_array_file_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.json");
    std::fs::write(
        &path,
        r#"[{"id":"old1234","title":"Old clip","audioData":"AQID","createdAt":1700000000000}]"#,
    )
    .unwrap();

    let library = MessageLibrary::hydrate(JsonFileStore::with_path(&path)).await;
    assert_eq!(library.len(), 1);
    let record = library.resolve("old1234").unwrap();
    assert_eq!(record.title, "Old clip");
    // Legacy records are browser WebM recordings
    assert_eq!(record.mime_type, AudioMimeType::Webm);
}

#[tokio::test]
async fn saved_file_carries_version_tag() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.json");

    let mut library = MessageLibrary::hydrate(JsonFileStore::with_path(&path)).await;
    library.upsert(message("abc1234", "Note", 1)).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["version"], 1);
    assert!(value["messages"].is_array());
}

#[tokio::test]
async fn missing_file_is_an_empty_library() {
    let dir = tempfile::tempdir().unwrap();
    let library =
        MessageLibrary::hydrate(JsonFileStore::with_path(dir.path().join("absent.json"))).await;
    assert!(library.is_empty());
}

#[tokio::test]
async fn delete_missing_id_leaves_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("messages.json");

    let mut library = MessageLibrary::hydrate(JsonFileStore::with_path(&path)).await;
    library.upsert(message("aaa1111", "A", 1)).await.unwrap();
    library.upsert(message("bbb2222", "B", 2)).await.unwrap();
    let before = std::fs::read_to_string(&path).unwrap();

    library.delete("not-there").await.unwrap();

    let after = std::fs::read_to_string(&path).unwrap();
    assert_eq!(before, after);
}

use std::sync::Arc;

use tempfile::TempDir;

use spotharvest::management::Metrics;
use spotharvest::storage::{Persister, TrackStore};
use spotharvest::types::{Artist, ProcessedTrack, Track};

// Helper function to create a test artist
fn create_artist(id: &str, name: &str) -> Artist {
    Artist {
        id: id.to_string(),
        name: name.to_string(),
        extra: serde_json::Map::new(),
    }
}

// Helper function to create a test track
fn create_track(id: &str, name: &str, popularity: u32, duration_ms: u64) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        popularity: Some(popularity),
        preview_url: Some(format!("https://p.scdn.co/{}", id)),
        duration_ms: Some(duration_ms),
        extra: serde_json::Map::new(),
    }
}

#[tokio::test]
async fn test_processed_file_keeps_original_wire_keys() {
    let tmp = TempDir::new().unwrap();
    let metrics = Arc::new(Metrics::new());
    let store = TrackStore::open(&tmp.path().join("spotharvest.db")).unwrap();
    let persister = Persister::new(tmp.path(), Some(store), Arc::clone(&metrics));

    let artist = create_artist("123", "Teste Banda");
    let tracks = vec![create_track("t1", "Musica 1", 50, 180_000)];

    let path = persister.persist(&artist, &tracks, "rock").await.unwrap();
    assert!(path.exists());

    // the artifact path is partitioned by genre and UTC date, and the file
    // name derives from the artist with spaces replaced
    let rel = path.to_string_lossy().replace('\\', "/");
    assert!(rel.contains("processed/rock/"));
    assert!(rel.ends_with("Teste_Banda_rock.json"));

    // downstream consumers parse these exact keys
    let content = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json[0]["artista"], "Teste Banda");
    assert_eq!(json[0]["musica"], "Musica 1");
    assert_eq!(json[0]["popularidade"], 50);
    assert_eq!(json[0]["duracao_ms"], 180_000);
    assert_eq!(json[0]["id"], "t1");

    // and the same keys deserialize back into the normalized form
    let parsed: Vec<ProcessedTrack> = serde_json::from_str(&content).unwrap();
    assert_eq!(parsed[0].track_name, "Musica 1");
    assert_eq!(parsed[0].artist_name, "Teste Banda");

    let snapshot = metrics.snapshot();
    assert_eq!(snapshot.artists_processed, 1);
    assert_eq!(snapshot.tracks_processed, 1);
}

#[tokio::test]
async fn test_repersisting_an_artist_overwrites_rows() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("spotharvest.db");
    let metrics = Arc::new(Metrics::new());
    let store = TrackStore::open(&db_path).unwrap();
    let persister = Persister::new(tmp.path(), Some(store), metrics);

    let artist = create_artist("123", "Teste Banda");
    let tracks = vec![create_track("t1", "Musica 1", 50, 180_000)];

    persister.persist(&artist, &tracks, "rock").await.unwrap();
    persister.persist(&artist, &tracks, "rock").await.unwrap();

    // the (artist_id, track_id) primary key deduplicates the second write
    let reader = TrackStore::open(&db_path).unwrap();
    assert_eq!(reader.count_tracks().unwrap(), 1);
    assert_eq!(reader.count_tracks_for_genre("rock").unwrap(), 1);
}

#[tokio::test]
async fn test_reingest_under_new_genre_moves_the_row() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("spotharvest.db");
    let metrics = Arc::new(Metrics::new());
    let store = TrackStore::open(&db_path).unwrap();
    let persister = Persister::new(tmp.path(), Some(store), metrics);

    let artist = create_artist("123", "Teste Banda");
    let tracks = vec![create_track("t1", "Musica 1", 50, 180_000)];

    persister.persist(&artist, &tracks, "rock").await.unwrap();
    persister.persist(&artist, &tracks, "pop").await.unwrap();

    // the replace overwrites the genre column rather than duplicating
    let reader = TrackStore::open(&db_path).unwrap();
    assert_eq!(reader.count_tracks().unwrap(), 1);
    assert_eq!(reader.count_tracks_for_genre("rock").unwrap(), 0);
    assert_eq!(reader.count_tracks_for_genre("pop").unwrap(), 1);
}

#[tokio::test]
async fn test_path_separators_in_artist_name_stay_in_the_file_name() {
    let tmp = TempDir::new().unwrap();
    let metrics = Arc::new(Metrics::new());
    let persister = Persister::new(tmp.path(), None, metrics);

    let artist = create_artist("456", "AC/DC");
    let tracks = vec![create_track("t2", "Back in Black", 90, 255_000)];

    let path = persister.persist(&artist, &tracks, "rock").await.unwrap();
    assert!(path.exists());

    // the separator must not create a nested directory under the partition
    assert_eq!(
        path.file_name().unwrap().to_string_lossy(),
        "AC_DC_rock.json"
    );
}

#[tokio::test]
async fn test_persist_without_store_still_writes_files() {
    let tmp = TempDir::new().unwrap();
    let metrics = Arc::new(Metrics::new());
    let persister = Persister::new(tmp.path(), None, metrics);

    let artist = create_artist("123", "Teste Banda");
    let tracks = vec![create_track("t1", "Musica 1", 50, 180_000)];

    let path = persister.persist(&artist, &tracks, "rock").await.unwrap();
    assert!(path.exists());
}

#[tokio::test]
async fn test_raw_snapshot_lands_in_misc_partition() {
    let tmp = TempDir::new().unwrap();
    let metrics = Arc::new(Metrics::new());
    let persister = Persister::new(tmp.path(), None, metrics);

    let payload = serde_json::json!({"id": "123", "name": "Teste Banda"});
    let path = persister.persist_raw("artist_123", &payload).await.unwrap();

    let rel = path.to_string_lossy().replace('\\', "/");
    assert!(rel.contains("raw/misc/"));
    assert!(
        path.file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("artist_123_")
    );

    // the payload is stored byte-for-byte equivalent
    let content = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(json, payload);
}

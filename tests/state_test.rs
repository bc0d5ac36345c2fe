use std::sync::Mutex;

use tempfile::TempDir;

use spotharvest::management::{
    CheckpointManager, Metrics, MetricsSink, MetricsSnapshot, RotationManager,
};

#[tokio::test]
async fn test_checkpoint_roundtrip() {
    let tmp = TempDir::new().unwrap();

    let mut checkpoint = CheckpointManager::load(tmp.path(), "rock").await;
    assert_eq!(checkpoint.count(), 0);
    assert!(!checkpoint.contains("a1"));

    checkpoint.add("a1".to_string());
    checkpoint.add("a2".to_string());
    checkpoint.save().await.unwrap();

    let reloaded = CheckpointManager::load(tmp.path(), "rock").await;
    assert_eq!(reloaded.count(), 2);
    assert!(reloaded.contains("a1"));
    assert!(reloaded.contains("a2"));
    assert!(!reloaded.contains("a3"));
}

#[tokio::test]
async fn test_checkpoint_file_format_and_no_leftover_tmp() {
    let tmp = TempDir::new().unwrap();

    let mut checkpoint = CheckpointManager::load(tmp.path(), "jazz").await;
    checkpoint.add("b2".to_string());
    checkpoint.add("a1".to_string());
    checkpoint.save().await.unwrap();

    let path = tmp.path().join("checkpoints/checkpoint_jazz.json");
    let content = std::fs::read_to_string(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&content).unwrap();

    // IDs are sorted so the file is diff-friendly between runs
    assert_eq!(json["processed_artists"], serde_json::json!(["a1", "b2"]));

    // the atomic write leaves no temporary file behind
    assert!(!tmp.path().join("checkpoints/checkpoint_jazz.json.tmp").exists());
}

#[tokio::test]
async fn test_corrupt_checkpoint_starts_fresh() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("checkpoints");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("checkpoint_rock.json"), "{not json").unwrap();

    let checkpoint = CheckpointManager::load(tmp.path(), "rock").await;
    assert_eq!(checkpoint.count(), 0);
}

#[tokio::test]
async fn test_checkpoints_are_per_genre() {
    let tmp = TempDir::new().unwrap();

    let mut rock = CheckpointManager::load(tmp.path(), "rock").await;
    rock.add("a1".to_string());
    rock.save().await.unwrap();

    // the same artist is unprocessed under a different genre
    let pop = CheckpointManager::load(tmp.path(), "pop").await;
    assert!(!pop.contains("a1"));
}

#[tokio::test]
async fn test_checkpoint_reset_moves_file_aside() {
    let tmp = TempDir::new().unwrap();

    // nothing to reset yet
    let backup = CheckpointManager::reset(tmp.path(), "rock").await.unwrap();
    assert!(backup.is_none());

    let mut checkpoint = CheckpointManager::load(tmp.path(), "rock").await;
    checkpoint.add("a1".to_string());
    checkpoint.save().await.unwrap();

    let backup = CheckpointManager::reset(tmp.path(), "rock")
        .await
        .unwrap()
        .unwrap();
    assert!(backup.to_string_lossy().ends_with("checkpoint_rock.json.bak"));
    assert!(backup.exists());
    assert!(!tmp.path().join("checkpoints/checkpoint_rock.json").exists());

    // after the reset the genre is a fresh start
    let reloaded = CheckpointManager::load(tmp.path(), "rock").await;
    assert_eq!(reloaded.count(), 0);
}

#[tokio::test]
async fn test_rotation_select_and_advance() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("genre_rotation.json");

    let mut rotation = RotationManager::load(&path).await;
    assert!(rotation.is_empty());

    rotation.initialize(vec!["g1".to_string(), "g2".to_string(), "g3".to_string()]);
    rotation.advance(2);
    rotation.save().await.unwrap();

    // index 2, batch 2: selection wraps around the end of the list
    let mut rotation = RotationManager::load(&path).await;
    assert_eq!(rotation.state().index, 2);
    assert_eq!(rotation.select(2), vec!["g3".to_string(), "g1".to_string()]);

    rotation.advance(2);
    assert_eq!(rotation.state().index, 1);
}

#[tokio::test]
async fn test_rotation_batch_larger_than_list_repeats_genres() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("genre_rotation.json");

    let mut rotation = RotationManager::load(&path).await;
    rotation.initialize(vec!["g1".to_string(), "g2".to_string()]);

    assert_eq!(
        rotation.select(5),
        vec![
            "g1".to_string(),
            "g2".to_string(),
            "g1".to_string(),
            "g2".to_string(),
            "g1".to_string()
        ]
    );

    rotation.advance(5);
    assert_eq!(rotation.state().index, 1);
}

#[tokio::test]
async fn test_corrupt_rotation_state_starts_fresh() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("genre_rotation.json");
    std::fs::write(&path, "[1, 2").unwrap();

    let rotation = RotationManager::load(&path).await;
    assert!(rotation.is_empty());
    assert_eq!(rotation.state().index, 0);
}

// Sink that records the last published snapshot.
#[derive(Default)]
struct RecordingSink {
    last: Mutex<Option<MetricsSnapshot>>,
}

impl MetricsSink for RecordingSink {
    fn publish(&self, snapshot: &MetricsSnapshot) {
        *self.last.lock().unwrap() = Some(*snapshot);
    }
}

#[tokio::test]
async fn test_metrics_flush_writes_snapshot_and_publishes() {
    let tmp = TempDir::new().unwrap();

    let metrics = Metrics::new();
    metrics.incr_api_calls(4);
    metrics.incr_artists_processed(2);
    metrics.incr_tracks_processed(20);

    let sink = RecordingSink::default();
    let path = metrics.flush(tmp.path(), Some(&sink)).await.unwrap();

    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("metrics_"));
    assert!(name.ends_with(".json"));

    let content = std::fs::read_to_string(&path).unwrap();
    let snapshot: MetricsSnapshot = serde_json::from_str(&content).unwrap();
    assert_eq!(
        snapshot,
        MetricsSnapshot {
            api_calls: 4,
            artists_processed: 2,
            tracks_processed: 20,
        }
    );

    // the sink saw the same snapshot that went to disk
    assert_eq!(*sink.last.lock().unwrap(), Some(snapshot));
}
